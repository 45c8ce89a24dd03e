//! critter CLI - build creature meshes from part documents
//!
//! Documents are JSON, or TOML when the file extension is `.toml`. Meshes are
//! written as STL or OBJ depending on the output extension.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use env_logger::Env;
use log::info;

use critter::presets::{preset, presets, sample_document};
use critter::{read_document, write_document, Format, Model};

#[derive(Parser)]
#[command(name = "critter")]
#[command(about = "Procedural creature meshes from part documents", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a document into a mesh file
    Build {
        /// Input document (.json or .toml)
        input: PathBuf,
        /// Output file (format determined by extension: .stl, .obj)
        output: PathBuf,
    },
    /// Display information about a document
    Info {
        /// Path to the document
        file: PathBuf,
    },
    /// Write a preset as a mesh (.stl, .obj) or as a document (.json, .toml)
    Preset {
        /// Preset name (see `critter presets`)
        name: String,
        /// Output file
        output: PathBuf,
    },
    /// List available presets
    Presets,
    /// Print a sample document
    Sample {
        /// Print TOML instead of JSON
        #[arg(long)]
        toml: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(filter)).init();

    match cli.command {
        Commands::Build { input, output } => build(&input, &output)?,
        Commands::Info { file } => show_info(&file)?,
        Commands::Preset { name, output } => write_preset(&name, &output)?,
        Commands::Presets => {
            for (name, description) in presets() {
                println!("{name:<24} {description}");
            }
        }
        Commands::Sample { toml } => {
            let doc = sample_document();
            let text = if toml { doc.to_toml()? } else { doc.to_json()? };
            println!("{text}");
        }
    }

    Ok(())
}

fn write_model(model: &Model, output: &Path) -> Result<()> {
    model
        .write(output)
        .with_context(|| format!("writing {}", output.display()))?;
    info!(
        "wrote {} parts, {} triangles to {}",
        model.len(),
        model.num_triangles(),
        output.display()
    );
    Ok(())
}

fn build(input: &Path, output: &Path) -> Result<()> {
    let model =
        Model::from_path(input).with_context(|| format!("building {}", input.display()))?;
    write_model(&model, output)
}

fn write_preset(name: &str, output: &Path) -> Result<()> {
    let doc = preset(name).with_context(|| {
        let names: Vec<_> = presets().map(|(n, _)| n).collect();
        format!("available presets: {}", names.join(", "))
    })?;

    if Format::from_path(output).is_some() {
        let mut model = Model::from_document(&doc)?;
        model.name = name.to_string();
        write_model(&model, output)
    } else {
        write_document(&doc, output)?;
        info!("wrote preset {name} to {}", output.display());
        Ok(())
    }
}

fn show_info(file: &Path) -> Result<()> {
    let doc = read_document(file).with_context(|| format!("reading {}", file.display()))?;

    println!("critter document: {}", file.display());
    println!("  Version: {}", doc.version);
    println!("  Parts: {}", doc.parts.len());

    if !doc.parts.is_empty() {
        println!("\nParts:");
        for (i, part) in doc.parts.iter().enumerate() {
            println!("  {}: {} ({})", i + 1, part.name, part.op.kind_name());
        }
    }

    let model =
        Model::from_document(&doc).with_context(|| format!("evaluating {}", file.display()))?;
    println!("\nMesh stats:");
    for part in &model.parts {
        println!(
            "  {:<20} {:>8} triangles {:>8} vertices",
            part.name,
            part.num_triangles(),
            part.num_vertices()
        );
    }
    println!("  Total triangles: {}", model.num_triangles());
    println!("  Total vertices: {}", model.num_vertices());
    if let Some((min, max)) = model.merged().bounding_box() {
        println!("  Bounds: {min:?} .. {max:?}");
    }

    Ok(())
}
