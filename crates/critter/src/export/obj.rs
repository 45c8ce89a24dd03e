//! Wavefront OBJ export.
//!
//! Each part becomes an `o` object. Indices are 1-based and global across the
//! file, so later parts are offset past the vertices, tex coords and normals
//! written before them.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use critter_mesh::TriangleMesh;

use crate::Result;

/// Write named meshes as OBJ text.
pub fn write_obj<'a, W, I>(out: &mut W, parts: I) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = (&'a str, &'a TriangleMesh)>,
{
    writeln!(out, "# critter OBJ export")?;

    // OBJ numbers v, vt and vn independently, starting at 1.
    let (mut v_base, mut vt_base, mut vn_base) = (1usize, 1usize, 1usize);
    for (name, mesh) in parts {
        mesh.validate()?;
        let count = mesh.num_vertices();
        let has_normals = count > 0 && mesh.normals.len() == mesh.positions.len();
        let tex = mesh.tex_coords.as_deref().filter(|t| !t.is_empty());

        writeln!(out, "o {name}")?;
        for p in mesh.positions.chunks_exact(3) {
            writeln!(out, "v {} {} {}", p[0], p[1], p[2])?;
        }
        if let Some(tex) = tex {
            for t in tex.chunks_exact(2) {
                writeln!(out, "vt {} {}", t[0], t[1])?;
            }
        }
        if has_normals {
            for n in mesh.normals.chunks_exact(3) {
                writeln!(out, "vn {} {} {}", n[0], n[1], n[2])?;
            }
        }

        for tri in mesh.triangles() {
            let corners = tri.map(|i| {
                let i = i as usize;
                let v = v_base + i;
                match (tex.is_some(), has_normals) {
                    (true, true) => format!("{v}/{}/{}", vt_base + i, vn_base + i),
                    (true, false) => format!("{v}/{}", vt_base + i),
                    (false, true) => format!("{v}//{}", vn_base + i),
                    (false, false) => v.to_string(),
                }
            });
            writeln!(out, "f {} {} {}", corners[0], corners[1], corners[2])?;
        }

        v_base += count;
        if tex.is_some() {
            vt_base += count;
        }
        if has_normals {
            vn_base += count;
        }
    }

    Ok(())
}

/// Render named meshes as an OBJ string.
pub fn to_obj_string<'a, I>(parts: I) -> Result<String>
where
    I: IntoIterator<Item = (&'a str, &'a TriangleMesh)>,
{
    let mut buf = Vec::new();
    write_obj(&mut buf, parts)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Write named meshes to an OBJ file at `path`.
pub fn export_obj<'a, I>(parts: I, path: impl AsRef<Path>) -> Result<()>
where
    I: IntoIterator<Item = (&'a str, &'a TriangleMesh)>,
{
    let file = File::create(path.as_ref())?;
    let mut out = BufWriter::new(file);
    write_obj(&mut out, parts)?;
    out.flush()?;
    log::debug!("wrote OBJ to {}", path.as_ref().display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> TriangleMesh {
        TriangleMesh {
            positions: vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            normals: vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0],
            indices: vec![0, 1, 2],
            tex_coords: None,
        }
    }

    #[test]
    fn test_single_part() {
        let mesh = triangle();
        let text = to_obj_string([("tri", &mesh)]).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[1], "o tri");
        assert_eq!(lines[2], "v 0 0 0");
        assert_eq!(lines[3], "v 1 0 0");
        assert_eq!(lines.iter().filter(|l| l.starts_with("vn ")).count(), 3);
        assert_eq!(*lines.last().unwrap(), "f 1//1 2//2 3//3");
    }

    #[test]
    fn test_indices_offset_across_parts() {
        let a = triangle();
        let b = triangle().with_placeholder_tex_coords();
        let text = to_obj_string([("a", &a), ("b", &b)]).unwrap();
        let faces: Vec<&str> = text.lines().filter(|l| l.starts_with("f ")).collect();
        assert_eq!(faces, ["f 1//1 2//2 3//3", "f 4/1/4 5/2/5 6/3/6"]);
        assert_eq!(text.lines().filter(|l| l.starts_with("vt ")).count(), 3);
    }

    #[test]
    fn test_positions_only() {
        let mut mesh = triangle();
        mesh.normals.clear();
        let text = to_obj_string([("bare", &mesh)]).unwrap();
        assert!(text.contains("\nf 1 2 3\n"));
    }
}
