//! Mesh export formats.
//!
//! - [`stl`]: binary STL, one merged mesh per file.
//! - [`obj`]: Wavefront OBJ, one object per part.

pub mod obj;
pub mod stl;

use std::path::Path;

/// Output formats chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Binary STL (`.stl`).
    Stl,
    /// Wavefront OBJ (`.obj`).
    Obj,
}

impl Format {
    /// Format for `path`'s extension, case-insensitive.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "stl" => Some(Format::Stl),
            "obj" => Some(Format::Obj),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(Format::from_path(Path::new("hand.stl")), Some(Format::Stl));
        assert_eq!(Format::from_path(Path::new("HAND.OBJ")), Some(Format::Obj));
        assert_eq!(Format::from_path(Path::new("hand.glb")), None);
        assert_eq!(Format::from_path(Path::new("hand")), None);
    }
}
