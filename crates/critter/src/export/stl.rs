//! Binary STL export.
//!
//! Layout: 80-byte header, `u32` triangle count, then 50 bytes per facet
//! (normal, three corners, `u16` attribute count), all little-endian.

use std::fs;
use std::path::Path;

use critter_mesh::TriangleMesh;

use crate::Result;

const HEADER_LEN: usize = 80;
const FACET_LEN: usize = 50;

fn header(name: &str) -> [u8; HEADER_LEN] {
    let mut header = [b' '; HEADER_LEN];
    let text = format!("critter STL export: {name}");
    let len = text.len().min(HEADER_LEN);
    header[..len].copy_from_slice(&text.as_bytes()[..len]);
    header
}

/// Unit facet normal from the winding, or +Z for a degenerate facet.
fn facet_normal(v0: [f32; 3], v1: [f32; 3], v2: [f32; 3]) -> [f32; 3] {
    let e1 = [v1[0] - v0[0], v1[1] - v0[1], v1[2] - v0[2]];
    let e2 = [v2[0] - v0[0], v2[1] - v0[1], v2[2] - v0[2]];
    let nx = e1[1] * e2[2] - e1[2] * e2[1];
    let ny = e1[2] * e2[0] - e1[0] * e2[2];
    let nz = e1[0] * e2[1] - e1[1] * e2[0];
    let len = (nx * nx + ny * ny + nz * nz).sqrt();
    if len > 1e-10 {
        [nx / len, ny / len, nz / len]
    } else {
        [0.0, 0.0, 1.0]
    }
}

/// Encode `mesh` as binary STL.
pub fn to_stl_bytes(name: &str, mesh: &TriangleMesh) -> Result<Vec<u8>> {
    mesh.validate()?;

    let num_triangles = mesh.num_triangles();
    let mut data = Vec::with_capacity(HEADER_LEN + 4 + num_triangles * FACET_LEN);
    data.extend_from_slice(&header(name));
    data.extend_from_slice(&(num_triangles as u32).to_le_bytes());

    for [i0, i1, i2] in mesh.triangles() {
        let v0 = mesh.position(i0 as usize);
        let v1 = mesh.position(i1 as usize);
        let v2 = mesh.position(i2 as usize);

        for c in facet_normal(v0, v1, v2) {
            data.extend_from_slice(&c.to_le_bytes());
        }
        for v in [v0, v1, v2] {
            for c in v {
                data.extend_from_slice(&c.to_le_bytes());
            }
        }
        // Attribute byte count
        data.extend_from_slice(&0u16.to_le_bytes());
    }

    Ok(data)
}

/// Write `mesh` as binary STL to `path`.
pub fn export_stl(name: &str, mesh: &TriangleMesh, path: impl AsRef<Path>) -> Result<()> {
    let bytes = to_stl_bytes(name, mesh)?;
    fs::write(path.as_ref(), bytes)?;
    log::debug!(
        "wrote {} triangles to {}",
        mesh.num_triangles(),
        path.as_ref().display()
    );
    Ok(())
}
