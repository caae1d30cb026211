//! File writers for generated meshes

use anyhow::Result;
use std::io::Write;

use mesh_common::MeshFileHeader;

use crate::sink::PackedSection;
use crate::types::MeshBuffers;

/// Write a Wavefront OBJ file
///
/// Every vertex carries its own position, UV and normal, so faces reference
/// all three attributes with the same index. V is flipped to OBJ's
/// bottom-left texture origin.
pub fn write_obj<W: Write>(w: &mut W, buffers: &MeshBuffers, name: &str) -> Result<()> {
    writeln!(w, "o {}", name)?;

    for v in &buffers.vertices {
        writeln!(w, "v {} {} {}", v.position.x, v.position.y, v.position.z)?;
    }
    for v in &buffers.vertices {
        writeln!(w, "vt {} {}", v.uv.x, 1.0 - v.uv.y)?;
    }
    for v in &buffers.vertices {
        writeln!(w, "vn {} {} {}", v.normal.x, v.normal.y, v.normal.z)?;
    }

    for [a, b, c] in buffers.triangles() {
        let (a, b, c) = (a + 1, b + 1, c + 1);
        writeln!(w, "f {a}/{a}/{a} {b}/{b}/{b} {c}/{c}/{c}")?;
    }

    Ok(())
}

/// Write a packed mesh file: header, vertex data, then u16 indices
pub fn write_packed_mesh<W: Write>(w: &mut W, section: &PackedSection) -> Result<()> {
    let header = MeshFileHeader::new(
        section.vertex_count() as u32,
        section.indices.len() as u32,
        section.format,
    );
    w.write_all(&header.to_bytes())?;
    w.write_all(&section.vertex_data)?;

    for i in &section.indices {
        w.write_all(&i.to_le_bytes())?;
    }

    Ok(())
}
