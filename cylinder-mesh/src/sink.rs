//! Mesh sinks
//!
//! A sink is the renderer-facing side of generation: it receives finished
//! buffers as numbered sections together with bounds and a material name.

use std::collections::BTreeMap;

use mesh_common::{FORMAT_POS_UV_NORMAL_TANGENT, pack_vertex_tangent, vertex_stride_packed};

use crate::error::SinkError;
use crate::types::{Aabb, MeshBuffers};

/// Maximum vertex count addressable with u16 indices
pub const MAX_PACKED_VERTICES: usize = u16::MAX as usize + 1;

/// Receiver for generated mesh sections
pub trait MeshSink {
    /// Remove every section previously created on this sink
    fn clear_all_sections(&mut self);

    /// Create (or replace) `section` from the given buffers
    fn create_section(
        &mut self,
        section: u32,
        buffers: &MeshBuffers,
        bounds: Aabb,
    ) -> Result<(), SinkError>;

    /// Assign a material to an existing section
    fn set_material(&mut self, section: u32, material: &str);
}

// ============================================================================
// In-memory sink
// ============================================================================

/// One section held by a [`SectionStore`]
#[derive(Debug, Clone, PartialEq)]
pub struct MeshSection {
    pub buffers: MeshBuffers,
    pub bounds: Aabb,
    pub material: Option<String>,
}

/// Sink that keeps full-precision copies of the last uploaded sections
#[derive(Debug, Default)]
pub struct SectionStore {
    sections: BTreeMap<u32, MeshSection>,
    uploads: usize,
}

impl SectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn section(&self, section: u32) -> Option<&MeshSection> {
        self.sections.get(&section)
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Number of `create_section` calls since construction
    pub fn uploads(&self) -> usize {
        self.uploads
    }
}

impl MeshSink for SectionStore {
    fn clear_all_sections(&mut self) {
        self.sections.clear();
    }

    fn create_section(
        &mut self,
        section: u32,
        buffers: &MeshBuffers,
        bounds: Aabb,
    ) -> Result<(), SinkError> {
        self.sections.insert(
            section,
            MeshSection {
                buffers: buffers.clone(),
                bounds,
                material: None,
            },
        );
        self.uploads += 1;
        Ok(())
    }

    fn set_material(&mut self, section: u32, material: &str) {
        if let Some(entry) = self.sections.get_mut(&section) {
            entry.material = Some(material.to_string());
        } else {
            tracing::warn!("set_material on missing section {}", section);
        }
    }
}

// ============================================================================
// Packed sink
// ============================================================================

/// One section in GPU-ready packed form
#[derive(Debug, Clone, PartialEq)]
pub struct PackedSection {
    /// Vertex format flags (see [`mesh_common::packing`])
    pub format: u8,
    /// Packed vertex bytes, `vertex_count * stride` long
    pub vertex_data: Vec<u8>,
    pub indices: Vec<u16>,
    pub bounds: Aabb,
    pub material: Option<String>,
}

impl PackedSection {
    pub fn vertex_count(&self) -> usize {
        self.vertex_data.len() / vertex_stride_packed(self.format) as usize
    }
}

/// Pack full-precision buffers as POS_UV_NORMAL_TANGENT with u16 indices
///
/// Fails when the vertex count cannot be addressed by u16 indices.
pub fn pack_buffers(
    section: u32,
    buffers: &MeshBuffers,
    bounds: Aabb,
) -> Result<PackedSection, SinkError> {
    let vertex_count = buffers.vertex_count();
    if vertex_count > MAX_PACKED_VERTICES {
        return Err(SinkError::IndexOverflow {
            section,
            vertex_count,
            max: MAX_PACKED_VERTICES,
        });
    }

    let format = FORMAT_POS_UV_NORMAL_TANGENT;
    let mut vertex_data =
        Vec::with_capacity(vertex_count * vertex_stride_packed(format) as usize);
    for v in &buffers.vertices {
        pack_vertex_tangent(&mut vertex_data, v.position, v.uv, v.normal, v.tangent, 1.0);
    }

    // In range after the vertex count check
    let indices = buffers.indices.iter().map(|&i| i as u16).collect();

    Ok(PackedSection {
        format,
        vertex_data,
        indices,
        bounds,
        material: None,
    })
}

/// Sink that packs every section for GPU upload
#[derive(Debug, Default)]
pub struct PackedSink {
    sections: BTreeMap<u32, PackedSection>,
}

impl PackedSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn section(&self, section: u32) -> Option<&PackedSection> {
        self.sections.get(&section)
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Take ownership of a packed section, removing it from the sink
    pub fn take_section(&mut self, section: u32) -> Option<PackedSection> {
        self.sections.remove(&section)
    }
}

impl MeshSink for PackedSink {
    fn clear_all_sections(&mut self) {
        self.sections.clear();
    }

    fn create_section(
        &mut self,
        section: u32,
        buffers: &MeshBuffers,
        bounds: Aabb,
    ) -> Result<(), SinkError> {
        let packed = pack_buffers(section, buffers, bounds)?;
        tracing::trace!(
            "packed section {}: {} vertices, {} bytes",
            section,
            packed.vertex_count(),
            packed.vertex_data.len()
        );
        self.sections.insert(section, packed);
        Ok(())
    }

    fn set_material(&mut self, section: u32, material: &str) {
        if let Some(entry) = self.sections.get_mut(&section) {
            entry.material = Some(material.to_string());
        } else {
            tracing::warn!("set_material on missing section {}", section);
        }
    }
}
