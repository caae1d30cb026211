//! Cylinder mesh component
//!
//! Owns a configuration, the reusable vertex/index buffers and a sink.
//! Buffers are allocated on first generation and rebuilt in place afterwards;
//! a configuration change drops them so the next generation re-sizes.

use crate::builder::build_cylinder;
use crate::config::CylinderConfig;
use crate::error::MeshError;
use crate::sink::MeshSink;
use crate::types::MeshBuffers;

/// Section id the cylinder is uploaded to
pub const CYLINDER_SECTION: u32 = 0;

pub struct CylinderMesh<S: MeshSink> {
    config: CylinderConfig,
    material: Option<String>,
    buffers: Option<MeshBuffers>,
    sink: S,
}

impl<S: MeshSink> CylinderMesh<S> {
    pub fn new(config: CylinderConfig, sink: S) -> Self {
        Self {
            config,
            material: None,
            buffers: None,
            sink,
        }
    }

    /// Material assigned to the section after every upload
    pub fn with_material(mut self, material: impl Into<String>) -> Self {
        self.material = Some(material.into());
        self
    }

    /// Buffers from the last generation, if any have been allocated
    pub fn buffers(&self) -> Option<&MeshBuffers> {
        self.buffers.as_ref()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// First activation: generate once
    pub fn activate(&mut self) -> Result<(), MeshError> {
        self.generate_mesh()
    }

    /// Replace the configuration and regenerate with freshly sized buffers
    pub fn set_config(&mut self, config: CylinderConfig) -> Result<(), MeshError> {
        self.config = config;
        self.buffers = None;
        self.generate_mesh()
    }

    /// Rebuild the cylinder and upload it to the sink
    ///
    /// A non-positive height clears the sink and keeps the buffers untouched.
    pub fn generate_mesh(&mut self) -> Result<(), MeshError> {
        if !self.config.has_mesh() {
            tracing::warn!(
                "cylinder height {} is not positive, clearing mesh sections",
                self.config.height
            );
            self.sink.clear_all_sections();
            return Ok(());
        }

        self.config.validate()?;

        let counts = self.config.buffer_counts();
        // set_config drops the buffers, so any kept ones fit the current config
        let buffers = self
            .buffers
            .get_or_insert_with(|| MeshBuffers::with_counts(counts));
        debug_assert!(buffers.matches(counts));

        build_cylinder(buffers, &self.config);

        tracing::debug!(
            "generated cylinder: {} vertices, {} triangles ({} segments, caps={}, double_sided={}, smooth={})",
            buffers.vertex_count(),
            buffers.triangle_count(),
            self.config.radial_segment_count,
            self.config.cap_ends,
            self.config.double_sided,
            self.config.smooth_normals,
        );

        self.sink.clear_all_sections();
        self.sink
            .create_section(CYLINDER_SECTION, buffers, self.config.bounding_box())?;
        if let Some(material) = &self.material {
            self.sink.set_material(CYLINDER_SECTION, material);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConfigError, SinkError};
    use crate::sink::{PackedSink, SectionStore};

    #[test]
    fn test_activate_uploads_section_zero() {
        let config = CylinderConfig::new(100.0, 50.0, 8);
        let mut mesh = CylinderMesh::new(config, SectionStore::new()).with_material("brick");
        mesh.activate().unwrap();

        let section = mesh.sink().section(CYLINDER_SECTION).unwrap();
        assert_eq!(section.buffers.vertex_count(), 74);
        assert_eq!(section.buffers.indices.len(), 90);
        assert_eq!(section.bounds, config.bounding_box());
        assert_eq!(section.material.as_deref(), Some("brick"));
    }

    #[test]
    fn test_no_material_leaves_section_unassigned() {
        let mut mesh = CylinderMesh::new(CylinderConfig::default(), SectionStore::new());
        mesh.activate().unwrap();
        assert_eq!(mesh.sink().section(CYLINDER_SECTION).unwrap().material, None);
    }

    #[test]
    fn test_non_positive_height_clears_sections() {
        let mut mesh = CylinderMesh::new(CylinderConfig::default(), SectionStore::new());
        mesh.activate().unwrap();
        assert!(mesh.buffers().is_some());
        assert_eq!(mesh.sink().section_count(), 1);

        mesh.set_config(CylinderConfig::new(0.0, 50.0, 10)).unwrap();
        assert!(mesh.sink().is_empty());
        // Buffers were dropped by the config change and not reallocated
        assert!(mesh.buffers().is_none());

        mesh.set_config(CylinderConfig::new(-1.0, 50.0, 10)).unwrap();
        assert!(mesh.sink().is_empty());
    }

    #[test]
    fn test_regeneration_reuses_buffers() {
        let mut mesh = CylinderMesh::new(CylinderConfig::default(), SectionStore::new());
        mesh.activate().unwrap();
        let first_ptr = mesh.buffers().unwrap().vertices.as_ptr();
        let first = mesh.buffers().unwrap().clone();

        mesh.generate_mesh().unwrap();
        assert_eq!(mesh.buffers().unwrap().vertices.as_ptr(), first_ptr);
        assert_eq!(mesh.buffers().unwrap(), &first);
        assert_eq!(mesh.sink().uploads(), 2);
        assert_eq!(mesh.sink().section_count(), 1);
    }

    #[test]
    fn test_config_change_resizes_buffers() {
        let mut mesh = CylinderMesh::new(CylinderConfig::new(10.0, 1.0, 8), SectionStore::new());
        mesh.activate().unwrap();
        assert_eq!(mesh.buffers().unwrap().vertex_count(), 74);

        let next = CylinderConfig::new(10.0, 1.0, 8)
            .with_caps(false)
            .with_double_sided(true);
        mesh.set_config(next).unwrap();
        assert_eq!(mesh.buffers().unwrap().vertex_count(), 64);
        assert_eq!(mesh.sink().section(CYLINDER_SECTION).unwrap().buffers.vertex_count(), 64);
    }

    #[test]
    fn test_zero_segments_is_config_error() {
        let mut mesh = CylinderMesh::new(CylinderConfig::new(10.0, 1.0, 0), SectionStore::new());
        assert_eq!(
            mesh.activate(),
            Err(MeshError::Config(ConfigError::ZeroSegments))
        );
        assert!(mesh.sink().is_empty());
        assert!(mesh.buffers().is_none());
    }

    #[test]
    fn test_packed_sink_overflow_is_sink_error() {
        // 8192 capped segments need 8192*4 + 6*8191 = 81914 vertices
        let config = CylinderConfig::new(10.0, 1.0, 8192);
        let mut mesh = CylinderMesh::new(config, PackedSink::new());
        assert!(matches!(
            mesh.activate(),
            Err(MeshError::Sink(SinkError::IndexOverflow { .. }))
        ));
    }
}
