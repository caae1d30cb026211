//! Procedural cylinder mesh generation
//!
//! Builds an open or capped cylinder around +Z from a handful of parameters:
//! height, radius, radial segment count, and flags for end caps, a
//! double-sided shell and smoothed side normals.
//!
//! Every side segment is an independent quad with its own four vertices, so
//! UV seams and flat shading need no vertex splitting. Buffer sizes are known
//! up front ([`buffer_counts`]) and the builder writes into pre-sized buffers
//! without growing them.
//!
//! # Modules
//!
//! - [`config`] - Cylinder parameters (TOML-deserializable)
//! - [`sizer`] - Exact vertex/triangle counts
//! - [`builder`] - Geometry, UVs, normals and tangents
//! - [`sink`] - Section receivers (in-memory and packed)
//! - [`component`] - Lifecycle owner tying config, buffers and sink together
//! - [`export`] - OBJ and packed mesh writers
//!
//! # Example
//! ```
//! use cylinder_mesh::{CylinderConfig, generate_cylinder};
//!
//! let config = CylinderConfig::new(100.0, 50.0, 8).with_caps(false);
//! let mesh = generate_cylinder(&config);
//! assert_eq!(mesh.vertex_count(), 32);
//! assert_eq!(mesh.indices.len(), 48);
//! ```

pub mod builder;
pub mod component;
pub mod config;
pub mod error;
pub mod export;
pub mod sink;
pub mod sizer;
pub mod types;

pub use builder::{build_cylinder, generate_cylinder};
pub use component::{CYLINDER_SECTION, CylinderMesh};
pub use config::CylinderConfig;
pub use error::{ConfigError, MeshError, SinkError};
pub use export::{write_obj, write_packed_mesh};
pub use sink::{
    MAX_PACKED_VERTICES, MeshSection, MeshSink, PackedSection, PackedSink, SectionStore,
    pack_buffers,
};
pub use sizer::{BufferCounts, buffer_counts, checked_buffer_counts};
pub use types::{Aabb, MeshBuffers, Vertex};
