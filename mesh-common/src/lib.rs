//! Shared types and utilities for the cylinder mesh tools
//!
//! This crate provides packing utilities shared between:
//! - `cylinder-mesh` (generator sinks)
//! - `cylinder-cli` (file export)
//!
//! # Modules
//!
//! - [`packing`] - Vertex data packing utilities (f32 → f16/unorm16/octahedral)
//! - [`formats`] - Packed mesh file header

pub mod formats;
pub mod packing;

pub use formats::{MeshFileHeader, PACKED_MESH_EXT};

// Re-export commonly used packing items
pub use packing::{
    FORMAT_NORMAL, FORMAT_POS_UV_NORMAL_TANGENT, FORMAT_TANGENT, FORMAT_UV, decode_octahedral,
    encode_octahedral, pack_octahedral_u32, pack_position_f16, pack_tangent, pack_uv_unorm16,
    pack_vertex_tangent, unpack_octahedral_u32, unpack_tangent, vertex_stride_packed,
};
