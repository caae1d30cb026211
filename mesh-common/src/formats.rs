//! Packed mesh file format (.cylmesh)
//!
//! ```text
//! 0x00: vertex_count u32 LE
//! 0x04: index_count u32 LE
//! 0x08: format u8 (vertex format flags)
//! 0x09: 3 zero bytes
//! 0x0C: vertex_data (vertex_count * stride)
//! var:  index_data (index_count * u16 LE)
//! ```
//!
//! Stride comes from [`crate::packing::vertex_stride_packed`].

use bytemuck::{Pod, Zeroable};

/// File extension for packed mesh files
pub const PACKED_MESH_EXT: &str = "cylmesh";

/// Fixed-size header at the start of a `.cylmesh` file
///
/// Stored little-endian; the in-memory value is always native-endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Pod, Zeroable)]
#[repr(C)]
pub struct MeshFileHeader {
    pub vertex_count: u32,
    pub index_count: u32,
    pub format: u8,
    pub _padding: [u8; 3],
}

impl MeshFileHeader {
    pub const SIZE: usize = size_of::<Self>();

    pub fn new(vertex_count: u32, index_count: u32, format: u8) -> Self {
        Self {
            vertex_count,
            index_count,
            format,
            _padding: [0; 3],
        }
    }

    /// Swap the multi-byte fields between native and little-endian order
    fn swap_le(self) -> Self {
        Self {
            vertex_count: self.vertex_count.to_le(),
            index_count: self.index_count.to_le(),
            ..self
        }
    }

    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        bytemuck::cast(self.swap_le())
    }

    /// Read the header from the start of `bytes`
    ///
    /// Returns `None` when fewer than [`Self::SIZE`] bytes are available.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        let head = bytes.get(..Self::SIZE)?;
        let stored: Self = bytemuck::pod_read_unaligned(head);
        Some(Self {
            _padding: [0; 3],
            ..stored.swap_le()
        })
    }

    /// Total file size implied by this header
    pub fn file_size(&self) -> usize {
        let stride = crate::packing::vertex_stride_packed(self.format) as usize;
        Self::SIZE + self.vertex_count as usize * stride + self.index_count as usize * 2
    }
}
