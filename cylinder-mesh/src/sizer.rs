//! Buffer sizing
//!
//! Exact vertex/triangle counts for a cylinder configuration, so storage can
//! be allocated once and filled in place by the builder.

/// Vertex and triangle counts for one mesh
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BufferCounts {
    pub vertex_count: u32,
    pub triangle_count: u32,
}

impl BufferCounts {
    /// Number of index entries (three per triangle)
    pub fn index_count(&self) -> u32 {
        self.triangle_count * 3
    }
}

/// Compute the exact buffer sizes for a cylinder
///
/// - 4 vertices and 2 triangles per radial segment (no shared vertices)
/// - double-sided doubles both
/// - caps add one triangle per segment except the first, for both the top
///   and the bottom disk, each triangle owning 3 fresh vertices
///
/// Returns `None` when a count, or the index count derived from it, does
/// not fit in a `u32`.
pub fn checked_buffer_counts(
    radial_segments: u32,
    cap_ends: bool,
    double_sided: bool,
) -> Option<BufferCounts> {
    let mut vertex_count = radial_segments.checked_mul(4)?; // 4 verts per quad
    let mut triangle_count = radial_segments.checked_mul(2)?; // 2 triangles per quad

    if double_sided {
        vertex_count = vertex_count.checked_mul(2)?;
        triangle_count = triangle_count.checked_mul(2)?;
    }

    if cap_ends {
        // Segment 0 is the fan anchor and never emits a cap facet
        let cap_triangles = radial_segments.saturating_sub(1).checked_mul(2)?;
        triangle_count = triangle_count.checked_add(cap_triangles)?;
        vertex_count = vertex_count.checked_add(cap_triangles.checked_mul(3)?)?;
    }

    // Index buffer length must be representable too
    triangle_count.checked_mul(3)?;

    Some(BufferCounts {
        vertex_count,
        triangle_count,
    })
}

/// Compute the exact buffer sizes for a validated configuration
///
/// Segment counts rejected by [`crate::CylinderConfig::validate`] overflow;
/// those saturate at `u32::MAX` instead of wrapping.
pub fn buffer_counts(radial_segments: u32, cap_ends: bool, double_sided: bool) -> BufferCounts {
    checked_buffer_counts(radial_segments, cap_ends, double_sided).unwrap_or(BufferCounts {
        vertex_count: u32::MAX,
        triangle_count: u32::MAX / 3,
    })
}
