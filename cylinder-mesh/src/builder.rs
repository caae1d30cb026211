//! Cylinder mesh builder
//!
//! Walks the angular subdivisions of the cylinder and fills pre-sized
//! buffers in place: one independent quad per segment, an optional mirrored
//! back-face quad, and optional fan-triangulated cap triangles.
//!
//! # Layout per segment `i`
//! ```text
//!   p3 ---- p2      top rim    (z = height)
//!   |  \     |
//!   |    \   |
//!   p0 ---- p1      bottom rim (z = 0)
//! angle    next_angle
//! ```
//! Triangles are `(p3, p2, p0)` and `(p2, p1, p0)`, split along the p0-p2
//! diagonal. The double-sided copy uses `(p3, p0, p2)` and `(p2, p0, p1)`.

use glam::{Vec2, Vec3};
use std::f32::consts::PI;

use crate::config::CylinderConfig;
use crate::types::{MeshBuffers, Vertex};

/// Point on the bottom rim at `angle`
#[inline]
fn rim_point(angle: f32, radius: f32) -> Vec3 {
    Vec3::new(angle.cos() * radius, angle.sin() * radius, 0.0)
}

/// Normalized `(a - c) × (b - c)`; zero for degenerate triangles
#[inline]
fn flat_normal(a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    (a - c).cross(b - c).normalize_or_zero()
}

/// Cap UV: project the circle point at `angle` onto a unit disk centered at (0.5, 0.5)
#[inline]
fn cap_uv(angle: f32) -> Vec2 {
    Vec2::new(0.5 - angle.cos() / 2.0, 0.5 - angle.sin() / 2.0)
}

/// Write cursors into the output buffers
///
/// Both only ever move forward during one build.
struct Cursor<'a> {
    buffers: &'a mut MeshBuffers,
    vertex: usize,
    index: usize,
}

impl Cursor<'_> {
    fn push_vertex(&mut self, vertex: Vertex) -> u32 {
        let slot = self.vertex;
        self.buffers.vertices[slot] = vertex;
        self.vertex += 1;
        slot as u32
    }

    fn push_triangle(&mut self, i0: u32, i1: u32, i2: u32) {
        self.buffers.indices[self.index..self.index + 3].copy_from_slice(&[i0, i1, i2]);
        self.index += 3;
    }
}

/// Fill `buffers` with the cylinder described by `config`
///
/// `buffers` must be sized exactly by [`CylinderConfig::buffer_counts`] for the
/// same configuration (see [`MeshBuffers::with_counts`]), and the segment
/// count must be at least 1. Violating either is a programming error: the
/// builder panics on an out-of-range write rather than resizing.
///
/// Every vertex and index slot is overwritten, so buffers can be reused
/// across regenerations with the same configuration.
pub fn build_cylinder(buffers: &mut MeshBuffers, config: &CylinderConfig) {
    let segments = config.radial_segment_count;
    let radius = config.radius;

    let angle_step = (2.0 / segments as f32) * PI;
    let u_per_quad = 1.0 / segments as f32;
    let offset = Vec3::new(0.0, 0.0, config.height);

    let mut cursor = Cursor {
        buffers,
        vertex: 0,
        index: 0,
    };

    for quad in 0..segments {
        let angle = quad as f32 * angle_step;
        let next_angle = (quad + 1) as f32 * angle_step;

        let p0 = rim_point(angle, radius);
        let p1 = rim_point(next_angle, radius);
        let p2 = p1 + offset;
        let p3 = p0 + offset;

        // UVs: U runs right-to-left around the cylinder, V=1 at the bottom rim
        let u_left = 1.0 - u_per_quad * quad as f32;
        let u_right = 1.0 - u_per_quad * (quad + 1) as f32;
        let uv0 = Vec2::new(u_left, 1.0);
        let uv1 = Vec2::new(u_right, 1.0);
        let uv2 = Vec2::new(u_right, 0.0);
        let uv3 = Vec2::new(u_left, 0.0);

        let normal = flat_normal(p0, p1, p2);
        let tangent = (p0 - p1).normalize_or_zero();

        // Left edge (p0, p3) and right edge (p1, p2) normals
        let (normal_left, normal_right) = if config.smooth_normals {
            let p4 = rim_point((quad + 2) as f32 * angle_step, radius);
            let normal_next = flat_normal(p1, p4, p2);

            let p_prev = rim_point((quad as f32 - 1.0) * angle_step, radius);
            let normal_prev = flat_normal(p0, p3, p_prev);

            (
                ((normal + normal_prev) / 2.0).normalize_or_zero(),
                ((normal + normal_next) / 2.0).normalize_or_zero(),
            )
        } else {
            (normal, normal)
        };

        let v0 = cursor.push_vertex(Vertex::new(p0, uv0, normal_left, tangent));
        let v1 = cursor.push_vertex(Vertex::new(p1, uv1, normal_right, tangent));
        let v2 = cursor.push_vertex(Vertex::new(p2, uv2, normal_right, tangent));
        let v3 = cursor.push_vertex(Vertex::new(p3, uv3, normal_left, tangent));

        cursor.push_triangle(v3, v2, v0);
        cursor.push_triangle(v2, v1, v0);

        if config.double_sided {
            // Back faces keep the unsmoothed normal
            let v0 = cursor.push_vertex(Vertex::new(p0, uv0, normal, tangent));
            let v1 = cursor.push_vertex(Vertex::new(p1, uv1, normal, tangent));
            let v2 = cursor.push_vertex(Vertex::new(p2, uv2, normal, tangent));
            let v3 = cursor.push_vertex(Vertex::new(p3, uv3, normal, tangent));

            cursor.push_triangle(v3, v0, v2);
            cursor.push_triangle(v2, v0, v1);
        }

        // Caps fan out from the rim point at angle 0, so segment 0 has no facet
        if quad != 0 && config.cap_ends {
            let anchor = rim_point(0.0, radius);
            let cur = rim_point(angle, radius);
            let next = rim_point(next_angle, radius);

            // Bottom cap
            let cap_normal = flat_normal(anchor, cur, next);
            let a = cursor.push_vertex(Vertex::new(anchor, cap_uv(0.0), cap_normal, tangent));
            let c = cursor.push_vertex(Vertex::new(cur, cap_uv(-angle), cap_normal, tangent));
            let n = cursor.push_vertex(Vertex::new(next, cap_uv(-next_angle), cap_normal, tangent));
            cursor.push_triangle(a, c, n);

            // Top cap
            let (anchor, cur, next) = (anchor + offset, cur + offset, next + offset);
            let cap_normal = flat_normal(anchor, cur, next);
            let a = cursor.push_vertex(Vertex::new(anchor, cap_uv(0.0), cap_normal, tangent));
            let c = cursor.push_vertex(Vertex::new(cur, cap_uv(angle), cap_normal, tangent));
            let n = cursor.push_vertex(Vertex::new(next, cap_uv(next_angle), cap_normal, tangent));
            cursor.push_triangle(n, c, a);
        }
    }

    debug_assert_eq!(cursor.vertex, cursor.buffers.vertices.len());
    debug_assert_eq!(cursor.index, cursor.buffers.indices.len());
}

/// Allocate exactly-sized buffers and build the cylinder into them
///
/// The caller must ensure `config.radial_segment_count >= 1`.
pub fn generate_cylinder(config: &CylinderConfig) -> MeshBuffers {
    let mut buffers = MeshBuffers::with_counts(config.buffer_counts());
    build_cylinder(&mut buffers, config);
    buffers
}
