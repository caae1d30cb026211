//! Mesh buffer types
//!
//! Full-precision vertex data handed from the builder to a sink.

use glam::{Vec2, Vec3};

use crate::sizer::BufferCounts;

/// Vertex with position, UV, normal and tangent
///
/// Normals and tangents are unit length, or zero for degenerate geometry.
/// UV origin (0, 0) is the top-left corner of the texture.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    pub uv: Vec2,
    pub normal: Vec3,
    pub tangent: Vec3,
}

impl Vertex {
    /// Create a new vertex
    pub fn new(position: Vec3, uv: Vec2, normal: Vec3, tangent: Vec3) -> Self {
        Self {
            position,
            uv,
            normal,
            tangent,
        }
    }
}

/// Axis-aligned bounding box given by two corner points
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Check whether a point lies inside the box (inclusive)
    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }
}

/// Vertex and index storage for one generated mesh
///
/// Vertices are never shared between faces: every quad and cap triangle owns
/// its vertices so seams and flat normals stay independent.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshBuffers {
    /// Vertex data
    pub vertices: Vec<Vertex>,
    /// Triangle indices, three per triangle
    pub indices: Vec<u32>,
}

impl MeshBuffers {
    /// Allocate zero-filled storage of exactly the given size
    pub fn with_counts(counts: BufferCounts) -> Self {
        Self {
            vertices: vec![Vertex::default(); counts.vertex_count as usize],
            indices: vec![0; counts.index_count() as usize],
        }
    }

    /// Check whether these buffers are sized exactly for `counts`
    pub fn matches(&self, counts: BufferCounts) -> bool {
        self.vertices.len() == counts.vertex_count as usize
            && self.indices.len() == counts.index_count() as usize
    }

    /// Get vertex count
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get triangle count
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterate triangles as index triples
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices
            .chunks_exact(3)
            .map(|tri| [tri[0], tri[1], tri[2]])
    }
}
