//! Error types for cylinder generation
//!
//! The builder itself cannot fail; these cover configuration checks done
//! before building and sinks that reject finished buffers.

/// Invalid cylinder configuration
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// The angle step divides by the segment count
    #[error("radial segment count must be at least 1")]
    ZeroSegments,

    /// Vertex or index counts would not fit in a `u32`
    #[error("{0} radial segments overflow the mesh buffer counts")]
    TooManySegments(u32),

    #[error("height must be finite, got {0}")]
    NonFiniteHeight(f32),

    #[error("radius must be finite, got {0}")]
    NonFiniteRadius(f32),
}

/// A sink could not accept a finished mesh section
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SinkError {
    #[error("section {section} has {vertex_count} vertices, exceeds maximum {max} for u16 indices")]
    IndexOverflow {
        section: u32,
        vertex_count: usize,
        max: usize,
    },
}

/// Error returned by [`crate::CylinderMesh`] regeneration
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MeshError {
    #[error("invalid cylinder config: {0}")]
    Config(#[from] ConfigError),

    #[error("mesh sink rejected section: {0}")]
    Sink(#[from] SinkError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MeshError::from(ConfigError::ZeroSegments);
        assert!(err.to_string().contains("at least 1"));

        let err = MeshError::from(SinkError::IndexOverflow {
            section: 0,
            vertex_count: 70000,
            max: 65536,
        });
        assert!(err.to_string().contains("70000"));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MeshError>();
    }
}
