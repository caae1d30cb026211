//! Cylinder configuration
//!
//! Immutable per generation call. Deserializable from TOML tables where
//! every missing field falls back to the default.

use glam::Vec3;
use serde::Deserialize;

use crate::error::ConfigError;
use crate::sizer::{BufferCounts, buffer_counts, checked_buffer_counts};
use crate::types::Aabb;

/// Default cylinder height
pub const DEFAULT_HEIGHT: f32 = 100.0;
/// Default cylinder radius
pub const DEFAULT_RADIUS: f32 = 50.0;
/// Default number of radial segments
pub const DEFAULT_RADIAL_SEGMENTS: u32 = 10;

/// Parameters for one cylinder mesh
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CylinderConfig {
    /// Extent along +Z. Non-positive means "no mesh".
    pub height: f32,
    /// Radius of the circle traced in the XY plane
    pub radius: f32,
    /// Number of angular subdivisions (degenerate below 3)
    #[serde(alias = "segments")]
    pub radial_segment_count: u32,
    /// Emit top and bottom disk triangles
    pub cap_ends: bool,
    /// Duplicate side quads with reversed winding
    pub double_sided: bool,
    /// Blend side normals across adjacent quads
    pub smooth_normals: bool,
}

impl Default for CylinderConfig {
    fn default() -> Self {
        Self {
            height: DEFAULT_HEIGHT,
            radius: DEFAULT_RADIUS,
            radial_segment_count: DEFAULT_RADIAL_SEGMENTS,
            cap_ends: true,
            double_sided: false,
            smooth_normals: true,
        }
    }
}

impl CylinderConfig {
    pub fn new(height: f32, radius: f32, radial_segment_count: u32) -> Self {
        Self {
            height,
            radius,
            radial_segment_count,
            ..Self::default()
        }
    }

    pub fn with_caps(mut self, cap_ends: bool) -> Self {
        self.cap_ends = cap_ends;
        self
    }

    pub fn with_double_sided(mut self, double_sided: bool) -> Self {
        self.double_sided = double_sided;
        self
    }

    pub fn with_smooth_normals(mut self, smooth_normals: bool) -> Self {
        self.smooth_normals = smooth_normals;
        self
    }

    /// Whether this configuration produces any geometry
    pub fn has_mesh(&self) -> bool {
        self.height > 0.0
    }

    /// Check the preconditions the builder relies on
    ///
    /// A non-positive height is not an error: it means the mesh is cleared
    /// instead of generated.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.radial_segment_count == 0 {
            return Err(ConfigError::ZeroSegments);
        }
        if checked_buffer_counts(
            self.radial_segment_count,
            self.cap_ends,
            self.double_sided,
        )
        .is_none()
        {
            return Err(ConfigError::TooManySegments(self.radial_segment_count));
        }
        if !self.height.is_finite() {
            return Err(ConfigError::NonFiniteHeight(self.height));
        }
        if !self.radius.is_finite() {
            return Err(ConfigError::NonFiniteRadius(self.radius));
        }
        Ok(())
    }

    /// Exact buffer sizes for this configuration
    pub fn buffer_counts(&self) -> BufferCounts {
        buffer_counts(self.radial_segment_count, self.cap_ends, self.double_sided)
    }

    /// Bounds spanning [-r, -r, 0] to [r, r, height]
    pub fn bounding_box(&self) -> Aabb {
        Aabb::new(
            Vec3::new(-self.radius, -self.radius, 0.0),
            Vec3::new(self.radius, self.radius, self.height),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CylinderConfig::default();
        assert_eq!(config.height, DEFAULT_HEIGHT);
        assert_eq!(config.radius, DEFAULT_RADIUS);
        assert_eq!(config.radial_segment_count, DEFAULT_RADIAL_SEGMENTS);
        assert!(config.cap_ends);
        assert!(!config.double_sided);
        assert!(config.smooth_normals);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_segments() {
        let config = CylinderConfig::new(10.0, 1.0, 0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroSegments));
    }

    #[test]
    fn test_validate_rejects_overflowing_segments() {
        let config = CylinderConfig::new(1.0, 1.0, 400_000_000).with_double_sided(true);
        assert_eq!(
            config.validate(),
            Err(ConfigError::TooManySegments(400_000_000))
        );

        let config = CylinderConfig::new(1.0, 1.0, 2_000_000_000);
        assert_eq!(
            config.validate(),
            Err(ConfigError::TooManySegments(2_000_000_000))
        );

        // Same count is fine once the doubling and caps are off
        let config = CylinderConfig::new(1.0, 1.0, 400_000_000).with_caps(false);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_non_finite() {
        let config = CylinderConfig::new(f32::NAN, 1.0, 8);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonFiniteHeight(_))
        ));

        let config = CylinderConfig::new(1.0, f32::INFINITY, 8);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonFiniteRadius(_))
        ));
    }

    #[test]
    fn test_non_positive_height_is_valid_but_empty() {
        let config = CylinderConfig::new(0.0, 1.0, 8);
        assert!(config.validate().is_ok());
        assert!(!config.has_mesh());
        assert!(!CylinderConfig::new(-5.0, 1.0, 8).has_mesh());
    }

    #[test]
    fn test_bounding_box() {
        let aabb = CylinderConfig::new(100.0, 50.0, 8).bounding_box();
        assert_eq!(aabb.min, Vec3::new(-50.0, -50.0, 0.0));
        assert_eq!(aabb.max, Vec3::new(50.0, 50.0, 100.0));
    }

    #[test]
    fn test_deserialize_partial_table() {
        let config: CylinderConfig =
            toml::from_str("height = 20.0\nsegments = 6\ndouble_sided = true\n")
                .expect("Failed to parse config");
        assert_eq!(config.height, 20.0);
        assert_eq!(config.radius, DEFAULT_RADIUS);
        assert_eq!(config.radial_segment_count, 6);
        assert!(config.double_sided);
        assert!(config.cap_ends);
    }

    #[test]
    fn test_deserialize_rejects_unknown_fields() {
        let result: Result<CylinderConfig, _> = toml::from_str("heigth = 20.0\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_methods() {
        let config = CylinderConfig::new(2.0, 1.0, 6)
            .with_caps(false)
            .with_double_sided(true)
            .with_smooth_normals(false);
        assert!(!config.cap_ends);
        assert!(config.double_sided);
        assert!(!config.smooth_normals);
        assert_eq!(config.buffer_counts().vertex_count, 48);
    }
}
