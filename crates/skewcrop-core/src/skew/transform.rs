//! Skew angles and the projective transform they describe.
//!
//! The image plane is tilted about its own center by the horizontal angle
//! (rotation about the vertical axis) and then by the vertical angle (rotation
//! about the horizontal axis), and viewed through a single pinhole camera.
//!
//! For an image-plane point the homogeneous weight is
//! ```text
//! w = 1 + (x * sin(h) * cos(v) + y * sin(v)) / d
//! ```
//! so a positive horizontal angle pushes the right half away from the viewer
//! and a positive vertical angle pushes the bottom half away. The camera
//! distance `d` grows with the zoom scale, which keeps the apparent strength of
//! the perspective independent of how far the user has zoomed in.

use crate::config::SkewConfig;
use crate::geometry::clamp_degrees;
use crate::skew::matrix::Transform3D;
use serde::{Deserialize, Serialize};

/// Horizontal and vertical keystone angles in degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SkewAngles {
    pub horizontal: f64,
    pub vertical: f64,
}

impl SkewAngles {
    pub const ZERO: SkewAngles = SkewAngles {
        horizontal: 0.0,
        vertical: 0.0,
    };

    /// Create angles clamped to `[-max_degrees, max_degrees]` on both axes.
    pub fn new(horizontal: f64, vertical: f64, max_degrees: f64) -> Self {
        Self {
            horizontal: clamp_degrees(horizontal, max_degrees),
            vertical: clamp_degrees(vertical, max_degrees),
        }
    }

    /// Re-clamp already constructed angles.
    pub fn clamped(self, max_degrees: f64) -> Self {
        Self::new(self.horizontal, self.vertical, max_degrees)
    }

    pub fn is_zero(&self) -> bool {
        self.horizontal == 0.0 && self.vertical == 0.0
    }
}

/// Build the projective transform for `angles` at `zoom_scale`.
///
/// # Arguments
/// * `angles` - Keystone angles in degrees, clamped again to `max_skew_degrees`
/// * `zoom_scale` - Zoom relative to the minimum zoom; below 1 or non-finite counts as 1
/// * `config` - Supplies the camera distance at zoom 1
///
/// # Returns
/// Exactly [`Transform3D::IDENTITY`] when both angles are zero, otherwise the
/// tilt followed by the perspective divide.
///
/// # Example
/// ```ignore
/// let t = build_skew_transform(SkewAngles::new(10.0, 0.0, 45.0), 1.0, &SkewConfig::default());
/// assert!(t.transform_point(100.0, 0.0).w > 1.0);
/// ```
pub fn build_skew_transform(
    angles: SkewAngles,
    zoom_scale: f64,
    config: &SkewConfig,
) -> Transform3D {
    let angles = angles.clamped(config.max_skew_degrees);
    if angles.is_zero() {
        return Transform3D::IDENTITY;
    }

    let zoom = if zoom_scale.is_finite() { zoom_scale.max(1.0) } else { 1.0 };
    let distance = config.perspective_distance * zoom;

    Transform3D::rotation_y(angles.horizontal.to_radians())
        .concat(&Transform3D::rotation_x(-angles.vertical.to_radians()))
        .concat(&Transform3D::perspective(distance))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_angles_give_identity() {
        let config = SkewConfig::default();
        for zoom in [1.0, 1.5, 3.0, 10.0] {
            let t = build_skew_transform(SkewAngles::ZERO, zoom, &config);
            assert!(t.is_identity(), "zoom {} should give identity", zoom);
        }
    }

    #[test]
    fn test_angles_are_clamped() {
        let angles = SkewAngles::new(60.0, -70.0, 45.0);
        assert_eq!(angles.horizontal, 45.0);
        assert_eq!(angles.vertical, -45.0);
    }

    #[test]
    fn test_unclamped_angles_are_clamped_when_building() {
        let config = SkewConfig::default();
        let raw = SkewAngles {
            horizontal: 80.0,
            vertical: 0.0,
        };
        let clamped = SkewAngles::new(45.0, 0.0, 45.0);
        assert_eq!(
            build_skew_transform(raw, 1.0, &config),
            build_skew_transform(clamped, 1.0, &config)
        );
    }

    #[test]
    fn test_weight_formula() {
        let config = SkewConfig::default();
        let (h, v) = (20.0f64, 10.0f64);
        let t = build_skew_transform(SkewAngles::new(h, v, 45.0), 2.0, &config);
        let d = config.perspective_distance * 2.0;
        let (x, y) = (120.0, -80.0);
        let lean = x * h.to_radians().sin() * v.to_radians().cos() + y * v.to_radians().sin();
        let expected = 1.0 + lean / d;
        let got = t.transform_point(x, y).w;
        assert!((got - expected).abs() < 1e-12, "w = {}, expected {}", got, expected);
    }

    #[test]
    fn test_positive_horizontal_pushes_right_side_away() {
        let config = SkewConfig::default();
        let t = build_skew_transform(SkewAngles::new(15.0, 0.0, 45.0), 1.0, &config);
        assert!(t.transform_point(200.0, 0.0).w > 1.0);
        assert!(t.transform_point(-200.0, 0.0).w < 1.0);
    }

    #[test]
    fn test_positive_vertical_pushes_bottom_away() {
        let config = SkewConfig::default();
        let t = build_skew_transform(SkewAngles::new(0.0, 15.0, 45.0), 1.0, &config);
        assert!(t.transform_point(0.0, 150.0).w > 1.0);
        assert!(t.transform_point(0.0, -150.0).w < 1.0);
    }

    #[test]
    fn test_invertible_inside_limits() {
        let config = SkewConfig::default();
        for h in [-44.9, -20.0, 0.5, 30.0, 44.9] {
            for v in [-44.9, -5.0, 0.0, 17.0, 44.9] {
                let t = build_skew_transform(SkewAngles::new(h, v, 45.0), 1.0, &config);
                assert!(t.inverse().is_some(), "h={} v={} should be invertible", h, v);
            }
        }
    }

    #[test]
    fn test_center_is_fixed() {
        let config = SkewConfig::default();
        let t = build_skew_transform(SkewAngles::new(25.0, -12.0, 45.0), 1.0, &config);
        let h = t.transform_point(0.0, 0.0);
        assert_eq!((h.x, h.y, h.w), (0.0, 0.0, 1.0));
    }
}
