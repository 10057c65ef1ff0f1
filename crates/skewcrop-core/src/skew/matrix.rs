//! 4x4 homogeneous transform on top of [`glam::DMat4`].
//!
//! Points are column vectors `[x y z 1]` transformed by `M · p`, so
//! `a.concat(&b)` applies `a` first and then `b`. The perspective term sits in
//! the `w` row of the z column and holds `-1 / d` for a camera at distance `d`.
//! [`Transform3D::to_cols_array`] is laid out the way CSS `matrix3d()` expects.

use glam::{DMat4, DVec3, DVec4};
use serde::{Deserialize, Serialize};

/// Immutable 4x4 projective transform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Transform3D(DMat4);

impl Transform3D {
    pub const IDENTITY: Transform3D = Transform3D(DMat4::IDENTITY);

    pub const fn from_matrix(m: DMat4) -> Self {
        Self(m)
    }

    pub fn matrix(&self) -> DMat4 {
        self.0
    }

    /// Column-major entries, ready for CSS `matrix3d()`.
    pub fn to_cols_array(&self) -> [f64; 16] {
        self.0.to_cols_array()
    }

    pub fn is_identity(&self) -> bool {
        self.0 == DMat4::IDENTITY
    }

    /// Rotation about the x axis by `radians`; positive y tips toward the viewer.
    pub fn rotation_x(radians: f64) -> Self {
        Self(DMat4::from_rotation_x(radians))
    }

    /// Rotation about the y axis by `radians`; positive x tips away from the viewer.
    pub fn rotation_y(radians: f64) -> Self {
        Self(DMat4::from_rotation_y(radians))
    }

    /// Perspective projection for a viewer at `distance` along +z.
    pub fn perspective(distance: f64) -> Self {
        let mut m = DMat4::IDENTITY;
        m.z_axis.w = -1.0 / distance;
        Self(m)
    }

    pub fn scale(sx: f64, sy: f64, sz: f64) -> Self {
        Self(DMat4::from_scale(DVec3::new(sx, sy, sz)))
    }

    /// `self` followed by `other`.
    pub fn concat(&self, other: &Transform3D) -> Transform3D {
        Self(other.0 * self.0)
    }

    /// Scale the projected x and y of this transform uniformly by `s`.
    ///
    /// The homogeneous `w` is untouched, so every projected displacement is
    /// multiplied by exactly `s`.
    pub fn scaled(&self, s: f64) -> Transform3D {
        self.concat(&Self::scale(s, s, 1.0))
    }

    /// Transform the image-plane point `(x, y, 0)`.
    pub fn transform_point(&self, x: f64, y: f64) -> DVec4 {
        self.0 * DVec4::new(x, y, 0.0, 1.0)
    }

    pub fn determinant(&self) -> f64 {
        self.0.determinant()
    }

    /// `None` for a singular or non-finite matrix.
    pub fn inverse(&self) -> Option<Transform3D> {
        let det = self.determinant();
        if !det.is_finite() || det.abs() < 1e-12 {
            return None;
        }
        Some(Self(self.0.inverse()))
    }
}
