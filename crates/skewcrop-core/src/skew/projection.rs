//! Projection of image-plane displacements through a skew transform.
//!
//! Every point is handled as a displacement from an anchor (the transform's
//! center), so the math does not depend on which rectangle's origin is zero.

use crate::geometry::Vec2;
use crate::skew::matrix::Transform3D;

/// A projected displacement and the homogeneous weight it was divided by.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    pub point: Vec2,
    pub w: f64,
}

impl Projected {
    /// The source point lies in front of the camera plane.
    pub fn is_in_front(&self) -> bool {
        self.w > 0.0
    }
}

/// Project `displacement` through `transform` and divide by `w`.
///
/// When `w <= 0` the returned point is meaningless (possibly infinite); check
/// [`Projected::is_in_front`] before using it.
pub fn project_displacement(displacement: Vec2, transform: &Transform3D) -> Projected {
    let h = transform.transform_point(displacement.x, displacement.y);
    Projected {
        point: Vec2::new(h.x / h.w, h.y / h.w),
        w: h.w,
    }
}

/// Whether every corner, taken relative to `anchor`, projects in front of the camera.
pub fn corners_in_front_of_camera(
    corners: &[Vec2; 4],
    anchor: Vec2,
    transform: &Transform3D,
) -> bool {
    corners.iter().all(|corner| {
        let w = transform.transform_point(corner.x - anchor.x, corner.y - anchor.y).w;
        w.is_finite() && w > 0.0
    })
}

/// Project corners about `anchor`, returning displacements from the anchor.
///
/// `None` if any corner is behind the camera, which the containment tests
/// treat as a failure rather than risking a flipped polygon.
pub fn project_corners(
    corners: &[Vec2; 4],
    anchor: Vec2,
    transform: &Transform3D,
) -> Option<[Vec2; 4]> {
    let mut out = [Vec2::ZERO; 4];
    for (slot, corner) in out.iter_mut().zip(corners) {
        let projected = project_displacement(*corner - anchor, transform);
        if !projected.is_in_front() || !projected.point.is_finite() {
            return None;
        }
        *slot = projected.point;
    }
    Some(out)
}

/// Map a projected displacement back onto the image plane.
///
/// Intersects the viewing ray through `projected` with the `z = 0` plane using
/// the inverse transform. `None` if the ray misses the plane.
pub fn unproject_displacement(projected: Vec2, inverse: &Transform3D) -> Option<Vec2> {
    // Screen point (X, Y) is any (X*w, Y*w, Z, w); pick Z so the source z is 0.
    // Source = inv · [X, Y, Z, 1] is linear in Z along the inverse's z column.
    let m = inverse.matrix();
    let base = m.x_axis * projected.x + m.y_axis * projected.y + m.w_axis;
    let dz = m.z_axis.z;
    if dz.abs() < 1e-12 {
        return None;
    }
    let source = base + m.z_axis * (-base.z / dz);
    if source.w.abs() < 1e-12 || !source.w.is_finite() {
        return None;
    }
    Some(Vec2::new(source.x / source.w, source.y / source.w))
}
