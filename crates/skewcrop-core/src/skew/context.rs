//! Per-pass inputs for the inset and clamp solvers.
//!
//! # Frames
//!
//! - Content space: the scrollable content. `image_frame` is the untransformed
//!   image in content space and the transform is applied about its center.
//! - Viewport space: a pan position (content offset) `o` shows content point
//!   `o + p` at viewport point `p`. Crop corners are given in viewport space.
//! - A *shift* is a pan position relative to the centered offset, the one
//!   that puts the viewport center over the image center.

use crate::error::SkewError;
use crate::geometry::{Rect, Size, Vec2};
use crate::skew::containment::polygon_contains_polygon;
use crate::skew::matrix::Transform3D;
use crate::skew::projection::{corners_in_front_of_camera, project_corners, unproject_displacement};

/// Read-only inputs for one computation pass. Built fresh, never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct SkewInsetContext {
    pub image_frame: Rect,
    pub viewport_size: Size,
    pub content_size: Size,
    /// Crop rectangle corners in viewport space, TL, TR, BR, BL.
    pub crop_corners: [Vec2; 4],
    /// Scaled skew transform currently applied to the image.
    pub transform: Transform3D,
    /// Straighten rotation of the viewport, independent of skew.
    pub rotation_degrees: f64,
}

impl SkewInsetContext {
    pub fn new(
        image_frame: Rect,
        viewport_size: Size,
        content_size: Size,
        crop_corners: [Vec2; 4],
        transform: Transform3D,
        rotation_degrees: f64,
    ) -> Result<Self, SkewError> {
        if !image_frame.is_finite() || !image_frame.size().is_valid() {
            return Err(SkewError::InvalidFrame);
        }
        validate_size("viewport", viewport_size)?;
        validate_size("content", content_size)?;
        if let Some(index) = crop_corners.iter().position(|c| !c.is_finite()) {
            return Err(SkewError::NonFiniteCorner { index });
        }
        Ok(Self {
            image_frame,
            viewport_size,
            content_size,
            crop_corners,
            transform,
            rotation_degrees: if rotation_degrees.is_finite() { rotation_degrees } else { 0.0 },
        })
    }

    /// Same inputs with a different transform.
    pub fn with_transform(&self, transform: Transform3D) -> Self {
        Self {
            transform,
            ..self.clone()
        }
    }

    pub fn image_center(&self) -> Vec2 {
        self.image_frame.center()
    }

    pub fn viewport_center(&self) -> Vec2 {
        self.viewport_size.center()
    }

    /// Pan position that puts the viewport center over the image center.
    pub fn centered_offset(&self) -> Vec2 {
        self.image_center() - self.viewport_center()
    }

    pub fn shift_for_offset(&self, offset: Vec2) -> Vec2 {
        offset - self.centered_offset()
    }

    pub fn offset_for_shift(&self, shift: Vec2) -> Vec2 {
        self.centered_offset() + shift
    }

    /// Crop corners as displacements from the viewport center.
    pub fn crop_displacements(&self) -> [Vec2; 4] {
        let center = self.viewport_center();
        self.crop_corners.map(|c| c - center)
    }

    /// Crop displacements pushed outward along the crop's own edges.
    pub fn expanded_crop_displacements(&self, margin: f64) -> [Vec2; 4] {
        let corners = self.crop_displacements();
        let mut out = corners;
        for i in 0..4 {
            let prev = corners[(i + 3) % 4];
            let next = corners[(i + 1) % 4];
            let outward =
                (corners[i] - prev).normalize_or_zero() + (corners[i] - next).normalize_or_zero();
            out[i] = corners[i] + outward * margin;
        }
        out
    }

    /// Crop displacements from the image center when panned by `shift`.
    pub fn crop_displacements_at_shift(&self, shift: Vec2) -> [Vec2; 4] {
        self.crop_displacements().map(|c| c + shift)
    }

    /// Image corners in content space.
    pub fn image_corners(&self) -> [Vec2; 4] {
        self.image_frame.corners()
    }

    /// Whether every image corner projects in front of the camera.
    pub fn image_in_front_of_camera(&self) -> bool {
        corners_in_front_of_camera(&self.image_corners(), self.image_center(), &self.transform)
    }

    /// Projected image quadrilateral as displacements from the image center.
    pub fn projected_image_quad(&self) -> Option<[Vec2; 4]> {
        project_corners(&self.image_corners(), self.image_center(), &self.transform)
    }

    /// Precise validity of a pan shift: image in front of the camera and the
    /// crop rectangle inside the projected image.
    pub fn is_valid_shift(&self, shift: Vec2, tolerance: f64) -> bool {
        let Some(quad) = self.projected_image_quad() else {
            return false;
        };
        polygon_contains_polygon(&self.crop_displacements_at_shift(shift), &quad, tolerance)
    }

    /// Precise validity of an absolute pan position.
    pub fn is_valid_offset(&self, offset: Vec2, tolerance: f64) -> bool {
        self.is_valid_shift(self.shift_for_offset(offset), tolerance)
    }

    /// Crop corners at `offset` mapped back onto the untransformed image,
    /// in content space.
    pub fn crop_corners_in_image_space(&self, offset: Vec2) -> Option<[Vec2; 4]> {
        let inverse = self.transform.inverse()?;
        let center = self.image_center();
        let displacements = self.crop_displacements_at_shift(self.shift_for_offset(offset));
        let mut out = [Vec2::ZERO; 4];
        for (slot, d) in out.iter_mut().zip(displacements) {
            *slot = center + unproject_displacement(d, &inverse)?;
        }
        Some(out)
    }

    /// Crop width and height measured along its own (possibly rotated) edges.
    pub fn crop_size(&self) -> Size {
        let c = &self.crop_corners;
        Size::new((c[1] - c[0]).length(), (c[3] - c[0]).length())
    }

    /// Crop and image aspect ratios agree within `tolerance` (relative).
    pub fn aspect_matches(&self, tolerance: f64) -> bool {
        let crop = self.crop_size().aspect_ratio();
        let image = self.image_frame.size().aspect_ratio();
        if !crop.is_finite() || !image.is_finite() || image <= 0.0 {
            return false;
        }
        ((crop - image) / image).abs() <= tolerance
    }
}

fn validate_size(what: &'static str, size: Size) -> Result<(), SkewError> {
    if size.is_valid() {
        Ok(())
    } else {
        Err(SkewError::InvalidSize {
            what,
            width: size.width,
            height: size.height,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SkewConfig;
    use crate::skew::transform::{build_skew_transform, SkewAngles};

    fn context(transform: Transform3D) -> SkewInsetContext {
        let viewport = Size::new(400.0, 300.0);
        SkewInsetContext::new(
            Rect::new(0.0, 0.0, 400.0, 300.0),
            viewport,
            Size::new(400.0, 300.0),
            Rect::from_size(viewport).corners(),
            transform,
            0.0,
        )
        .unwrap()
    }

    #[test]
    fn test_rejects_bad_inputs() {
        let corners = Rect::new(0.0, 0.0, 10.0, 10.0).corners();
        let frame = Rect::new(0.0, 0.0, 10.0, 10.0);
        let size = Size::new(10.0, 10.0);

        let err = SkewInsetContext::new(
            frame,
            Size::new(0.0, 10.0),
            size,
            corners,
            Transform3D::IDENTITY,
            0.0,
        );
        assert!(matches!(err, Err(SkewError::InvalidSize { what: "viewport", .. })));

        let err = SkewInsetContext::new(
            Rect::new(0.0, 0.0, -1.0, 5.0),
            size,
            size,
            corners,
            Transform3D::IDENTITY,
            0.0,
        );
        assert_eq!(err.unwrap_err(), SkewError::InvalidFrame);

        let mut bad = corners;
        bad[2].x = f64::NAN;
        let err = SkewInsetContext::new(frame, size, size, bad, Transform3D::IDENTITY, 0.0);
        assert_eq!(err.unwrap_err(), SkewError::NonFiniteCorner { index: 2 });
    }

    #[test]
    fn test_centered_offset() {
        let ctx = SkewInsetContext::new(
            Rect::new(0.0, 0.0, 800.0, 600.0),
            Size::new(400.0, 300.0),
            Size::new(800.0, 600.0),
            Rect::new(0.0, 0.0, 400.0, 300.0).corners(),
            Transform3D::IDENTITY,
            0.0,
        )
        .unwrap();
        assert_eq!(ctx.centered_offset(), Vec2::new(200.0, 150.0));
        assert_eq!(ctx.shift_for_offset(Vec2::new(210.0, 140.0)), Vec2::new(10.0, -10.0));
    }

    #[test]
    fn test_expanded_crop_displacements() {
        let ctx = context(Transform3D::IDENTITY);
        let expanded = ctx.expanded_crop_displacements(2.0);
        assert_eq!(expanded[0], Vec2::new(-202.0, -152.0));
        assert_eq!(expanded[2], Vec2::new(202.0, 152.0));
    }

    #[test]
    fn test_identity_only_centered_is_valid() {
        let ctx = context(Transform3D::IDENTITY);
        assert!(ctx.is_valid_shift(Vec2::ZERO, 1e-3));
        assert!(!ctx.is_valid_shift(Vec2::new(1.0, 0.0), 1e-3));
    }

    #[test]
    fn test_aspect_matches() {
        let ctx = context(Transform3D::IDENTITY);
        assert!(ctx.aspect_matches(0.05));

        let mut square = ctx.clone();
        square.crop_corners = Rect::new(50.0, 0.0, 300.0, 300.0).corners();
        assert!(!square.aspect_matches(0.05));
    }

    #[test]
    fn test_crop_corners_in_image_space_identity() {
        let ctx = context(Transform3D::IDENTITY);
        let corners = ctx.crop_corners_in_image_space(ctx.centered_offset()).unwrap();
        for (a, b) in corners.iter().zip(ctx.image_frame.corners()) {
            assert!((*a - b).length() < 1e-9);
        }
    }

    #[test]
    fn test_crop_corners_in_image_space_lie_on_image() {
        let t = build_skew_transform(SkewAngles::new(15.0, 0.0, 45.0), 1.0, &SkewConfig::default())
            .scaled(1.3);
        let ctx = context(t);
        assert!(ctx.is_valid_shift(Vec2::ZERO, 1e-3));
        let corners = ctx.crop_corners_in_image_space(ctx.centered_offset()).unwrap();
        let frame = ctx.image_frame.expanded(1e-6);
        for c in corners {
            assert!(c.x >= frame.min_x() && c.x <= frame.max_x(), "{:?}", c);
            assert!(c.y >= frame.min_y() && c.y <= frame.max_y(), "{:?}", c);
        }
    }
}
