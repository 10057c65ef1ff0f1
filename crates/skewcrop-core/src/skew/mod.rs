//! Perspective-skew geometry engine.
//!
//! Given horizontal and vertical keystone angles, the engine builds a
//! projective transform for the image plane, enlarges it just enough to keep
//! covering the crop rectangle, and works out where the viewport may pan.
//!
//! # Data Flow
//!
//! On every skew-angle change ([`SkewEngine::update_skew`]):
//! 1. Projective transform from the angles and zoom
//! 2. Compensating scale so the projected image covers the crop rectangle
//! 3. Max pan shift in each cardinal direction
//! 4. Insets and blended optimal pan position
//! 5. Pan position to apply, preserving manual panning
//!
//! When a pan gesture ends ([`SkewEngine::end_pan`]) the position is checked
//! precisely and pulled back into the valid region if needed.
//!
//! The engine is pull-based: the caller passes a [`ViewSnapshot`] of the
//! current geometry and applies the returned values itself.

pub mod clamp;
pub mod containment;
pub mod context;
pub mod inset;
pub mod matrix;
pub mod policy;
pub mod projection;
pub mod scale;
pub mod shifts;
pub mod state;
pub mod transform;

pub use clamp::{clamp_pan_position, PanCorrection};
pub use context::SkewInsetContext;
pub use inset::{apply_optimal_offset, compute_insets_and_offset, InsetSolution};
pub use matrix::Transform3D;
pub use policy::{edge_to_edge_boost, SkewPolicyWeights};
pub use scale::{compensating_scale, minimal_scale, ScaleSolution};
pub use shifts::{compute_max_shifts, SkewShifts};
pub use state::SkewState;
pub use transform::{build_skew_transform, SkewAngles};

use crate::config::SkewConfig;
use crate::error::SkewError;
use crate::geometry::{EdgeInsets, OffsetBounds, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Geometry read from the view layer at the moment of a computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewSnapshot {
    /// Untransformed image frame in content space.
    pub image_frame: Rect,
    pub viewport_size: Size,
    pub content_size: Size,
    /// Crop rectangle corners in viewport space, TL, TR, BR, BL.
    pub crop_corners: [Vec2; 4],
    /// Straighten rotation of the viewport, in degrees.
    pub rotation_degrees: f64,
    pub zoom_scale: f64,
    pub min_zoom_scale: f64,
    /// Current pan position.
    pub content_offset: Vec2,
}

impl ViewSnapshot {
    /// Zoom relative to the minimum zoom, never below 1.
    pub fn relative_zoom(&self) -> f64 {
        let ratio = self.zoom_scale / self.min_zoom_scale;
        if ratio.is_finite() {
            ratio.max(1.0)
        } else {
            1.0
        }
    }

    /// Zoomed in past the minimum zoom scale.
    pub fn is_zoomed_in(&self) -> bool {
        self.zoom_scale > self.min_zoom_scale * (1.0 + 1e-6)
    }

    pub fn context(&self, transform: Transform3D) -> Result<SkewInsetContext, SkewError> {
        if !self.zoom_scale.is_finite() || self.zoom_scale <= 0.0 {
            return Err(SkewError::InvalidZoom(self.zoom_scale));
        }
        if !self.min_zoom_scale.is_finite() || self.min_zoom_scale <= 0.0 {
            return Err(SkewError::InvalidZoom(self.min_zoom_scale));
        }
        SkewInsetContext::new(
            self.image_frame,
            self.viewport_size,
            self.content_size,
            self.crop_corners,
            transform,
            self.rotation_degrees,
        )
    }
}

/// Output of one skew-angle change.
#[derive(Debug, Clone, PartialEq)]
pub struct SkewUpdate {
    /// Angles after clamping.
    pub angles: SkewAngles,
    /// Scaled transform to apply to the image plane.
    pub transform: Transform3D,
    pub scale: f64,
    pub shifts: SkewShifts,
    pub insets: EdgeInsets,
    pub bounds: OffsetBounds,
    pub optimal_offset: Vec2,
    /// Pan position to apply, or `None` to leave it alone.
    pub target_offset: Option<Vec2>,
    /// Crop corners mapped back onto the untransformed image at the pan
    /// position the caller ends up with, in content space. `None` when the
    /// transform cannot be inverted.
    pub image_space_crop: Option<[Vec2; 4]>,
}

/// Stateless entry point; session state lives in [`SkewState`].
#[derive(Debug, Clone, Default)]
pub struct SkewEngine {
    config: SkewConfig,
}

impl SkewEngine {
    pub fn new(config: SkewConfig) -> Result<Self, SkewError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SkewConfig {
        &self.config
    }

    /// Clamp raw control values to the configured limit.
    pub fn angles(&self, horizontal: f64, vertical: f64) -> SkewAngles {
        SkewAngles::new(horizontal, vertical, self.config.max_skew_degrees)
    }

    /// Recompute everything for new skew angles.
    ///
    /// Zero skew resets `state` and returns the identity transform with zero
    /// insets, leaving the pan position alone.
    pub fn update_skew(
        &self,
        state: &mut SkewState,
        view: &ViewSnapshot,
        angles: SkewAngles,
    ) -> Result<SkewUpdate, SkewError> {
        let angles = angles.clamped(self.config.max_skew_degrees);
        let base_ctx = view.context(Transform3D::IDENTITY)?;

        if angles.is_zero() {
            state.reset();
            let bounds = EdgeInsets::ZERO.offset_bounds(view.content_size, view.viewport_size);
            return Ok(SkewUpdate {
                angles,
                transform: Transform3D::IDENTITY,
                scale: 1.0,
                shifts: SkewShifts::ZERO,
                insets: EdgeInsets::ZERO,
                bounds,
                optimal_offset: bounds.clamp(base_ctx.centered_offset()),
                target_offset: None,
                image_space_crop: base_ctx.crop_corners_in_image_space(view.content_offset),
            });
        }

        let base = build_skew_transform(angles, view.relative_zoom(), &self.config);
        let base_ctx = base_ctx.with_transform(base);

        let boost = edge_to_edge_boost(
            base_ctx.aspect_matches(self.config.aspect_tolerance),
            base_ctx.rotation_degrees,
            &self.config,
        );
        let scale = compensating_scale(&base_ctx, state, boost, &self.config);
        if !scale.fell_back {
            state.record_scale(scale.scale);
        }

        let transform = base.scaled(scale.scale);
        let ctx = base_ctx.with_transform(transform);
        let solution = compute_insets_and_offset(&ctx, angles, state, &self.config);
        let target_offset = apply_optimal_offset(
            state,
            view.content_offset,
            solution.optimal_offset,
            &solution.bounds,
            view.is_zoomed_in(),
        );

        let image_space_crop =
            ctx.crop_corners_in_image_space(target_offset.unwrap_or(view.content_offset));

        debug!(
            horizontal = angles.horizontal,
            vertical = angles.vertical,
            scale = scale.scale,
            fell_back = scale.fell_back,
            locked = solution.locked,
            "skew updated"
        );

        Ok(SkewUpdate {
            angles,
            transform,
            scale: scale.scale,
            shifts: solution.shifts,
            insets: solution.insets,
            bounds: solution.bounds,
            optimal_offset: solution.optimal_offset,
            target_offset,
            image_space_crop,
        })
    }

    /// Correct the pan position after a drag ends.
    ///
    /// `transform` is the transform currently applied to the image, and the
    /// inset bounds come from the last [`update_skew`](Self::update_skew).
    pub fn end_pan(
        &self,
        state: &SkewState,
        view: &ViewSnapshot,
        transform: Transform3D,
    ) -> Result<PanCorrection, SkewError> {
        let ctx = view.context(transform)?;
        if transform.is_identity() {
            return Ok(PanCorrection::Unchanged(view.content_offset));
        }
        let bounds = state
            .previous_inset
            .offset_bounds(view.content_size, view.viewport_size);
        Ok(clamp_pan_position(&ctx, view.content_offset, &bounds, &self.config))
    }

    /// Session boundary: skew reset, preset applied, or 90 degree rotation.
    pub fn reset(&self, state: &mut SkewState) {
        state.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view() -> ViewSnapshot {
        let size = Size::new(400.0, 300.0);
        ViewSnapshot {
            image_frame: Rect::from_size(size),
            viewport_size: size,
            content_size: size,
            crop_corners: Rect::from_size(size).corners(),
            rotation_degrees: 0.0,
            zoom_scale: 1.0,
            min_zoom_scale: 1.0,
            content_offset: Vec2::ZERO,
        }
    }

    fn engine() -> SkewEngine {
        SkewEngine::new(SkewConfig::default()).unwrap()
    }

    fn assert_valid(update: &SkewUpdate, view: &ViewSnapshot, offset: Vec2) {
        let ctx = view.context(update.transform).unwrap();
        assert!(
            ctx.is_valid_offset(offset, engine().config().containment_tolerance),
            "offset {:?} invalid for {:?}",
            offset,
            update.angles
        );
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = SkewConfig {
            perspective_distance: 0.0,
            ..SkewConfig::default()
        };
        assert!(SkewEngine::new(config).is_err());
    }

    #[test]
    fn test_rejects_invalid_zoom() {
        let mut v = view();
        v.zoom_scale = 0.0;
        let result =
            engine().update_skew(&mut SkewState::new(), &v, SkewAngles::new(5.0, 0.0, 45.0));
        assert_eq!(result.unwrap_err(), SkewError::InvalidZoom(0.0));
    }

    #[test]
    fn test_straighten_only_is_identity() {
        let mut v = view();
        v.rotation_degrees = 10.0;
        let mut state = SkewState::new();
        state.previous_scale = 1.2;
        let update = engine().update_skew(&mut state, &v, SkewAngles::ZERO).unwrap();
        assert!(update.transform.is_identity());
        assert!(update.insets.is_zero());
        assert_eq!(update.scale, 1.0);
        assert_eq!(update.target_offset, None);
        assert!(state.is_default());
    }

    #[test]
    fn test_small_horizontal_skew_scenario() {
        let v = view();
        let mut state = SkewState::new();
        let update = engine().update_skew(&mut state, &v, SkewAngles::new(6.0, 0.0, 45.0)).unwrap();
        assert!(update.scale > 1.0);
        let c = v.context(update.transform).unwrap().centered_offset();
        let expected = c + Vec2::new(update.shifts.right, 0.0);
        assert!((update.optimal_offset - expected).length() < 1e-9);
        // First non-zero skew jumps straight to the optimal offset.
        assert_eq!(update.target_offset, Some(update.optimal_offset));
        assert_eq!(state.previous_optimal_offset, Some(update.optimal_offset));
        assert_valid(&update, &v, update.optimal_offset);
    }

    #[test]
    fn test_large_combined_skew_scenario() {
        let v = view();
        let update = engine()
            .update_skew(&mut SkewState::new(), &v, SkewAngles::new(20.0, 15.0, 45.0))
            .unwrap();
        let c = v.context(update.transform).unwrap().centered_offset();
        let expected = c + update.shifts.centered();
        assert!((update.optimal_offset - expected).length() < 1e-9);
        assert_valid(&update, &v, update.optimal_offset);
    }

    #[test]
    fn test_subsequent_change_preserves_manual_pan() {
        let engine = engine();
        let mut v = view();
        let mut state = SkewState::new();
        let first = engine.update_skew(&mut state, &v, SkewAngles::new(20.0, 0.0, 45.0)).unwrap();

        // User pans 3 units up from the optimal position.
        v.content_offset = first.optimal_offset + Vec2::new(0.0, -3.0);
        let second = engine.update_skew(&mut state, &v, SkewAngles::new(21.0, 0.0, 45.0)).unwrap();
        let delta = second.optimal_offset - first.optimal_offset;
        let expected = second.bounds.clamp(v.content_offset + delta);
        assert_eq!(second.target_offset, Some(expected));
    }

    #[test]
    fn test_zoomed_in_leaves_pan_alone() {
        let engine = engine();
        let mut v = view();
        let mut state = SkewState::new();
        engine.update_skew(&mut state, &v, SkewAngles::new(20.0, 0.0, 45.0)).unwrap();

        v.zoom_scale = 2.0;
        v.content_size = Size::new(800.0, 600.0);
        v.image_frame = Rect::new(0.0, 0.0, 800.0, 600.0);
        v.content_offset = Vec2::new(200.0, 150.0);
        let update = engine.update_skew(&mut state, &v, SkewAngles::new(22.0, 0.0, 45.0)).unwrap();
        assert_eq!(update.target_offset, None);
    }

    #[test]
    fn test_scale_state_recorded() {
        let mut state = SkewState::new();
        let update = engine()
            .update_skew(&mut state, &view(), SkewAngles::new(0.0, -25.0, 45.0))
            .unwrap();
        assert_eq!(state.previous_scale, update.scale);
        assert!(state.previous_scale >= 1.0);
        assert_eq!(state.previous_inset, update.insets);
    }

    #[test]
    fn test_end_pan_corrects_out_of_region_offset() {
        let engine = engine();
        let mut v = view();
        let mut state = SkewState::new();
        let update = engine.update_skew(&mut state, &v, SkewAngles::new(25.0, 20.0, 45.0)).unwrap();

        // Corner of the rectangular range: admitted by the insets, not by the image.
        v.content_offset = Vec2::new(update.bounds.max.x, update.bounds.max.y);
        let correction = engine.end_pan(&state, &v, update.transform).unwrap();
        assert_valid(&update, &v, correction.offset());
    }

    #[test]
    fn test_end_pan_identity_is_unchanged() {
        let mut v = view();
        v.content_offset = Vec2::new(3.0, 4.0);
        let correction = engine().end_pan(&SkewState::new(), &v, Transform3D::IDENTITY).unwrap();
        assert_eq!(correction, PanCorrection::Unchanged(Vec2::new(3.0, 4.0)));
    }

    #[test]
    fn test_applied_scale_never_shrinks_as_skew_grows() {
        let engine = engine();
        let v = view();
        for other in [0.0, 1.0, 2.0, -2.5] {
            let mut state = SkewState::new();
            let mut previous = 1.0;
            for step in 1..=450 {
                let h = step as f64 * 0.1;
                let update = engine
                    .update_skew(&mut state, &v, SkewAngles::new(h, other, 45.0))
                    .unwrap();
                assert!(
                    update.scale >= previous - 1e-9,
                    "v={} h={}: {} -> {}",
                    other,
                    h,
                    previous,
                    update.scale
                );
                previous = update.scale;
            }
        }
    }

    #[test]
    fn test_boost_applies_only_to_matching_aspect() {
        let engine = engine();
        let matched = view();
        let mut narrow = view();
        narrow.crop_corners = Rect::new(100.0, 0.0, 200.0, 300.0).corners();
        let angles = SkewAngles::new(6.0, 0.0, 45.0);

        let a = engine.update_skew(&mut SkewState::new(), &matched, angles).unwrap();
        let ctx = matched.context(build_skew_transform(angles, 1.0, engine.config())).unwrap();
        let minimal = compensating_scale(&ctx, &SkewState::new(), 1.0, engine.config()).minimal;
        assert!((a.scale - minimal * 1.02).abs() < 1e-9);

        let b = engine.update_skew(&mut SkewState::new(), &narrow, angles).unwrap();
        let ctx = narrow.context(build_skew_transform(angles, 1.0, engine.config())).unwrap();
        let minimal = compensating_scale(&ctx, &SkewState::new(), 1.0, engine.config()).minimal;
        assert!((b.scale - minimal).abs() < 1e-9);
    }

    #[test]
    fn test_small_crop_holds_previous_scale() {
        let mut v = view();
        v.crop_corners = Rect::new(150.0, 100.0, 100.0, 100.0).corners();
        let mut state = SkewState::new();
        state.previous_scale = 1.3;
        let update = engine().update_skew(&mut state, &v, SkewAngles::new(5.0, 0.0, 45.0)).unwrap();
        assert_eq!(update.scale, 1.3);
        assert_eq!(state.previous_scale, 1.3);
    }

    #[test]
    fn test_image_space_crop_lies_on_image() {
        let v = view();
        let update = engine()
            .update_skew(&mut SkewState::new(), &v, SkewAngles::new(12.0, -7.0, 45.0))
            .unwrap();
        let corners = update.image_space_crop.expect("skew transform is invertible");
        let frame = v.image_frame.expanded(0.01);
        for corner in corners {
            assert!(
                corner.x >= frame.min_x()
                    && corner.x <= frame.max_x()
                    && corner.y >= frame.min_y()
                    && corner.y <= frame.max_y(),
                "{:?} outside the image",
                corner
            );
        }
    }

    #[test]
    fn test_image_space_crop_without_skew_is_crop() {
        let v = view();
        let update = engine().update_skew(&mut SkewState::new(), &v, SkewAngles::ZERO).unwrap();
        let corners = update.image_space_crop.unwrap();
        for (got, expected) in corners.iter().zip(v.crop_corners) {
            assert!((*got - expected).length() < 1e-9);
        }
    }

    #[test]
    fn test_containment_grid() {
        // Every 5 degrees on both axes: the optimal offset and each
        // per-direction extreme keep the crop inside the projected image.
        let engine = engine();
        let v = view();
        let tol = engine.config().containment_tolerance;
        for h in (-9..=9).map(|i| i as f64 * 5.0) {
            for vdeg in (-9..=9).map(|i| i as f64 * 5.0) {
                let update = engine
                    .update_skew(&mut SkewState::new(), &v, SkewAngles::new(h, vdeg, 45.0))
                    .unwrap();
                let ctx = v.context(update.transform).unwrap();
                assert!(
                    ctx.is_valid_offset(update.optimal_offset, tol),
                    "optimal h={} v={}",
                    h,
                    vdeg
                );
                let c = ctx.centered_offset();
                let s = update.shifts;
                for (name, shift) in [
                    ("top", Vec2::new(0.0, -s.top)),
                    ("left", Vec2::new(-s.left, 0.0)),
                    ("bottom", Vec2::new(0.0, s.bottom)),
                    ("right", Vec2::new(s.right, 0.0)),
                ] {
                    assert!(ctx.is_valid_offset(c + shift, tol), "{} h={} v={}", name, h, vdeg);
                    assert!(
                        update.bounds.contains(c + shift),
                        "{} outside bounds h={} v={}",
                        name,
                        h,
                        vdeg
                    );
                }
            }
        }
    }
}
