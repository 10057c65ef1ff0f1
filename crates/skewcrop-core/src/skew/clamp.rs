//! Post-pan correction.
//!
//! After a drag ends the pan position is clamped to the inset bounds and then
//! checked with the precise per-corner containment test. The inset bounds are
//! only a rectangle around the true valid region, so a clamped position can
//! still show background in a corner.

use crate::config::SkewConfig;
use crate::geometry::{OffsetBounds, Vec2};
use crate::skew::context::SkewInsetContext;
use tracing::{debug, warn};

/// Outcome of [`clamp_pan_position`]. Every variant carries the offset to use.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanCorrection {
    /// Valid as is.
    Unchanged(Vec2),
    /// Moved into the inset bounds and valid there.
    Clamped(Vec2),
    /// Pulled back toward the centered position to the furthest valid point.
    Snapped(Vec2),
    /// The centered position, used when even it fails the precise test.
    Centered(Vec2),
}

impl PanCorrection {
    pub fn offset(&self) -> Vec2 {
        match *self {
            PanCorrection::Unchanged(o)
            | PanCorrection::Clamped(o)
            | PanCorrection::Snapped(o)
            | PanCorrection::Centered(o) => o,
        }
    }

    /// Snaps use a short animated transition.
    pub fn is_animated(&self) -> bool {
        matches!(self, PanCorrection::Snapped(_) | PanCorrection::Centered(_))
    }

    pub fn is_changed(&self) -> bool {
        !matches!(self, PanCorrection::Unchanged(_))
    }
}

/// Furthest valid point on the segment from the centered position to `target`.
///
/// The centered position must be valid; it is returned when nothing further
/// along the segment is.
pub fn furthest_valid_shift(ctx: &SkewInsetContext, target: Vec2, config: &SkewConfig) -> Vec2 {
    let tolerance = config.containment_tolerance;
    if ctx.is_valid_shift(target, tolerance) {
        return target;
    }
    let (mut lo, mut hi) = (0.0, 1.0);
    for _ in 0..config.search_iterations {
        let mid = (lo + hi) / 2.0;
        if ctx.is_valid_shift(target * mid, tolerance) {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    target * lo
}

/// Correct a pan position after a drag ends.
///
/// # Arguments
/// * `ctx` - Geometry with the transform currently applied to the image
/// * `offset` - Pan position the drag ended at
/// * `bounds` - Scroll range from the last inset update
/// * `config` - Containment tolerance and search iterations
///
/// # Returns
/// The position clamped to `bounds`, then pulled back along the line to the
/// centered position if the crop would still leave the image. Falls back to
/// the centered position when even that fails containment.
///
/// # Example
/// ```ignore
/// match clamp_pan_position(&ctx, offset, &bounds, &config) {
///     PanCorrection::Unchanged(_) => {}
///     correction => scroll_to(correction.offset(), correction.is_animated()),
/// }
/// ```
pub fn clamp_pan_position(
    ctx: &SkewInsetContext,
    offset: Vec2,
    bounds: &OffsetBounds,
    config: &SkewConfig,
) -> PanCorrection {
    let tolerance = config.containment_tolerance;
    let clamped = if offset.is_finite() {
        bounds.clamp(offset)
    } else {
        ctx.centered_offset()
    };
    let shift = ctx.shift_for_offset(clamped);

    if ctx.is_valid_shift(shift, tolerance) {
        return if clamped == offset {
            PanCorrection::Unchanged(clamped)
        } else {
            PanCorrection::Clamped(clamped)
        };
    }

    if ctx.is_valid_shift(Vec2::ZERO, tolerance) {
        let snapped = ctx.offset_for_shift(furthest_valid_shift(ctx, shift, config));
        debug!(x = snapped.x, y = snapped.y, "pan position pulled back into valid region");
        return PanCorrection::Snapped(snapped);
    }

    let center = ctx.centered_offset();
    warn!(x = center.x, y = center.y, "centered position fails containment, snapping to center");
    PanCorrection::Centered(center)
}
