//! Largest valid pan displacement in each cardinal direction.
//!
//! The valid pan region is approximated by its four extents along the axes.
//! Positions that the resulting rectangle wrongly admits are corrected by the
//! post-pan clamp.

use crate::config::SkewConfig;
use crate::geometry::Vec2;
use crate::skew::context::SkewInsetContext;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Maximum valid displacement from the centered position, per direction.
/// All values are non-negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SkewShifts {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl SkewShifts {
    pub const ZERO: SkewShifts = SkewShifts {
        top: 0.0,
        left: 0.0,
        bottom: 0.0,
        right: 0.0,
    };

    pub fn is_finite(&self) -> bool {
        self.top.is_finite()
            && self.left.is_finite()
            && self.bottom.is_finite()
            && self.right.is_finite()
    }

    /// Midpoint of the horizontal and vertical ranges, as a shift.
    pub fn centered(&self) -> Vec2 {
        Vec2::new((self.right - self.left) / 2.0, (self.bottom - self.top) / 2.0)
    }
}

/// A cardinal pan direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftDirection {
    Up,
    Left,
    Down,
    Right,
}

impl ShiftDirection {
    pub const ALL: [ShiftDirection; 4] = [
        ShiftDirection::Up,
        ShiftDirection::Left,
        ShiftDirection::Down,
        ShiftDirection::Right,
    ];

    pub fn unit(self) -> Vec2 {
        match self {
            ShiftDirection::Up => Vec2::new(0.0, -1.0),
            ShiftDirection::Left => Vec2::new(-1.0, 0.0),
            ShiftDirection::Down => Vec2::new(0.0, 1.0),
            ShiftDirection::Right => Vec2::new(1.0, 0.0),
        }
    }
}

/// Binary-search the largest `d` in `[0, limit]` with `d · direction` valid.
///
/// Assumes the centered position itself is valid.
pub fn max_shift(ctx: &SkewInsetContext, direction: ShiftDirection, config: &SkewConfig) -> f64 {
    let unit = direction.unit();
    let limit = match direction {
        ShiftDirection::Left | ShiftDirection::Right => ctx.image_frame.width,
        ShiftDirection::Up | ShiftDirection::Down => ctx.image_frame.height,
    };
    let valid = |d: f64| ctx.is_valid_shift(unit * d, config.containment_tolerance);

    if valid(limit) {
        return limit;
    }
    let (mut lo, mut hi) = (0.0, limit);
    for _ in 0..config.search_iterations {
        let mid = (lo + hi) / 2.0;
        if valid(mid) {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    trace!(?direction, shift = lo, bracket = hi - lo, "max shift converged");
    lo
}

/// Max shifts in all four directions.
///
/// # Arguments
/// * `ctx` - Geometry with the scaled skew transform applied
/// * `config` - Containment tolerance and bisection iteration count
///
/// # Returns
/// Distances from the centered position toward top, left, bottom and right,
/// or `None` when the centered position is itself invalid or the image is
/// partly behind the camera.
///
/// # Example
/// ```ignore
/// let shifts = compute_max_shifts(&ctx, &config).unwrap_or(SkewShifts::ZERO);
/// let insets = shifts_to_insets(&shifts, &ctx);
/// ```
pub fn compute_max_shifts(ctx: &SkewInsetContext, config: &SkewConfig) -> Option<SkewShifts> {
    if !ctx.image_in_front_of_camera()
        || !ctx.is_valid_shift(Vec2::ZERO, config.containment_tolerance)
    {
        return None;
    }
    Some(SkewShifts {
        top: max_shift(ctx, ShiftDirection::Up, config),
        left: max_shift(ctx, ShiftDirection::Left, config),
        bottom: max_shift(ctx, ShiftDirection::Down, config),
        right: max_shift(ctx, ShiftDirection::Right, config),
    })
}
