//! Pan range and optimal pan position for a skewed image.
//!
//! The four max shifts become scroll-range insets, and a target pan position
//! is blended between two policies per axis:
//!
//! - **Edge-to-edge**: shifted fully toward the side whose vanishing point the
//!   skew tilts toward (`right` for positive horizontal skew, `bottom` for
//!   positive vertical skew).
//! - **Centered**: halfway between the opposing limits, so the crop vertices
//!   sit symmetrically inside the projected image.
//!
//! See [`SkewPolicyWeights`] for how the blend is chosen.

use crate::config::SkewConfig;
use crate::geometry::{EdgeInsets, OffsetBounds, Vec2};
use crate::skew::clamp::furthest_valid_shift;
use crate::skew::context::SkewInsetContext;
use crate::skew::policy::SkewPolicyWeights;
use crate::skew::shifts::{compute_max_shifts, SkewShifts};
use crate::skew::state::SkewState;
use crate::skew::transform::SkewAngles;
use tracing::{debug, warn};

/// Everything one inset pass produces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InsetSolution {
    pub shifts: SkewShifts,
    pub insets: EdgeInsets,
    pub bounds: OffsetBounds,
    pub weights: SkewPolicyWeights,
    /// Target pan position, inside `bounds` and precisely valid when possible.
    pub optimal_offset: Vec2,
    /// The centered position failed containment and the range was locked to it.
    pub locked: bool,
}

/// Scroll-range insets that allow exactly `shifts` around the centered offset.
pub fn shifts_to_insets(shifts: &SkewShifts, ctx: &SkewInsetContext) -> EdgeInsets {
    let centered = ctx.centered_offset();
    let max_x = ctx.content_size.width - ctx.viewport_size.width;
    let max_y = ctx.content_size.height - ctx.viewport_size.height;
    EdgeInsets {
        top: shifts.top - centered.y,
        left: shifts.left - centered.x,
        bottom: centered.y + shifts.bottom - max_y,
        right: centered.x + shifts.right - max_x,
    }
}

/// Shift that puts the crop edge flush against the image edge nearest the
/// vanishing point. An unskewed axis stays centered.
fn edge_aligned_shift(shifts: &SkewShifts, angles: SkewAngles) -> Vec2 {
    let centered = shifts.centered();
    let x = if angles.horizontal > 0.0 {
        shifts.right
    } else if angles.horizontal < 0.0 {
        -shifts.left
    } else {
        centered.x
    };
    let y = if angles.vertical > 0.0 {
        shifts.bottom
    } else if angles.vertical < 0.0 {
        -shifts.top
    } else {
        centered.y
    };
    Vec2::new(x, y)
}

/// Blend of the centered and edge-aligned shifts by per-axis weight.
pub fn optimal_shift(shifts: &SkewShifts, angles: SkewAngles, weights: &SkewPolicyWeights) -> Vec2 {
    let centered = shifts.centered();
    let edge = edge_aligned_shift(shifts, angles);
    Vec2::new(
        centered.x + (edge.x - centered.x) * weights.horizontal,
        centered.y + (edge.y - centered.y) * weights.vertical,
    )
}

/// Compute insets and the optimal pan position for `ctx`.
///
/// Records the inset in `state.previous_inset`; a non-finite inset is replaced
/// by the previous one. Does not touch `previous_optimal_offset`, see
/// [`apply_optimal_offset`].
pub fn compute_insets_and_offset(
    ctx: &SkewInsetContext,
    angles: SkewAngles,
    state: &mut SkewState,
    config: &SkewConfig,
) -> InsetSolution {
    let angles = angles.clamped(config.max_skew_degrees);
    let centered = ctx.centered_offset();
    let standard = EdgeInsets::ZERO.offset_bounds(ctx.content_size, ctx.viewport_size);

    if angles.is_zero() {
        state.previous_inset = EdgeInsets::ZERO;
        return InsetSolution {
            shifts: SkewShifts::ZERO,
            insets: EdgeInsets::ZERO,
            bounds: standard,
            weights: SkewPolicyWeights::CENTERED,
            optimal_offset: standard.clamp(centered),
            locked: false,
        };
    }

    let Some(shifts) = compute_max_shifts(ctx, config) else {
        warn!(
            horizontal = angles.horizontal,
            vertical = angles.vertical,
            "centered position fails containment, locking pan range"
        );
        let insets = shifts_to_insets(&SkewShifts::ZERO, ctx);
        state.previous_inset = insets;
        return InsetSolution {
            shifts: SkewShifts::ZERO,
            insets,
            bounds: OffsetBounds::locked_to(centered),
            weights: SkewPolicyWeights::CENTERED,
            optimal_offset: centered,
            locked: true,
        };
    };

    let mut insets = shifts_to_insets(&shifts, ctx);
    if !insets.is_finite() {
        warn!(?insets, "non-finite inset, keeping previous");
        insets = state.previous_inset;
    }
    state.previous_inset = insets;
    let bounds = insets.offset_bounds(ctx.content_size, ctx.viewport_size);

    let weights = SkewPolicyWeights::compute(
        angles,
        ctx.rotation_degrees,
        ctx.aspect_matches(config.aspect_tolerance),
        config,
    );
    let target = optimal_shift(&shifts, angles, &weights);
    // The shifts only bound a rectangle; a blended point off the axes can
    // still fall outside the valid region.
    let shift = furthest_valid_shift(ctx, target, config);
    let optimal_offset = bounds.clamp(ctx.offset_for_shift(shift));

    debug!(
        top = shifts.top,
        left = shifts.left,
        bottom = shifts.bottom,
        right = shifts.right,
        weight_x = weights.horizontal,
        weight_y = weights.vertical,
        "skew insets"
    );

    InsetSolution {
        shifts,
        insets,
        bounds,
        weights,
        optimal_offset,
        locked: false,
    }
}

/// Decide the pan position after a skew change.
///
/// The first non-zero skew of a session jumps to `optimal`. Later changes move
/// the current position by the change in optimal offset, preserving any manual
/// panning, unless the view is zoomed in past its minimum, in which case the
/// position is left alone. Returns `None` when the position should not change.
pub fn apply_optimal_offset(
    state: &mut SkewState,
    current_offset: Vec2,
    optimal: Vec2,
    bounds: &OffsetBounds,
    zoomed_in: bool,
) -> Option<Vec2> {
    let target = match state.previous_optimal_offset {
        None => Some(optimal),
        Some(_) if zoomed_in => None,
        Some(previous) => Some(bounds.clamp(current_offset + (optimal - previous))),
    };
    state.previous_optimal_offset = Some(optimal);
    target
}
