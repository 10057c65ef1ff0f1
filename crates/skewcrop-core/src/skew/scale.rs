//! Compensating scale: how much to enlarge the skewed image so it still
//! covers the crop rectangle.
//!
//! # Algorithm
//!
//! The image corners are projected about the image center, giving a convex
//! quadrilateral `Q` that contains the origin. Scaling the transform by `s`
//! scales `Q` by `s`, so a crop corner `c` is covered when, for every edge of
//! `Q` with outward normal `n` and support distance `k`,
//! ```text
//! n · c <= s * k   <=>   s >= (n · c) / k
//! ```
//! The minimal scale is the largest of these ratios. The anchor is the image
//! center rather than the current pan position, so the scale never depends on
//! scroll state.

use crate::config::SkewConfig;
use crate::geometry::Vec2;
use crate::skew::containment::convex_edges;
use crate::skew::context::SkewInsetContext;
use crate::skew::matrix::Transform3D;
use crate::skew::projection::project_corners;
use crate::skew::state::SkewState;
use tracing::{debug, warn};

/// Result of one scale solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleSolution {
    /// Raw minimal scale; may be below 1 or non-finite.
    pub minimal: f64,
    /// Scale to apply, with boost and fallback.
    pub scale: f64,
    /// The previous scale was held because `minimal` was unusable.
    pub fell_back: bool,
}

/// Smallest `s` such that `crop` fits inside the projected `image_corners`
/// scaled by `s`.
///
/// Both inputs are displacements from the shared anchor. Returns NaN when the
/// projection is degenerate (a corner behind the camera, or a quad that does
/// not strictly contain the anchor).
pub fn minimal_scale(image_corners: &[Vec2; 4], crop: &[Vec2; 4], transform: &Transform3D) -> f64 {
    let Some(quad) = project_corners(image_corners, Vec2::ZERO, transform) else {
        return f64::NAN;
    };
    let Some(edges) = convex_edges(&quad) else {
        return f64::NAN;
    };
    let mut required = f64::NEG_INFINITY;
    for edge in &edges {
        if edge.offset <= 0.0 {
            return f64::NAN;
        }
        for corner in crop {
            required = required.max(edge.normal.dot(*corner) / edge.offset);
        }
    }
    required
}

/// Scale for the unscaled skew transform in `ctx`.
///
/// # Arguments
/// * `ctx` - Geometry with the unscaled skew transform
/// * `state` - Supplies the scale to hold when the solve is unusable
/// * `boost` - Multiplier from [`edge_to_edge_boost`](crate::skew::policy::edge_to_edge_boost);
///   non-finite or below 1 counts as 1
/// * `config` - Crop margin
///
/// # Returns
/// A non-finite or sub-unity minimal scale holds `max(previous_scale, 1)`
/// with `fell_back` set. Otherwise the minimal scale times `boost`.
///
/// # Example
/// ```ignore
/// let solution = compensating_scale(&ctx, &state, 1.02, &config);
/// let transform = ctx.transform.scaled(solution.scale);
/// ```
pub fn compensating_scale(
    ctx: &SkewInsetContext,
    state: &SkewState,
    boost: f64,
    config: &SkewConfig,
) -> ScaleSolution {
    let center = ctx.image_center();
    let image = ctx.image_corners().map(|c| c - center);
    let crop = ctx.expanded_crop_displacements(config.crop_margin);
    let minimal = minimal_scale(&image, &crop, &ctx.transform);

    if !minimal.is_finite() || minimal < 1.0 {
        let held = state.previous_scale.max(1.0);
        if minimal.is_finite() {
            debug!(minimal, held, "crop already covered, holding previous scale");
        } else {
            warn!(held, "non-finite compensating scale, holding previous scale");
        }
        return ScaleSolution {
            minimal,
            scale: held,
            fell_back: true,
        };
    }

    let boost = if boost.is_finite() { boost.max(1.0) } else { 1.0 };
    let scale = minimal * boost;
    debug!(minimal, boost, scale, "compensating scale");
    ScaleSolution {
        minimal,
        scale,
        fell_back: false,
    }
}
