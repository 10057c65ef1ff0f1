//! Blend between the edge-to-edge and centered pan policies.
//!
//! For a small single-axis skew the crop box sits flush against the image
//! edge nearest the vanishing point. Past a threshold, or once both axes are
//! skewed, it sits centered between the opposing limits. A weight of 1 means
//! fully edge-to-edge, 0 means fully centered.

use crate::config::SkewConfig;
use crate::geometry::ramp;
use crate::skew::transform::SkewAngles;

/// Edge-to-edge weight for each pan axis.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SkewPolicyWeights {
    /// Weight for the x axis, driven by horizontal skew.
    pub horizontal: f64,
    /// Weight for the y axis, driven by vertical skew.
    pub vertical: f64,
}

impl SkewPolicyWeights {
    pub const CENTERED: SkewPolicyWeights = SkewPolicyWeights {
        horizontal: 0.0,
        vertical: 0.0,
    };

    pub fn compute(
        angles: SkewAngles,
        rotation_degrees: f64,
        aspect_matches: bool,
        config: &SkewConfig,
    ) -> Self {
        if !aspect_matches {
            return Self::CENTERED;
        }
        let rotation = rotation_factor(rotation_degrees, config);
        Self {
            horizontal: axis_weight(angles.horizontal, angles.vertical, config) * rotation,
            vertical: axis_weight(angles.vertical, angles.horizontal, config) * rotation,
        }
    }
}

fn axis_weight(degrees: f64, other_degrees: f64, config: &SkewConfig) -> f64 {
    if degrees == 0.0 {
        return 0.0;
    }
    let blend = 1.0 - ramp(degrees.abs(), config.edge_start_degrees, config.edge_end_degrees);
    let cross = 1.0 - ramp(other_degrees.abs(), 0.0, config.cross_axis_ramp_degrees);
    blend * cross
}

/// 1 with no straightening rotation, fading to 0 at `rotation_dampening_degrees`.
fn rotation_factor(rotation_degrees: f64, config: &SkewConfig) -> f64 {
    1.0 - ramp(rotation_degrees.abs(), 0.0, config.rotation_dampening_degrees)
}

/// Multiplicative boost on top of the minimal compensating scale.
///
/// Gives the edge-aligned position a little room so it does not sit exactly on
/// the boundary of the valid pan region. Depends on the aspect match and the
/// rotation only, never on the skew angles: the applied scale then rises with
/// the skew wherever the minimal scale does, even while the weights fade.
pub fn edge_to_edge_boost(aspect_matches: bool, rotation_degrees: f64, config: &SkewConfig) -> f64 {
    if !aspect_matches {
        return 1.0;
    }
    1.0 + config.edge_boost * rotation_factor(rotation_degrees, config)
}
