//! Engine configuration.
//!
//! Both structs deserialize with `#[serde(default)]`, so a host may send only
//! the fields it wants to override.

use crate::error::SkewError;
use crate::geometry::Rect;
use serde::{Deserialize, Serialize};

/// Tuning for the perspective-skew solvers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkewConfig {
    /// Largest skew magnitude on either axis, in degrees.
    pub max_skew_degrees: f64,
    /// Camera distance at zoom scale 1, in content units.
    pub perspective_distance: f64,
    /// Outward expansion of the crop corners before solving for scale.
    pub crop_margin: f64,
    /// Iterations for every binary search (max shift and post-pan clamp).
    pub search_iterations: u32,
    /// Slack, in content units, allowed outside a polygon edge.
    pub containment_tolerance: f64,
    /// Relative tolerance for treating crop and image aspect ratios as equal.
    pub aspect_tolerance: f64,
    /// Skew magnitude up to which the edge-to-edge policy applies fully.
    pub edge_start_degrees: f64,
    /// Skew magnitude from which the centered policy applies fully.
    pub edge_end_degrees: f64,
    /// Rotation at which edge alignment is fully suppressed.
    pub rotation_dampening_degrees: f64,
    /// Other-axis skew at which edge alignment is fully suppressed.
    pub cross_axis_ramp_degrees: f64,
    /// Extra scale on top of the minimal scale at full edge-to-edge weight.
    pub edge_boost: f64,
}

impl Default for SkewConfig {
    fn default() -> Self {
        Self {
            max_skew_degrees: 45.0,
            perspective_distance: 1000.0,
            crop_margin: 2.0,
            search_iterations: 16,
            containment_tolerance: 1e-3,
            aspect_tolerance: 0.05,
            edge_start_degrees: 8.0,
            edge_end_degrees: 12.0,
            rotation_dampening_degrees: 10.0,
            cross_axis_ramp_degrees: 3.0,
            edge_boost: 0.02,
        }
    }
}

impl SkewConfig {
    /// Check every field is usable.
    ///
    /// Skew is limited to below 90 degrees: at 90 the image plane is viewed
    /// edge-on and the transform is no longer invertible.
    pub fn validate(&self) -> Result<(), SkewError> {
        check(
            "max_skew_degrees",
            self.max_skew_degrees,
            self.max_skew_degrees >= 0.0 && self.max_skew_degrees < 90.0,
            "must be in [0, 90)",
        )?;
        check_positive("perspective_distance", self.perspective_distance)?;
        check_non_negative("crop_margin", self.crop_margin)?;
        check(
            "search_iterations",
            self.search_iterations as f64,
            self.search_iterations > 0,
            "must be at least 1",
        )?;
        check_non_negative("containment_tolerance", self.containment_tolerance)?;
        check_non_negative("aspect_tolerance", self.aspect_tolerance)?;
        check_non_negative("edge_start_degrees", self.edge_start_degrees)?;
        check(
            "edge_end_degrees",
            self.edge_end_degrees,
            self.edge_end_degrees.is_finite() && self.edge_end_degrees >= self.edge_start_degrees,
            "must not be below edge_start_degrees",
        )?;
        check_positive("rotation_dampening_degrees", self.rotation_dampening_degrees)?;
        check_positive("cross_axis_ramp_degrees", self.cross_axis_ramp_degrees)?;
        check_non_negative("edge_boost", self.edge_boost)?;
        Ok(())
    }
}

/// How a crop box keeps its shape while being resized.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum AspectLock {
    /// Every edge moves independently.
    #[default]
    Free,
    /// Width divided by height is held at `ratio`.
    Locked { ratio: f64 },
}

impl AspectLock {
    /// Lock to the current shape of `frame`.
    pub fn from_frame(frame: &Rect) -> Self {
        AspectLock::Locked {
            ratio: frame.width / frame.height,
        }
    }

    pub fn ratio(&self) -> Option<f64> {
        match self {
            AspectLock::Free => None,
            AspectLock::Locked { ratio } => Some(*ratio),
        }
    }
}

/// Limits applied while dragging a crop box handle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CropBoxConfig {
    /// Smallest allowed side length.
    pub min_size: f64,
    /// Smallest allowed width:height (and height:width) in free mode. 0 allows any.
    pub min_aspect_ratio: f64,
    pub aspect_lock: AspectLock,
}

impl Default for CropBoxConfig {
    fn default() -> Self {
        Self {
            min_size: 42.0,
            min_aspect_ratio: 0.0,
            aspect_lock: AspectLock::Free,
        }
    }
}

impl CropBoxConfig {
    pub fn validate(&self) -> Result<(), SkewError> {
        check_non_negative("min_size", self.min_size)?;
        check_non_negative("min_aspect_ratio", self.min_aspect_ratio)?;
        if let AspectLock::Locked { ratio } = self.aspect_lock {
            check_positive("aspect_lock.ratio", ratio)?;
        }
        Ok(())
    }
}

fn check(field: &'static str, value: f64, ok: bool, reason: &'static str) -> Result<(), SkewError> {
    if ok {
        Ok(())
    } else {
        Err(SkewError::InvalidConfig {
            field,
            value,
            reason,
        })
    }
}

fn check_positive(field: &'static str, value: f64) -> Result<(), SkewError> {
    check(field, value, value.is_finite() && value > 0.0, "must be positive")
}

fn check_non_negative(field: &'static str, value: f64) -> Result<(), SkewError> {
    check(field, value, value.is_finite() && value >= 0.0, "must not be negative")
}
