//! Mutable per-session skew state.
//!
//! One `SkewState` lives for a crop session and is passed by `&mut` into each
//! computation. It is not safe for concurrent mutation; callers serialize
//! access the same way they serialize gesture events.

use crate::error::SkewError;
use crate::geometry::{EdgeInsets, Vec2};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkewState {
    /// Last compensating scale. Never below 1.
    pub previous_scale: f64,
    /// Last finite inset.
    pub previous_inset: EdgeInsets,
    /// Last optimal pan position. `None` until the first non-zero skew.
    pub previous_optimal_offset: Option<Vec2>,
}

impl Default for SkewState {
    fn default() -> Self {
        Self {
            previous_scale: 1.0,
            previous_inset: EdgeInsets::ZERO,
            previous_optimal_offset: None,
        }
    }
}

impl SkewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Back to defaults. Called when skew returns to zero, when a preset is
    /// applied, and around a 90 degree rotation.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Check the invariants a restored state must hold.
    ///
    /// The scale must be finite and at least 1, and the inset and optimal
    /// offset finite.
    pub fn validate(&self) -> Result<(), SkewError> {
        if !self.previous_scale.is_finite() || self.previous_scale < 1.0 {
            return Err(SkewError::InvalidState {
                field: "previous_scale",
                reason: "must be finite and >= 1",
            });
        }
        if !self.previous_inset.is_finite() {
            return Err(SkewError::InvalidState {
                field: "previous_inset",
                reason: "must be finite",
            });
        }
        if self.previous_optimal_offset.is_some_and(|offset| !offset.is_finite()) {
            return Err(SkewError::InvalidState {
                field: "previous_optimal_offset",
                reason: "must be finite",
            });
        }
        Ok(())
    }

    /// Record a compensating scale, keeping the `>= 1` invariant.
    pub(crate) fn record_scale(&mut self, scale: f64) {
        self.previous_scale = if scale.is_finite() { scale.max(1.0) } else { 1.0 };
    }
}
