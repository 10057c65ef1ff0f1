//! Planar geometry primitives shared by the skew engine and the crop box.
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner, x grows right, y grows down
//! - Angles are in degrees unless a name says otherwise
//! - A [`Vec2`] is used both for absolute points and for displacements from an
//!   anchor; the projective code only ever works with displacements
//! - [`Rect::corners`] always returns top-left, top-right, bottom-right,
//!   bottom-left, and every polygon in this crate uses that order

use serde::{Deserialize, Serialize};

/// A 2D vector: a point or a displacement from an anchor.
pub use glam::DVec2 as Vec2;

/// Width and height of a viewport, content area or image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Width divided by height. Non-finite for a zero height.
    pub fn aspect_ratio(self) -> f64 {
        self.width / self.height
    }

    pub fn center(self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn is_valid(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Axis-aligned rectangle (origin + size).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    pub fn min_x(&self) -> f64 {
        self.x
    }

    pub fn min_y(&self) -> f64 {
        self.y
    }

    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    pub fn mid_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    pub fn mid_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.mid_x(), self.mid_y())
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Corners in top-left, top-right, bottom-right, bottom-left order.
    pub fn corners(&self) -> [Vec2; 4] {
        [
            Vec2::new(self.min_x(), self.min_y()),
            Vec2::new(self.max_x(), self.min_y()),
            Vec2::new(self.max_x(), self.max_y()),
            Vec2::new(self.min_x(), self.max_y()),
        ]
    }

    /// Grow the rectangle by `amount` on every side.
    pub fn expanded(&self, amount: f64) -> Rect {
        Rect::new(
            self.x - amount,
            self.y - amount,
            self.width + 2.0 * amount,
            self.height + 2.0 * amount,
        )
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
    }
}

/// Extra scroll range on each side of the standard content scroll range.
///
/// Positive values extend the range, negative values restrict it. Mirrors the
/// content inset of a scrollable viewport.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EdgeInsets {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl EdgeInsets {
    pub const ZERO: EdgeInsets = EdgeInsets {
        top: 0.0,
        left: 0.0,
        bottom: 0.0,
        right: 0.0,
    };

    pub const fn new(top: f64, left: f64, bottom: f64, right: f64) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    pub fn is_finite(&self) -> bool {
        self.top.is_finite()
            && self.left.is_finite()
            && self.bottom.is_finite()
            && self.right.is_finite()
    }

    /// Scroll range allowed by these insets for the given content and viewport.
    ///
    /// The standard range is `[0, content - viewport]` on each axis, extended
    /// by the insets on each side.
    pub fn offset_bounds(&self, content_size: Size, viewport_size: Size) -> OffsetBounds {
        OffsetBounds {
            min: Vec2::new(-self.left, -self.top),
            max: Vec2::new(
                content_size.width - viewport_size.width + self.right,
                content_size.height - viewport_size.height + self.bottom,
            ),
        }
    }
}

/// Inclusive range of valid pan positions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OffsetBounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl OffsetBounds {
    /// A zero-width range that only admits `point`.
    pub fn locked_to(point: Vec2) -> Self {
        Self {
            min: point,
            max: point,
        }
    }

    /// Clamp a pan position into the range.
    ///
    /// Uses `max`/`min` rather than `f64::clamp` so an inverted range (which
    /// can only come from inconsistent inputs) never panics.
    pub fn clamp(&self, point: Vec2) -> Vec2 {
        Vec2::new(
            point.x.max(self.min.x).min(self.max.x),
            point.y.max(self.min.y).min(self.max.y),
        )
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }
}

/// Clamp an angle to `[-max_degrees, max_degrees]`. NaN becomes 0.
pub fn clamp_degrees(degrees: f64, max_degrees: f64) -> f64 {
    if degrees.is_nan() {
        return 0.0;
    }
    let limit = max_degrees.abs();
    degrees.max(-limit).min(limit)
}

/// Ramp that is 0 at `start` and 1 at `end`, clamped outside.
pub(crate) fn ramp(value: f64, start: f64, end: f64) -> f64 {
    if end <= start {
        return if value >= end { 1.0 } else { 0.0 };
    }
    ((value - start) / (end - start)).clamp(0.0, 1.0)
}
