//! Crop-box resizing by edge and corner handles.
//!
//! A drag starts with a [`CropBoxDrag`] snapshot (the tapped handle, the
//! frame at drag start and the content bounds). Every drag update carries the
//! cumulative delta since the start and produces a new frame in two steps:
//!
//! 1. [`update_free`] or [`update_locked`] moves the dragged edges
//! 2. [`BoxClamper`] enforces min and max size and keeps the box in bounds
//!
//! Deltas are cumulative, so a frame never accumulates rounding from earlier
//! updates of the same drag.

mod clamp;
mod free;
mod locked;

pub use clamp::BoxClamper;
pub use free::update_free;
pub use locked::update_locked;

use crate::config::{AspectLock, CropBoxConfig};
use crate::error::SkewError;
use crate::geometry::{Rect, Vec2};
use serde::{Deserialize, Serialize};

/// One of the eight resize handles on a crop box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CropHandle {
    TopLeft,
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
}

impl CropHandle {
    pub const ALL: [CropHandle; 8] = [
        CropHandle::TopLeft,
        CropHandle::Top,
        CropHandle::TopRight,
        CropHandle::Right,
        CropHandle::BottomRight,
        CropHandle::Bottom,
        CropHandle::BottomLeft,
        CropHandle::Left,
    ];

    pub fn moves_left(self) -> bool {
        matches!(self, CropHandle::TopLeft | CropHandle::Left | CropHandle::BottomLeft)
    }

    pub fn moves_right(self) -> bool {
        matches!(self, CropHandle::TopRight | CropHandle::Right | CropHandle::BottomRight)
    }

    pub fn moves_top(self) -> bool {
        matches!(self, CropHandle::TopLeft | CropHandle::Top | CropHandle::TopRight)
    }

    pub fn moves_bottom(self) -> bool {
        matches!(self, CropHandle::BottomLeft | CropHandle::Bottom | CropHandle::BottomRight)
    }

    pub fn moves_horizontally(self) -> bool {
        self.moves_left() || self.moves_right()
    }

    pub fn moves_vertically(self) -> bool {
        self.moves_top() || self.moves_bottom()
    }

    pub fn is_corner(self) -> bool {
        self.moves_horizontally() && self.moves_vertically()
    }

    /// Handle diagonally or directly across the box.
    pub fn opposite(self) -> CropHandle {
        match self {
            CropHandle::TopLeft => CropHandle::BottomRight,
            CropHandle::Top => CropHandle::Bottom,
            CropHandle::TopRight => CropHandle::BottomLeft,
            CropHandle::Right => CropHandle::Left,
            CropHandle::BottomRight => CropHandle::TopLeft,
            CropHandle::Bottom => CropHandle::Top,
            CropHandle::BottomLeft => CropHandle::TopRight,
            CropHandle::Left => CropHandle::Right,
        }
    }

    /// Position of this handle on `frame`.
    pub fn point_on(self, frame: &Rect) -> Vec2 {
        let x = if self.moves_left() {
            frame.min_x()
        } else if self.moves_right() {
            frame.max_x()
        } else {
            frame.mid_x()
        };
        let y = if self.moves_top() {
            frame.min_y()
        } else if self.moves_bottom() {
            frame.max_y()
        } else {
            frame.mid_y()
        };
        Vec2::new(x, y)
    }
}

/// Snapshot taken when a handle drag begins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropBoxDrag {
    pub handle: CropHandle,
    pub start_frame: Rect,
    pub content_bounds: Rect,
}

impl CropBoxDrag {
    pub fn new(
        handle: CropHandle,
        start_frame: Rect,
        content_bounds: Rect,
    ) -> Result<Self, SkewError> {
        if !start_frame.is_finite() || start_frame.width <= 0.0 || start_frame.height <= 0.0 {
            return Err(SkewError::InvalidSize {
                what: "crop box",
                width: start_frame.width,
                height: start_frame.height,
            });
        }
        if !content_bounds.is_finite()
            || content_bounds.width <= 0.0
            || content_bounds.height <= 0.0
        {
            return Err(SkewError::InvalidSize {
                what: "content bounds",
                width: content_bounds.width,
                height: content_bounds.height,
            });
        }
        Ok(Self {
            handle,
            start_frame,
            content_bounds,
        })
    }

    /// Frame for a cumulative drag `delta`.
    ///
    /// `current` is the frame shown for the previous update; the free-aspect
    /// guard falls back to it for a rejected edge.
    pub fn update(&self, delta: Vec2, current: &Rect, config: &CropBoxConfig) -> Rect {
        let delta = if delta.is_finite() { delta } else { Vec2::ZERO };
        let candidate = match config.aspect_lock {
            AspectLock::Free => update_free(self, delta, current, config.min_aspect_ratio),
            AspectLock::Locked { ratio } => update_locked(self, delta, ratio),
        };
        BoxClamper::new(config, self.content_bounds).clamp(&candidate, self.handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_edges() {
        assert!(CropHandle::TopLeft.moves_left() && CropHandle::TopLeft.moves_top());
        assert!(!CropHandle::Top.moves_horizontally());
        assert!(!CropHandle::Right.moves_vertically());
        let corners: Vec<_> = CropHandle::ALL.iter().filter(|h| h.is_corner()).collect();
        assert_eq!(corners.len(), 4);
    }

    #[test]
    fn test_opposite_is_involution() {
        for handle in CropHandle::ALL {
            assert_eq!(handle.opposite().opposite(), handle);
            assert_ne!(handle.opposite(), handle);
            assert_eq!(handle.opposite().is_corner(), handle.is_corner());
        }
    }

    #[test]
    fn test_point_on() {
        let frame = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(CropHandle::TopLeft.point_on(&frame), Vec2::new(10.0, 20.0));
        assert_eq!(CropHandle::Right.point_on(&frame), Vec2::new(110.0, 45.0));
        assert_eq!(CropHandle::Bottom.point_on(&frame), Vec2::new(60.0, 70.0));
    }

    #[test]
    fn test_new_rejects_empty_frame() {
        let content = Rect::new(0.0, 0.0, 400.0, 300.0);
        let empty = Rect::new(0.0, 0.0, 0.0, 10.0);
        assert!(CropBoxDrag::new(CropHandle::Left, empty, content).is_err());
        let frame = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(CropBoxDrag::new(CropHandle::Left, frame, Rect::default()).is_err());
    }

    #[test]
    fn test_free_drag_end_to_end() {
        let content = Rect::new(0.0, 0.0, 400.0, 300.0);
        let start = Rect::new(100.0, 100.0, 100.0, 100.0);
        let drag = CropBoxDrag::new(CropHandle::BottomRight, start, content).unwrap();
        let frame = drag.update(Vec2::new(30.0, -20.0), &start, &CropBoxConfig::default());
        assert_eq!(frame, Rect::new(100.0, 100.0, 130.0, 80.0));
    }

    #[test]
    fn test_non_finite_delta_is_ignored() {
        let content = Rect::new(0.0, 0.0, 400.0, 300.0);
        let start = Rect::new(100.0, 100.0, 100.0, 100.0);
        let drag = CropBoxDrag::new(CropHandle::Left, start, content).unwrap();
        let frame = drag.update(Vec2::new(f64::NAN, 0.0), &start, &CropBoxConfig::default());
        assert_eq!(frame, start);
    }

    #[test]
    fn test_locked_drag_end_to_end() {
        let content = Rect::new(0.0, 0.0, 400.0, 300.0);
        let start = Rect::new(100.0, 100.0, 160.0, 90.0);
        let config = CropBoxConfig {
            aspect_lock: AspectLock::from_frame(&start),
            ..CropBoxConfig::default()
        };
        let drag = CropBoxDrag::new(CropHandle::Right, start, content).unwrap();
        let frame = drag.update(Vec2::new(32.0, 0.0), &start, &config);
        assert!((frame.width / frame.height - 16.0 / 9.0).abs() < 1e-9);
        assert_eq!(frame.x, 100.0);
        assert!((frame.width - 192.0).abs() < 1e-9);
        assert!((frame.mid_y() - start.mid_y()).abs() < 1e-9);
    }
}
