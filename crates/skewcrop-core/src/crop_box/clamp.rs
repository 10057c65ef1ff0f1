//! Size and bounds limits applied after every crop-box update.

use super::CropHandle;
use crate::config::CropBoxConfig;
use crate::geometry::{Rect, Size};
use tracing::trace;

/// Which part of an axis stays put while the box is resized.
#[derive(Debug, Clone, Copy)]
enum Pin {
    /// Low edge fixed at the value (high edge dragged).
    Low(f64),
    /// High edge fixed at the value (low edge dragged).
    High(f64),
    /// Axis not dragged, keep its midpoint.
    Center(f64),
}

impl Pin {
    fn for_axis(moves_low: bool, moves_high: bool, low: f64, high: f64) -> Pin {
        if moves_low {
            Pin::High(high)
        } else if moves_high {
            Pin::Low(low)
        } else {
            Pin::Center((low + high) / 2.0)
        }
    }

    fn available(self, lo: f64, hi: f64) -> f64 {
        let room = match self {
            Pin::Low(a) => hi - a,
            Pin::High(a) => a - lo,
            Pin::Center(_) => hi - lo,
        };
        room.max(0.0)
    }

    fn origin(self, len: f64, lo: f64, hi: f64) -> f64 {
        let origin = match self {
            Pin::Low(a) => a,
            Pin::High(a) => a - len,
            Pin::Center(m) => m - len / 2.0,
        };
        origin.min(hi - len).max(lo)
    }
}

/// Enforces min size, max size and content bounds on a crop box.
///
/// Min size wins over bounds when the content is smaller than the minimum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxClamper {
    min: Size,
    bounds: Rect,
    ratio: Option<f64>,
}

impl BoxClamper {
    /// With a locked ratio the shorter side gets `min_size` and the longer
    /// side follows from the ratio.
    pub fn new(config: &CropBoxConfig, bounds: Rect) -> Self {
        let ratio = config
            .aspect_lock
            .ratio()
            .filter(|r| r.is_finite() && *r > 0.0);
        let min = match ratio {
            Some(r) if r >= 1.0 => Size::new(config.min_size * r, config.min_size),
            Some(r) => Size::new(config.min_size, config.min_size / r),
            None => Size::new(config.min_size, config.min_size),
        };
        Self { min, bounds, ratio }
    }

    pub fn min_size(&self) -> Size {
        self.min
    }

    /// Clamp `frame`, produced by dragging `handle`.
    ///
    /// The edge opposite a dragged edge stays pinned, so shrinking past the
    /// minimum stops the dragged edge rather than moving the box.
    pub fn clamp(&self, frame: &Rect, handle: CropHandle) -> Rect {
        let b = self.bounds;
        let frame = if frame.is_finite() {
            *frame
        } else {
            Rect::new(
                b.mid_x() - self.min.width / 2.0,
                b.mid_y() - self.min.height / 2.0,
                self.min.width,
                self.min.height,
            )
        };

        let pin_x = Pin::for_axis(
            handle.moves_left(),
            handle.moves_right(),
            frame.min_x(),
            frame.max_x(),
        );
        let pin_y = Pin::for_axis(
            handle.moves_top(),
            handle.moves_bottom(),
            frame.min_y(),
            frame.max_y(),
        );

        let mut width = frame
            .width
            .min(pin_x.available(b.min_x(), b.max_x()))
            .max(self.min.width);
        let mut height = frame
            .height
            .min(pin_y.available(b.min_y(), b.max_y()))
            .max(self.min.height);

        if let Some(r) = self.ratio {
            if width / height > r {
                width = height * r;
            } else {
                height = width / r;
            }
        }

        if width != frame.width || height != frame.height {
            trace!(
                from_width = frame.width,
                from_height = frame.height,
                width,
                height,
                "crop box size clamped"
            );
        }

        Rect::new(
            pin_x.origin(width, b.min_x(), b.max_x()),
            pin_y.origin(height, b.min_y(), b.max_y()),
            width,
            height,
        )
    }
}
