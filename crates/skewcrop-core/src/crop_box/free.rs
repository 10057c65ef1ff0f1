//! Free-aspect updater: every dragged edge follows the delta on its own axis.

use super::CropBoxDrag;
use crate::geometry::{Rect, Vec2};
use tracing::trace;

/// Move the dragged edges by `delta`.
///
/// With `min_aspect_ratio > 0`, a frame thinner than that ratio in either
/// direction keeps the offending axis from `current`.
pub fn update_free(drag: &CropBoxDrag, delta: Vec2, current: &Rect, min_aspect_ratio: f64) -> Rect {
    let start = drag.start_frame;
    let handle = drag.handle;
    let mut frame = start;

    if handle.moves_left() {
        frame.x = start.x + delta.x;
        frame.width = start.width - delta.x;
    } else if handle.moves_right() {
        frame.width = start.width + delta.x;
    }
    if handle.moves_top() {
        frame.y = start.y + delta.y;
        frame.height = start.height - delta.y;
    } else if handle.moves_bottom() {
        frame.height = start.height + delta.y;
    }

    if min_aspect_ratio <= 0.0 || frame.width <= 0.0 || frame.height <= 0.0 {
        return frame;
    }

    if frame.width / frame.height < min_aspect_ratio {
        trace!(width = frame.width, height = frame.height, "box too narrow, keeping previous");
        if handle.moves_horizontally() {
            frame.x = current.x;
            frame.width = current.width;
        } else {
            frame.y = current.y;
            frame.height = current.height;
        }
    } else if frame.height / frame.width < min_aspect_ratio {
        trace!(width = frame.width, height = frame.height, "box too flat, keeping previous");
        if handle.moves_vertically() {
            frame.y = current.y;
            frame.height = current.height;
        } else {
            frame.x = current.x;
            frame.width = current.width;
        }
    }
    frame
}
