//! Locked-aspect updater.
//!
//! Corner handles scale the box about the opposite corner. The factor is the
//! mean of the horizontal and vertical distance ratios, which keeps diagonal
//! drags smooth when the pointer wanders off the diagonal. Edge handles size
//! the dragged dimension from the delta and derive the other from the ratio,
//! centered on the start frame.

use super::CropBoxDrag;
use crate::geometry::{Rect, Vec2};

/// Move the dragged handle by `delta` keeping `width / height == ratio`.
pub fn update_locked(drag: &CropBoxDrag, delta: Vec2, ratio: f64) -> Rect {
    let start = drag.start_frame;
    let handle = drag.handle;
    if !ratio.is_finite() || ratio <= 0.0 {
        return start;
    }

    if handle.is_corner() {
        let anchor = handle.opposite().point_on(&start);
        let dx = if handle.moves_left() { -delta.x } else { delta.x };
        let dy = if handle.moves_top() { -delta.y } else { delta.y };
        let scale = ((start.width + dx) / start.width + (start.height + dy) / start.height) / 2.0;
        let width = start.height * scale * ratio;
        let height = start.height * scale;
        let x = if handle.moves_left() { anchor.x - width } else { anchor.x };
        let y = if handle.moves_top() { anchor.y - height } else { anchor.y };
        return Rect::new(x, y, width, height);
    }

    if handle.moves_horizontally() {
        let width = if handle.moves_left() {
            start.width - delta.x
        } else {
            start.width + delta.x
        };
        let height = width / ratio;
        let x = if handle.moves_left() { start.max_x() - width } else { start.x };
        Rect::new(x, start.mid_y() - height / 2.0, width, height)
    } else {
        let height = if handle.moves_top() {
            start.height - delta.y
        } else {
            start.height + delta.y
        };
        let width = height * ratio;
        let y = if handle.moves_top() { start.max_y() - height } else { start.y };
        Rect::new(start.mid_x() - width / 2.0, y, width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crop_box::CropHandle;

    fn drag(handle: CropHandle) -> CropBoxDrag {
        CropBoxDrag {
            handle,
            start_frame: Rect::new(100.0, 100.0, 200.0, 100.0),
            content_bounds: Rect::new(0.0, 0.0, 800.0, 600.0),
        }
    }

    #[test]
    fn test_corner_scales_about_opposite_corner() {
        let frame = update_locked(&drag(CropHandle::BottomRight), Vec2::new(40.0, 20.0), 2.0);
        // Both axes grow by 20%.
        assert_eq!((frame.x, frame.y), (100.0, 100.0));
        assert!((frame.width - 240.0).abs() < 1e-9);
        assert!((frame.height - 120.0).abs() < 1e-9);

        let frame = update_locked(&drag(CropHandle::TopLeft), Vec2::new(-40.0, -20.0), 2.0);
        assert!((frame.max_x() - 300.0).abs() < 1e-9);
        assert!((frame.max_y() - 200.0).abs() < 1e-9);
        assert!((frame.width - 240.0).abs() < 1e-9);
    }

    #[test]
    fn test_corner_averages_axis_ratios() {
        // Horizontal ratio 1.2, vertical 1.0: scale 1.1.
        let frame = update_locked(&drag(CropHandle::BottomRight), Vec2::new(40.0, 0.0), 2.0);
        assert!((frame.width - 220.0).abs() < 1e-9);
        assert!((frame.height - 110.0).abs() < 1e-9);
    }

    #[test]
    fn test_edge_recomputes_other_dimension() {
        let frame = update_locked(&drag(CropHandle::Left), Vec2::new(-40.0, 15.0), 2.0);
        assert_eq!(frame.max_x(), 300.0);
        assert_eq!(frame.width, 240.0);
        assert_eq!(frame.height, 120.0);
        assert_eq!(frame.mid_y(), 150.0);

        let frame = update_locked(&drag(CropHandle::Bottom), Vec2::new(5.0, -20.0), 2.0);
        assert_eq!(frame.y, 100.0);
        assert_eq!(frame.height, 80.0);
        assert_eq!(frame.width, 160.0);
        assert_eq!(frame.mid_x(), 200.0);
    }

    #[test]
    fn test_invalid_ratio_keeps_start() {
        let d = drag(CropHandle::Right);
        assert_eq!(update_locked(&d, Vec2::new(10.0, 0.0), 0.0), d.start_frame);
    }
}
