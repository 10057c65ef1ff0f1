//! Conversions between flat JavaScript number arrays and core geometry.
//!
//! Rectangles cross the boundary as `[x, y, width, height]`, points as
//! `[x, y]` and crop corners as eight numbers (TL, TR, BR, BL).

use skewcrop_core::{CropHandle, Rect, Vec2};
use std::fmt::Display;
use wasm_bindgen::prelude::*;

pub(crate) fn rect_from_slice(values: &[f64]) -> Option<Rect> {
    match *values {
        [x, y, width, height] => Some(Rect::new(x, y, width, height)),
        _ => None,
    }
}

pub(crate) fn rect_to_vec(rect: &Rect) -> Vec<f64> {
    vec![rect.x, rect.y, rect.width, rect.height]
}

pub(crate) fn point_to_vec(point: Vec2) -> Vec<f64> {
    vec![point.x, point.y]
}

pub(crate) fn corners_from_slice(values: &[f64]) -> Option<[Vec2; 4]> {
    if values.len() != 8 {
        return None;
    }
    let point = |i: usize| Vec2::new(values[2 * i], values[2 * i + 1]);
    Some([point(0), point(1), point(2), point(3)])
}

pub(crate) fn corners_to_vec(corners: &[Vec2; 4]) -> Vec<f64> {
    corners.iter().flat_map(|c| [c.x, c.y]).collect()
}

/// Parse a handle name such as `"top_left"` or `"right"`.
pub(crate) fn parse_handle(name: &str) -> Option<CropHandle> {
    let handle = match name {
        "top_left" => CropHandle::TopLeft,
        "top" => CropHandle::Top,
        "top_right" => CropHandle::TopRight,
        "right" => CropHandle::Right,
        "bottom_right" => CropHandle::BottomRight,
        "bottom" => CropHandle::Bottom,
        "bottom_left" => CropHandle::BottomLeft,
        "left" => CropHandle::Left,
        _ => return None,
    };
    Some(handle)
}

pub(crate) fn to_js_error(err: impl Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_round_trip() {
        let rect = rect_from_slice(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(rect, Rect::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(rect_to_vec(&rect), vec![1.0, 2.0, 3.0, 4.0]);
        assert!(rect_from_slice(&[1.0, 2.0, 3.0]).is_none());
    }

    #[test]
    fn test_corners_from_slice() {
        let corners = corners_from_slice(&[0.0, 0.0, 10.0, 0.0, 10.0, 5.0, 0.0, 5.0]).unwrap();
        assert_eq!(corners[2], Vec2::new(10.0, 5.0));
        assert!(corners_from_slice(&[0.0; 6]).is_none());
        assert_eq!(corners_to_vec(&corners), vec![0.0, 0.0, 10.0, 0.0, 10.0, 5.0, 0.0, 5.0]);
    }

    #[test]
    fn test_parse_handle() {
        assert_eq!(parse_handle("bottom_left"), Some(CropHandle::BottomLeft));
        assert_eq!(parse_handle("top"), Some(CropHandle::Top));
        assert_eq!(parse_handle("middle"), None);
    }
}
