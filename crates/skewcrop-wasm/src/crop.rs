//! Crop-box drag bindings.

use crate::types::{parse_handle, rect_from_slice, rect_to_vec, to_js_error};
use skewcrop_core::{AspectLock, CropBoxConfig, CropBoxDrag, Rect, SkewError, Vec2};
use wasm_bindgen::prelude::*;

/// One handle drag, from touch-down to release.
#[wasm_bindgen]
pub struct JsCropDrag {
    drag: CropBoxDrag,
    config: CropBoxConfig,
    current: Rect,
}

#[wasm_bindgen]
impl JsCropDrag {
    /// Start a drag.
    ///
    /// # Arguments
    /// * `handle` - Handle name, e.g. `"top_left"` or `"right"`
    /// * `start_frame` - `[x, y, width, height]` of the box at drag start
    /// * `content_bounds` - `[x, y, width, height]` the box must stay inside
    #[wasm_bindgen(constructor)]
    pub fn new(
        handle: &str,
        start_frame: Vec<f64>,
        content_bounds: Vec<f64>,
    ) -> Result<JsCropDrag, JsValue> {
        let handle = parse_handle(handle)
            .ok_or_else(|| JsValue::from_str(&format!("Unknown crop handle: {}", handle)))?;
        let start = rect_from_slice(&start_frame)
            .ok_or_else(|| JsValue::from_str("Expected [x, y, width, height]"))?;
        let bounds = rect_from_slice(&content_bounds)
            .ok_or_else(|| JsValue::from_str("Expected [x, y, width, height]"))?;
        Self::start(handle, start, bounds).map_err(to_js_error)
    }

    /// Lock to `ratio` (width / height), or unlock with `None`.
    pub fn set_aspect_ratio(&mut self, ratio: Option<f64>) {
        self.config.aspect_lock = match ratio {
            Some(ratio) => AspectLock::Locked { ratio },
            None => AspectLock::Free,
        };
    }

    /// Lock to the shape of the start frame.
    pub fn lock_to_start_frame(&mut self) {
        self.config.aspect_lock = AspectLock::from_frame(&self.drag.start_frame);
    }

    pub fn set_min_size(&mut self, min_size: f64) {
        self.config.min_size = min_size;
    }

    pub fn set_min_aspect_ratio(&mut self, ratio: f64) {
        self.config.min_aspect_ratio = ratio;
    }

    /// Frame for the cumulative drag delta, as `[x, y, width, height]`.
    pub fn update(&mut self, dx: f64, dy: f64) -> Result<Vec<f64>, JsValue> {
        self.config.validate().map_err(to_js_error)?;
        Ok(rect_to_vec(&self.apply(dx, dy)))
    }

    /// Current frame as `[x, y, width, height]`.
    pub fn frame(&self) -> Vec<f64> {
        rect_to_vec(&self.current)
    }
}

impl JsCropDrag {
    pub(crate) fn start(
        handle: skewcrop_core::CropHandle,
        start: Rect,
        bounds: Rect,
    ) -> Result<Self, SkewError> {
        let drag = CropBoxDrag::new(handle, start, bounds)?;
        Ok(Self {
            drag,
            config: CropBoxConfig::default(),
            current: start,
        })
    }

    pub(crate) fn apply(&mut self, dx: f64, dy: f64) -> Rect {
        self.current = self.drag.update(Vec2::new(dx, dy), &self.current, &self.config);
        self.current
    }
}
