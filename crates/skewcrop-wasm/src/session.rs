//! Skew session bindings.
//!
//! A `JsSkewSession` owns the engine, its session state and the last view
//! geometry pushed from JavaScript. The view layer updates geometry with the
//! setters, then calls `update_skew` on slider changes and `end_pan` when a
//! pan gesture finishes.

use crate::types::{corners_from_slice, corners_to_vec, point_to_vec, to_js_error};
use serde::Serialize;
use skewcrop_core::skew::SkewShifts;
use skewcrop_core::{
    EdgeInsets, OffsetBounds, PanCorrection, Rect, Size, SkewConfig, SkewEngine, SkewError,
    SkewState, SkewUpdate, Transform3D, Vec2, ViewSnapshot,
};
use wasm_bindgen::prelude::*;

/// Result of one skew update.
#[wasm_bindgen]
pub struct JsSkewUpdate {
    inner: SkewUpdate,
}

#[derive(Serialize)]
struct SkewUpdateJs<'a> {
    horizontal: f64,
    vertical: f64,
    transform: [f64; 16],
    scale: f64,
    shifts: &'a SkewShifts,
    insets: &'a EdgeInsets,
    bounds: &'a OffsetBounds,
    optimal_offset: Vec2,
    target_offset: Option<Vec2>,
    image_space_crop: Option<[Vec2; 4]>,
}

#[wasm_bindgen]
impl JsSkewUpdate {
    #[wasm_bindgen(getter)]
    pub fn scale(&self) -> f64 {
        self.inner.scale
    }

    #[wasm_bindgen(getter)]
    pub fn horizontal(&self) -> f64 {
        self.inner.angles.horizontal
    }

    #[wasm_bindgen(getter)]
    pub fn vertical(&self) -> f64 {
        self.inner.angles.vertical
    }

    /// 16 numbers, column-major, ready for a CSS `matrix3d`.
    pub fn transform(&self) -> Vec<f64> {
        self.inner.transform.to_cols_array().to_vec()
    }

    /// `[top, left, bottom, right]`
    pub fn insets(&self) -> Vec<f64> {
        let i = self.inner.insets;
        vec![i.top, i.left, i.bottom, i.right]
    }

    /// `[min_x, min_y, max_x, max_y]`
    pub fn bounds(&self) -> Vec<f64> {
        let b = self.inner.bounds;
        vec![b.min.x, b.min.y, b.max.x, b.max.y]
    }

    pub fn optimal_offset(&self) -> Vec<f64> {
        point_to_vec(self.inner.optimal_offset)
    }

    /// Pan position to apply, empty when the position should stay.
    pub fn target_offset(&self) -> Vec<f64> {
        self.inner.target_offset.map(point_to_vec).unwrap_or_default()
    }

    /// Crop corners on the unskewed image as eight numbers (TL, TR, BR, BL),
    /// for exporting the crop. Empty when the transform is not invertible.
    pub fn image_space_crop(&self) -> Vec<f64> {
        self.inner
            .image_space_crop
            .map(|corners| corners_to_vec(&corners))
            .unwrap_or_default()
    }

    pub fn to_json(&self) -> Result<JsValue, JsValue> {
        let u = &self.inner;
        let json = SkewUpdateJs {
            horizontal: u.angles.horizontal,
            vertical: u.angles.vertical,
            transform: u.transform.to_cols_array(),
            scale: u.scale,
            shifts: &u.shifts,
            insets: &u.insets,
            bounds: &u.bounds,
            optimal_offset: u.optimal_offset,
            target_offset: u.target_offset,
            image_space_crop: u.image_space_crop,
        };
        serde_wasm_bindgen::to_value(&json).map_err(to_js_error)
    }
}

/// Pan correction after a drag ends.
#[wasm_bindgen]
pub struct JsPanCorrection {
    inner: PanCorrection,
}

#[wasm_bindgen]
impl JsPanCorrection {
    #[wasm_bindgen(getter)]
    pub fn x(&self) -> f64 {
        self.inner.offset().x
    }

    #[wasm_bindgen(getter)]
    pub fn y(&self) -> f64 {
        self.inner.offset().y
    }

    /// The host should animate to the new position.
    #[wasm_bindgen(getter)]
    pub fn animated(&self) -> bool {
        self.inner.is_animated()
    }

    #[wasm_bindgen(getter)]
    pub fn changed(&self) -> bool {
        self.inner.is_changed()
    }
}

/// Skew engine plus per-session state.
#[wasm_bindgen]
pub struct JsSkewSession {
    engine: SkewEngine,
    state: SkewState,
    view: ViewSnapshot,
    transform: Transform3D,
}

impl Default for JsSkewSession {
    fn default() -> Self {
        Self::with_engine(SkewEngine::default())
    }
}

#[wasm_bindgen]
impl JsSkewSession {
    /// Session with the default configuration.
    #[wasm_bindgen(constructor)]
    pub fn new() -> JsSkewSession {
        Self::default()
    }

    /// Session with a partial configuration object; missing fields use defaults.
    pub fn with_config(config: JsValue) -> Result<JsSkewSession, JsValue> {
        let config: SkewConfig = serde_wasm_bindgen::from_value(config)
            .map_err(|e| JsValue::from_str(&format!("Invalid skew config: {}", e)))?;
        let engine = SkewEngine::new(config).map_err(to_js_error)?;
        Ok(Self::with_engine(engine))
    }

    /// Frame of the unskewed image layer in content space.
    ///
    /// # Arguments
    /// * `x`, `y` - Origin of the image layer
    /// * `width`, `height` - Size of the image layer at the current zoom
    pub fn set_image_frame(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.view.image_frame = Rect::new(x, y, width, height);
    }

    /// Size of the scroll view's visible area.
    pub fn set_viewport_size(&mut self, width: f64, height: f64) {
        self.view.viewport_size = Size::new(width, height);
    }

    /// Scrollable content size at the current zoom.
    pub fn set_content_size(&mut self, width: f64, height: f64) {
        self.view.content_size = Size::new(width, height);
    }

    /// Crop rectangle corners in viewport space.
    ///
    /// # Arguments
    /// * `corners` - Eight numbers: TL, TR, BR, BL as `x, y` pairs
    ///
    /// # Returns
    /// An error unless exactly eight numbers are given.
    pub fn set_crop_corners(&mut self, corners: Vec<f64>) -> Result<(), JsValue> {
        self.view.crop_corners = corners_from_slice(&corners)
            .ok_or_else(|| JsValue::from_str("Expected 8 numbers for crop corners"))?;
        Ok(())
    }

    /// Straightening rotation in degrees; dampens the edge-to-edge policy.
    pub fn set_rotation(&mut self, degrees: f64) {
        self.view.rotation_degrees = degrees;
    }

    /// Current zoom and the zoom at which the image just fits.
    ///
    /// # Arguments
    /// * `zoom_scale` - Current zoom scale of the scroll view
    /// * `min_zoom_scale` - Minimum zoom scale; the perspective distance
    ///   grows with `zoom_scale / min_zoom_scale`
    pub fn set_zoom(&mut self, zoom_scale: f64, min_zoom_scale: f64) {
        self.view.zoom_scale = zoom_scale;
        self.view.min_zoom_scale = min_zoom_scale;
    }

    /// Current scroll position.
    pub fn set_content_offset(&mut self, x: f64, y: f64) {
        self.view.content_offset = Vec2::new(x, y);
    }

    /// Recompute the transform, scale and pan range for new skew angles.
    ///
    /// # Arguments
    /// * `horizontal` - Horizontal keystone angle in degrees
    /// * `vertical` - Vertical keystone angle in degrees
    ///
    /// # Returns
    /// The update to apply. When it carries a target offset the session
    /// assumes the host scrolls there.
    ///
    /// # Example
    /// ```typescript
    /// const update = session.update_skew(6, 0);
    /// layer.style.transform = `matrix3d(${update.transform().join(',')})`;
    /// const target = update.target_offset();
    /// if (target.length) scrollView.scrollTo(target[0], target[1]);
    /// ```
    pub fn update_skew(
        &mut self,
        horizontal: f64,
        vertical: f64,
    ) -> Result<JsSkewUpdate, JsValue> {
        self.apply_skew(horizontal, vertical).map_err(to_js_error)
    }

    /// Check the pan position after a drag ends.
    ///
    /// Call after `set_content_offset` with the position the gesture ended at.
    ///
    /// # Returns
    /// The corrected position and whether to animate to it.
    ///
    /// # Example
    /// ```typescript
    /// session.set_content_offset(view.scrollLeft, view.scrollTop);
    /// const fix = session.end_pan();
    /// if (fix.changed) scrollView.scrollTo(fix.x, fix.y, fix.animated);
    /// ```
    pub fn end_pan(&self) -> Result<JsPanCorrection, JsValue> {
        self.correct_pan().map_err(to_js_error)
    }

    /// Forget the session: skew reset, preset applied or 90 degree rotation.
    pub fn reset(&mut self) {
        self.engine.reset(&mut self.state);
        self.transform = Transform3D::IDENTITY;
    }

    /// Session state as a plain object, for persisting across reloads.
    pub fn state_to_json(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.state).map_err(to_js_error)
    }

    /// Restore state saved with `state_to_json`.
    ///
    /// # Returns
    /// An error when the object does not deserialize or breaks the state
    /// invariants; the current state is kept in that case.
    pub fn restore_state(&mut self, value: JsValue) -> Result<(), JsValue> {
        let state: SkewState = serde_wasm_bindgen::from_value(value).map_err(to_js_error)?;
        self.restore(state).map_err(to_js_error)
    }
}

impl JsSkewSession {
    fn with_engine(engine: SkewEngine) -> Self {
        let size = Size::new(1.0, 1.0);
        Self {
            engine,
            state: SkewState::new(),
            view: ViewSnapshot {
                image_frame: Rect::from_size(size),
                viewport_size: size,
                content_size: size,
                crop_corners: Rect::from_size(size).corners(),
                rotation_degrees: 0.0,
                zoom_scale: 1.0,
                min_zoom_scale: 1.0,
                content_offset: Vec2::ZERO,
            },
            transform: Transform3D::IDENTITY,
        }
    }

    pub(crate) fn apply_skew(
        &mut self,
        horizontal: f64,
        vertical: f64,
    ) -> Result<JsSkewUpdate, SkewError> {
        let angles = self.engine.angles(horizontal, vertical);
        let update = self.engine.update_skew(&mut self.state, &self.view, angles)?;
        self.transform = update.transform;
        if let Some(offset) = update.target_offset {
            self.view.content_offset = offset;
        }
        Ok(JsSkewUpdate { inner: update })
    }

    pub(crate) fn restore(&mut self, state: SkewState) -> Result<(), SkewError> {
        state.validate()?;
        self.state = state;
        Ok(())
    }

    pub(crate) fn correct_pan(&self) -> Result<JsPanCorrection, SkewError> {
        let inner = self.engine.end_pan(&self.state, &self.view, self.transform)?;
        Ok(JsPanCorrection { inner })
    }
}
