//! Skewcrop WASM - WebAssembly bindings for the skewcrop geometry engine
//!
//! This crate exposes skewcrop-core to the JavaScript view layer that owns the
//! scroll view, the image layer and the crop overlay.
//!
//! # Module Structure
//!
//! - `session` - Skew session: transform, scale, pan range and pan correction
//! - `crop` - Crop-box handle drags
//! - `types` - Conversions between flat number arrays and core geometry
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsSkewSession } from '@skewcrop/wasm';
//!
//! await init();
//!
//! const session = new JsSkewSession();
//! session.set_image_frame(0, 0, 400, 300);
//! session.set_viewport_size(400, 300);
//! session.set_content_size(400, 300);
//! session.set_crop_corners([0, 0, 400, 0, 400, 300, 0, 300]);
//!
//! const update = session.update_skew(6, 0);
//! layer.style.transform = `matrix3d(${update.transform().join(',')})`;
//! ```

use wasm_bindgen::prelude::*;

mod crop;
mod session;
mod types;

pub use crop::JsCropDrag;
pub use session::{JsPanCorrection, JsSkewSession, JsSkewUpdate};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
