//! Skewcrop Core - Perspective skew geometry for an interactive crop control
//!
//! This crate provides the geometry behind horizontal and vertical keystone
//! correction in a photo crop view: the projective transform, the scale that
//! keeps the skewed image covering the crop rectangle, the valid pan range and
//! a preferred pan position, plus the crop-box handle updaters.
//!
//! Everything here is pure computation over plain values. The host view layer
//! reads its geometry into a [`ViewSnapshot`], calls [`SkewEngine`], and
//! applies the results.

pub mod config;
pub mod crop_box;
pub mod error;
pub mod geometry;
pub mod skew;

pub use config::{AspectLock, CropBoxConfig, SkewConfig};
pub use crop_box::{BoxClamper, CropBoxDrag, CropHandle};
pub use error::SkewError;
pub use geometry::{EdgeInsets, OffsetBounds, Rect, Size, Vec2};
pub use skew::{
    PanCorrection, SkewAngles, SkewEngine, SkewState, SkewUpdate, Transform3D, ViewSnapshot,
};
