//! Pixel effects for raster-backed transitions.
//!
//! Effects operate on [`image::RgbaImage`] buffers and are pure apart from
//! [`pixelate`], which rewrites its buffer in place. Raw `{width, height,
//! data}` records from elsewhere can be wrapped with [`buffer_from_raw`].

pub mod effects;
pub mod error;
pub mod transition;

pub use effects::{box_blur, buffer_from_raw, pixelate, wave};
pub use error::{RasterError, Result};
pub use transition::{effect_strength, transition_frame};
