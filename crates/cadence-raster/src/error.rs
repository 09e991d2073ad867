//! Error types for raster effects.

use thiserror::Error;

/// Result type for raster operations.
pub type Result<T> = std::result::Result<T, RasterError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RasterError {
    /// Raw pixel data does not match `width * height * 4`.
    #[error("buffer size mismatch: {width}x{height} RGBA needs {expected} bytes, got {actual}")]
    BufferSize {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}
