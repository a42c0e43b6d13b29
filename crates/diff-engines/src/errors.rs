//! Error types shared by all comparison engines.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Clone, Debug, Error)]
pub enum EngineError {
    /// The two images differ beyond the threshold. This is the test-failure
    /// signal, not an engine fault.
    #[error("{message}")]
    Mismatch {
        message: String,
        /// Numeric distance when the engine reports one.
        distance: Option<f64>,
        /// Visual diff artifact, when the engine produced one.
        diff_image: Option<PathBuf>,
    },
    /// Decoded images cannot be compared because their dimensions differ.
    #[error("image sizes do not match: {left_width}x{left_height} vs {right_width}x{right_height}")]
    SizeMismatch {
        left_width: u32,
        left_height: u32,
        right_width: u32,
        right_height: u32,
    },
    #[error("unknown diff engine: {0}")]
    UnknownEngine(String),
    #[error("comparison tool not found: {0}")]
    ToolMissing(String),
    #[error("comparison tool failed: {0}")]
    ToolFailed(String),
    #[error("image processing error: {0}")]
    Image(String),
    #[error("io failure: {0}")]
    Io(String),
}

impl EngineError {
    /// True for the mismatch signal, false for engine faults.
    pub fn is_mismatch(&self) -> bool {
        matches!(self, Self::Mismatch { .. } | Self::SizeMismatch { .. })
    }
}

impl From<image::ImageError> for EngineError {
    fn from(err: image::ImageError) -> Self {
        Self::Image(err.to_string())
    }
}

impl From<std::io::Error> for EngineError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
