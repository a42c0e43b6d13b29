//! Error taxonomy for the comparison pipeline.
//!
//! Missing-Baseline and Image-Mismatch are deliberately separate variants:
//! the first is a failed precondition (nothing to compare against), the
//! second is the actual test-failure signal. Callers branch on the variant,
//! never on message text.

use std::path::PathBuf;

use browser_adapter::AdapterError;
use diff_engines::EngineError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VisregError {
    /// Compare mode was requested but no baseline file exists.
    #[error("baseline screenshot {path} does not exist; re-run in baseline-saving mode to create it")]
    MissingBaseline { path: PathBuf },

    /// The fresh capture differs from the baseline beyond the threshold.
    ///
    /// Carries every artifact a report integration needs to attach. Paths
    /// are absent when the comparison ran against an in-memory baseline.
    #[error("{message}")]
    Mismatch {
        message: String,
        baseline_image: Option<PathBuf>,
        output_image: Option<PathBuf>,
        diff_image: Option<PathBuf>,
        distance: Option<f64>,
    },

    /// Unrecognized configuration option name.
    #[error("unknown option: {0}")]
    UnknownOption(String),

    /// Recognized option with a value of the wrong shape.
    #[error("invalid value for option {key}: {value}")]
    InvalidOption { key: String, value: String },

    /// Browser driver fault.
    #[error(transparent)]
    Adapter(#[from] AdapterError),

    /// Diff engine fault (unsupported tool, unreadable image, ...). Engine
    /// mismatches are translated into [`VisregError::Mismatch`] before they
    /// reach the caller; this variant only carries real faults.
    #[error("diff engine fault: {0}")]
    Engine(EngineError),

    #[error("image processing error: {0}")]
    Image(String),

    #[error("io failure: {0}")]
    Io(#[from] std::io::Error),
}

impl From<image::ImageError> for VisregError {
    fn from(err: image::ImageError) -> Self {
        Self::Image(err.to_string())
    }
}
