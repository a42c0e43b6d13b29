//! Pluggable image comparison engines.
//!
//! The fixture delegates all dissimilarity judgment to a [`DiffEngine`].
//! Three interchangeable implementations exist: the in-process pixel
//! engine (default), ImageMagick's `compare` tool, and the PerceptualDiff
//! tool. Engines are selected through the closed [`EngineKind`] registry;
//! there is no runtime lookup by arbitrary name.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use image::RgbImage;
use serde::{Deserialize, Serialize};

pub mod errors;
pub mod magick;
pub mod pdiff;
pub mod pixel;

pub use errors::EngineError;
pub use magick::ImageMagickEngine;
pub use pdiff::PerceptualDiffEngine;
pub use pixel::PixelEngine;

/// Contract every comparison engine honors.
///
/// `compare_files` raises [`EngineError::Mismatch`] when the two files
/// differ beyond `threshold`; equality with the threshold passes. The
/// threshold is in the engine's native distance unit, with `0` meaning
/// "identical". `distance` operates on already-decoded images and never
/// touches the filesystem.
pub trait DiffEngine: Send + Sync {
    /// Registry name of this engine.
    fn name(&self) -> &'static str;

    /// Compare two image files, optionally writing a visual diff artifact
    /// next to `fresh` (`<fresh stem>.diff.png`).
    fn compare_files(&self, fresh: &Path, baseline: &Path, threshold: f64)
        -> Result<(), EngineError>;

    /// Scalar dissimilarity between two decoded images.
    fn distance(&self, a: &RgbImage, b: &RgbImage) -> Result<f64, EngineError>;
}

/// Closed registry of the available engines.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    /// In-process pixel comparison, no external tooling required.
    #[default]
    Pil,
    /// ImageMagick `compare -metric AE`.
    Imagemagick,
    /// The `perceptualdiff` tool.
    Perceptualdiff,
}

impl EngineKind {
    /// Instantiate the engine this kind names.
    pub fn create(self) -> Box<dyn DiffEngine> {
        match self {
            Self::Pil => Box::new(PixelEngine),
            Self::Imagemagick => Box::new(ImageMagickEngine),
            Self::Perceptualdiff => Box::new(PerceptualDiffEngine),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pil => "pil",
            Self::Imagemagick => "imagemagick",
            Self::Perceptualdiff => "perceptualdiff",
        }
    }
}

impl FromStr for EngineKind {
    type Err = EngineError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.to_ascii_lowercase().as_str() {
            "pil" => Ok(Self::Pil),
            "imagemagick" => Ok(Self::Imagemagick),
            "perceptualdiff" => Ok(Self::Perceptualdiff),
            other => Err(EngineError::UnknownEngine(other.to_string())),
        }
    }
}

/// Path of the visual diff artifact derived from a fresh capture path:
/// `out/name.png` becomes `out/name.diff.png`.
pub fn diff_artifact_path(fresh: &Path) -> PathBuf {
    let stem = fresh
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    fresh.with_file_name(format!("{}.diff.png", stem))
}
