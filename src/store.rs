//! File-system-backed store for baseline and fresh screenshot images.
//!
//! Identity is `(directory, name)`; the store never deletes a baseline and
//! only removes fresh captures when the orchestrator asks it to after a
//! successful comparison.

use std::fs;
use std::path::{Path, PathBuf};

use image::RgbImage;

use crate::errors::VisregError;

pub struct BaselineStore {
    baseline_dir: PathBuf,
    output_dir: PathBuf,
}

impl BaselineStore {
    /// Create the store, recursively creating both directories. Existing
    /// directories are fine; any other creation failure propagates.
    pub fn new(baseline_dir: &Path, output_dir: &Path) -> Result<Self, VisregError> {
        fs::create_dir_all(baseline_dir)?;
        fs::create_dir_all(output_dir)?;
        Ok(Self {
            baseline_dir: baseline_dir.to_path_buf(),
            output_dir: output_dir.to_path_buf(),
        })
    }

    pub fn baseline_path(&self, name: &str) -> PathBuf {
        self.baseline_dir.join(format!("{name}.png"))
    }

    pub fn output_path(&self, name: &str) -> PathBuf {
        self.output_dir.join(format!("{name}.png"))
    }

    /// Path the diff engine would use for its visual diff artifact.
    pub fn diff_path(&self, name: &str) -> PathBuf {
        diff_engines::diff_artifact_path(&self.output_path(name))
    }

    /// Existence check only; deliberately performed without decoding so a
    /// missing baseline is never masked by a decode error.
    pub fn baseline_exists(&self, name: &str) -> bool {
        self.baseline_path(name).is_file()
    }

    pub fn write_baseline(&self, name: &str, image: &RgbImage) -> Result<PathBuf, VisregError> {
        let path = self.baseline_path(name);
        image.save(&path)?;
        tracing::info!(path = %path.display(), "baseline recorded");
        Ok(path)
    }

    pub fn write_output(&self, name: &str, image: &RgbImage) -> Result<PathBuf, VisregError> {
        let path = self.output_path(name);
        image.save(&path)?;
        tracing::debug!(path = %path.display(), "fresh capture written");
        Ok(path)
    }

    /// Remove the fresh capture; used by cleanup-on-success only.
    pub fn remove_output(&self, name: &str) -> Result<(), VisregError> {
        fs::remove_file(self.output_path(name))?;
        Ok(())
    }
}
