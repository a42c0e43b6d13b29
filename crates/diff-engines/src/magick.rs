//! ImageMagick-backed comparison engine.
//!
//! Shells out to `compare -metric AE`, which reports the absolute number
//! of differing pixels and always writes a visual diff image. The binary
//! is located on PATH at call time; ImageMagick 7 installs without the
//! legacy `compare` entry point, so `magick compare` is the fallback.

use std::path::Path;
use std::process::Command;

use image::RgbImage;
use which::which;

use crate::errors::EngineError;
use crate::pixel::pixel_distance;
use crate::{diff_artifact_path, DiffEngine};

pub struct ImageMagickEngine;

impl DiffEngine for ImageMagickEngine {
    fn name(&self) -> &'static str {
        "imagemagick"
    }

    fn compare_files(
        &self,
        fresh: &Path,
        baseline: &Path,
        threshold: f64,
    ) -> Result<(), EngineError> {
        let diff_path = diff_artifact_path(fresh);
        let mut command = compare_command()?;
        let output = command
            .arg("-metric")
            .arg("AE")
            .arg(fresh)
            .arg(baseline)
            .arg(&diff_path)
            .output()?;

        // compare exits 0 for identical, 1 for different, anything else is
        // a tool fault. The metric goes to stderr.
        let stderr = String::from_utf8_lossy(&output.stderr);
        let code = output.status.code();
        let distance = parse_metric(&stderr);
        tracing::debug!(?code, metric = %stderr.trim(), "imagemagick compare finished");

        match code {
            Some(0) => Ok(()),
            Some(1) => {
                let distance = distance.ok_or_else(|| {
                    EngineError::ToolFailed(format!("unparseable compare metric: {}", stderr.trim()))
                })?;
                if distance <= threshold {
                    return Ok(());
                }
                Err(EngineError::Mismatch {
                    message: format!(
                        "screenshot {} does not match baseline {} ({} pixels differ)",
                        fresh.display(),
                        baseline.display(),
                        distance
                    ),
                    distance: Some(distance),
                    diff_image: diff_path.is_file().then(|| diff_path.clone()),
                })
            }
            _ => Err(EngineError::ToolFailed(format!(
                "compare exited with {:?}: {}",
                code,
                stderr.trim()
            ))),
        }
    }

    // The tool only operates on files; in-memory comparisons use the
    // shared pixel metric.
    fn distance(&self, a: &RgbImage, b: &RgbImage) -> Result<f64, EngineError> {
        pixel_distance(a, b)
    }
}

fn compare_command() -> Result<Command, EngineError> {
    if let Ok(path) = which("compare") {
        return Ok(Command::new(path));
    }
    if let Ok(path) = which("magick") {
        let mut command = Command::new(path);
        command.arg("compare");
        return Ok(command);
    }
    Err(EngineError::ToolMissing(
        "compare (install ImageMagick)".to_string(),
    ))
}

/// `-metric AE` prints a bare count, sometimes in scientific notation and
/// sometimes with a normalized value in parentheses.
fn parse_metric(stderr: &str) -> Option<f64> {
    stderr.split_whitespace().next()?.parse().ok()
}
