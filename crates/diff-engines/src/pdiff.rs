//! PerceptualDiff-backed comparison engine.
//!
//! Runs the `perceptualdiff` tool, which models human vision rather than
//! raw pixel equality. Its threshold is the number of visibly different
//! pixels tolerated before the images count as different.

use std::path::Path;
use std::process::Command;

use image::RgbImage;
use which::which;

use crate::errors::EngineError;
use crate::pixel::pixel_distance;
use crate::{diff_artifact_path, DiffEngine};

pub struct PerceptualDiffEngine;

impl DiffEngine for PerceptualDiffEngine {
    fn name(&self) -> &'static str {
        "perceptualdiff"
    }

    fn compare_files(
        &self,
        fresh: &Path,
        baseline: &Path,
        threshold: f64,
    ) -> Result<(), EngineError> {
        let binary = which("perceptualdiff")
            .map_err(|_| EngineError::ToolMissing("perceptualdiff".to_string()))?;

        let diff_path = diff_artifact_path(fresh);
        let mut command = Command::new(binary);
        command.arg(fresh).arg(baseline).arg("-output").arg(&diff_path);
        if threshold > 0.0 {
            command.arg("-threshold").arg(format!("{}", threshold.ceil() as u64));
        }

        let output = command.output()?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        tracing::debug!(status = ?output.status.code(), verdict = %stdout.trim(), "perceptualdiff finished");

        if output.status.success() {
            return Ok(());
        }

        match output.status.code() {
            Some(1) => Err(EngineError::Mismatch {
                message: format!(
                    "screenshot {} is visibly different from baseline {}",
                    fresh.display(),
                    baseline.display()
                ),
                distance: parse_pixel_count(&stdout),
                diff_image: diff_path.is_file().then(|| diff_path.clone()),
            }),
            code => Err(EngineError::ToolFailed(format!(
                "perceptualdiff exited with {:?}: {}",
                code,
                stdout.trim()
            ))),
        }
    }

    // The tool only operates on files; in-memory comparisons use the
    // shared pixel metric.
    fn distance(&self, a: &RgbImage, b: &RgbImage) -> Result<f64, EngineError> {
        pixel_distance(a, b)
    }
}

/// Pull the count out of the "N pixels are different" verdict line.
fn parse_pixel_count(stdout: &str) -> Option<f64> {
    stdout
        .lines()
        .find(|line| line.trim_end().ends_with("pixels are different"))
        .and_then(|line| line.split_whitespace().next())
        .and_then(|count| count.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::parse_pixel_count;

    #[test]
    fn extracts_count_from_verdict() {
        let stdout = "FAIL: Images are visibly different\n8274 pixels are different\n";
        assert_eq!(parse_pixel_count(stdout), Some(8274.0));
    }

    #[test]
    fn missing_verdict_yields_none() {
        assert_eq!(parse_pixel_count("PASS: Images are binary identical\n"), None);
    }
}
