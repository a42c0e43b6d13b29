//! In-process pixel comparison engine.
//!
//! Distance is the mean absolute per-channel difference normalized to
//! `[0, 1]`: identical images score `0`, a white image against a black one
//! scores `1`. On mismatch the engine writes a visual diff artifact next
//! to the fresh capture, with changed pixels painted red and the changed
//! area outlined.

use std::path::Path;

use image::{Rgb, RgbImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;

use crate::errors::EngineError;
use crate::{diff_artifact_path, DiffEngine};

const HIGHLIGHT: Rgb<u8> = Rgb([255, 0, 0]);

pub struct PixelEngine;

impl DiffEngine for PixelEngine {
    fn name(&self) -> &'static str {
        "pil"
    }

    fn compare_files(
        &self,
        fresh: &Path,
        baseline: &Path,
        threshold: f64,
    ) -> Result<(), EngineError> {
        let fresh_img = image::open(fresh)?.to_rgb8();
        let baseline_img = image::open(baseline)?.to_rgb8();

        let distance = pixel_distance(&fresh_img, &baseline_img)?;
        tracing::debug!(
            fresh = %fresh.display(),
            baseline = %baseline.display(),
            distance,
            threshold,
            "pixel comparison complete"
        );

        if distance <= threshold {
            return Ok(());
        }

        let diff_path = diff_artifact_path(fresh);
        let artifact = match render_diff(&fresh_img, &baseline_img).save(&diff_path) {
            Ok(()) => Some(diff_path),
            Err(err) => {
                tracing::warn!(error = %err, "failed to write diff artifact");
                None
            }
        };

        Err(EngineError::Mismatch {
            message: format!(
                "screenshot {} does not match baseline {} (distance {:.6})",
                fresh.display(),
                baseline.display(),
                distance
            ),
            distance: Some(distance),
            diff_image: artifact,
        })
    }

    fn distance(&self, a: &RgbImage, b: &RgbImage) -> Result<f64, EngineError> {
        pixel_distance(a, b)
    }
}

/// Normalized mean absolute channel difference. Shared with the external
/// engines for their in-memory comparison path.
pub(crate) fn pixel_distance(a: &RgbImage, b: &RgbImage) -> Result<f64, EngineError> {
    check_dimensions(a, b)?;

    let total: u64 = a
        .as_raw()
        .iter()
        .zip(b.as_raw().iter())
        .map(|(&x, &y)| u64::from(x.abs_diff(y)))
        .sum();

    let channels = a.as_raw().len() as f64;
    Ok(total as f64 / (channels * 255.0))
}

pub(crate) fn check_dimensions(a: &RgbImage, b: &RgbImage) -> Result<(), EngineError> {
    if a.dimensions() != b.dimensions() {
        return Err(EngineError::SizeMismatch {
            left_width: a.width(),
            left_height: a.height(),
            right_width: b.width(),
            right_height: b.height(),
        });
    }
    Ok(())
}

/// Copy of the fresh capture with changed pixels highlighted and the
/// changed area outlined.
fn render_diff(fresh: &RgbImage, baseline: &RgbImage) -> RgbImage {
    let mut out = fresh.clone();
    let mut bounds: Option<(u32, u32, u32, u32)> = None;

    for (x, y, pixel) in fresh.enumerate_pixels() {
        if pixel != baseline.get_pixel(x, y) {
            out.put_pixel(x, y, HIGHLIGHT);
            bounds = Some(match bounds {
                None => (x, y, x, y),
                Some((min_x, min_y, max_x, max_y)) => {
                    (min_x.min(x), min_y.min(y), max_x.max(x), max_y.max(y))
                }
            });
        }
    }

    if let Some((min_x, min_y, max_x, max_y)) = bounds {
        let rect = Rect::at(min_x as i32, min_y as i32)
            .of_size(max_x - min_x + 1, max_y - min_y + 1);
        draw_hollow_rect_mut(&mut out, rect, HIGHLIGHT);
    }

    out
}
