//! Screenshot capture and coordinate-space normalization.
//!
//! The driver hands back a raw screenshot whose pixel grid may be scaled
//! relative to the logical viewport (high-DPI displays). Every rectangle
//! coming from the DOM is mapped into raw-image space through the
//! device-pixel ratio before cropping or masking.

use std::sync::Arc;

use browser_adapter::BrowserDriver;
use image::{imageops, Rgb, RgbImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;

use crate::errors::VisregError;
use crate::geometry::{device_pixel_ratio, Region};

const MASK_COLOR: Rgb<u8> = Rgb([0, 0, 0]);

/// Obtains and normalizes the current screenshot. Reads driver state only;
/// never writes to disk.
pub struct ScreenshotCapture {
    driver: Arc<dyn BrowserDriver>,
}

impl ScreenshotCapture {
    pub fn new(driver: Arc<dyn BrowserDriver>) -> Self {
        Self { driver }
    }

    /// Capture the viewport, cropped to `region` when one is given,
    /// otherwise with every `exclusions` rectangle blacked out. A call
    /// with a target region never also applies exclusions.
    pub async fn capture(
        &self,
        region: Option<Region>,
        exclusions: &[Region],
    ) -> Result<RgbImage, VisregError> {
        let blob = self.driver.screenshot_png().await?;
        let mut image = image::load_from_memory(&blob)?.to_rgb8();
        tracing::debug!(
            width = image.width(),
            height = image.height(),
            ?region,
            exclusions = exclusions.len(),
            "captured raw screenshot"
        );

        if let Some(region) = region {
            // A capture device reporting an image exactly the size of the
            // region is already element-scoped; the crop is skipped.
            if image.dimensions() == (region.width, region.height) {
                return Ok(image);
            }
            let ratio = self.current_ratio(&image).await?;
            return Ok(crop_to_region(&image, region.scaled(ratio)));
        }

        if !exclusions.is_empty() {
            let ratio = self.current_ratio(&image).await?;
            for exclusion in exclusions {
                mask_region(&mut image, exclusion.scaled(ratio));
            }
        }

        Ok(image)
    }

    async fn current_ratio(&self, image: &RgbImage) -> Result<u32, VisregError> {
        let window = self.driver.window_size().await?;
        Ok(device_pixel_ratio(image.width(), image.height(), window))
    }
}

/// Crop in raw-image space. Rectangles reaching past the image edge are
/// clipped rather than rejected.
fn crop_to_region(image: &RgbImage, region: Region) -> RgbImage {
    imageops::crop_imm(image, region.left, region.top, region.width, region.height).to_image()
}

/// Paint a solid opaque block over one raw-space rectangle.
fn mask_region(image: &mut RgbImage, region: Region) {
    if region.width == 0 || region.height == 0 {
        return;
    }
    let rect =
        Rect::at(region.left as i32, region.top as i32).of_size(region.width, region.height);
    draw_filled_rect_mut(image, rect, MASK_COLOR);
}
