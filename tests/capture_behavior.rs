//! Coordinate-space behavior: device-pixel-ratio cropping, the
//! skip-crop-when-sizes-match edge case, and exclusion masking.

mod common;

use std::path::Path;
use std::sync::Arc;

use common::{rect, solid, StubDriver};
use image::{Rgb, RgbImage};
use visreg::{Config, Region, Target, Viewport, VisualTester};

fn recording_config(root: &Path, viewport: (u32, u32)) -> Config {
    let mut config = Config::default();
    config.baseline_dir = root.join("baseline");
    config.output_dir = root.join("output");
    config.viewport = Viewport::from(viewport);
    config.save_baseline = true;
    config
}

fn gradient(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| Rgb([x as u8, y as u8, 99]))
}

async fn record(
    driver: Arc<StubDriver>,
    config: Config,
    name: &str,
    target: Option<Target>,
    exclusions: &[Target],
) -> RgbImage {
    common::init_tracing();
    let baseline_path = config.baseline_dir.join(format!("{name}.png"));
    let tester = VisualTester::new(driver, config).await.unwrap();
    tester
        .assert_screenshot(name, target, 0.0, exclusions)
        .await
        .unwrap();
    image::open(baseline_path).unwrap().to_rgb8()
}

#[tokio::test]
async fn element_target_is_scaled_by_device_pixel_ratio_and_cropped() {
    let dir = tempfile::tempdir().unwrap();
    // Logical window 100x80, raw screenshot 200x160: ratio 2.
    let screenshot = gradient(200, 160);
    let driver = Arc::new(
        StubDriver::new(&screenshot).with_elements("#panel", &[rect(20.0, 10.0, 30.0, 20.0)]),
    );

    let stored = record(
        driver,
        recording_config(dir.path(), (100, 80)),
        "panel",
        Some(Target::from("#panel")),
        &[],
    )
    .await;

    assert_eq!(stored.dimensions(), (60, 40));
    // Crop origin is the scaled element position (40, 20).
    assert_eq!(stored.get_pixel(0, 0), screenshot.get_pixel(40, 20));
    assert_eq!(stored.get_pixel(59, 39), screenshot.get_pixel(99, 59));
}

#[tokio::test]
async fn crop_is_skipped_when_raw_size_already_matches_region() {
    let dir = tempfile::tempdir().unwrap();
    // The capture device already returned an element-sized image; even
    // though the region sits at (5, 5), no crop may be applied.
    let screenshot = gradient(30, 20);
    let driver = Arc::new(StubDriver::new(&screenshot));

    let stored = record(
        driver,
        recording_config(dir.path(), (100, 80)),
        "pre_cropped",
        Some(Target::from(Region::new(5, 5, 30, 20))),
        &[],
    )
    .await;

    assert_eq!(stored, screenshot);
}

#[tokio::test]
async fn region_target_without_scaling_crops_in_place() {
    let dir = tempfile::tempdir().unwrap();
    let screenshot = gradient(100, 80);
    let driver = Arc::new(StubDriver::new(&screenshot));

    let stored = record(
        driver,
        recording_config(dir.path(), (100, 80)),
        "region",
        Some(Target::from(Region::new(10, 20, 40, 30))),
        &[],
    )
    .await;

    assert_eq!(stored.dimensions(), (40, 30));
    assert_eq!(stored.get_pixel(0, 0), screenshot.get_pixel(20, 10));
}

#[tokio::test]
async fn exclusions_black_out_matches_and_drop_empty_selectors() {
    let dir = tempfile::tempdir().unwrap();
    let screenshot = solid(100, 80, [128, 128, 128]);
    let driver = Arc::new(
        StubDriver::new(&screenshot)
            .with_elements("#clock", &[rect(10.0, 10.0, 20.0, 10.0)])
            .with_elements("#missing", &[]),
    );

    let stored = record(
        driver,
        recording_config(dir.path(), (100, 80)),
        "masked",
        None,
        &[Target::from("#clock"), Target::from("#missing")],
    )
    .await;

    // The matched element's area is an opaque block.
    assert_eq!(*stored.get_pixel(10, 10), Rgb([0, 0, 0]));
    assert_eq!(*stored.get_pixel(29, 19), Rgb([0, 0, 0]));
    // Everything else is untouched; the zero-match selector raised nothing.
    assert_eq!(*stored.get_pixel(30, 20), Rgb([128, 128, 128]));
    assert_eq!(*stored.get_pixel(0, 0), Rgb([128, 128, 128]));
}

#[tokio::test]
async fn exclusions_scale_with_device_pixel_ratio() {
    let dir = tempfile::tempdir().unwrap();
    // Ratio 2: logical rect (5, 5, 10, 5) lands at (10, 10)..(30, 20).
    let screenshot = solid(200, 160, [200, 200, 200]);
    let driver = Arc::new(
        StubDriver::new(&screenshot).with_elements("#ticker", &[rect(5.0, 5.0, 10.0, 5.0)]),
    );

    let stored = record(
        driver,
        recording_config(dir.path(), (100, 80)),
        "scaled_mask",
        None,
        &[Target::from("#ticker")],
    )
    .await;

    assert_eq!(*stored.get_pixel(10, 10), Rgb([0, 0, 0]));
    assert_eq!(*stored.get_pixel(29, 19), Rgb([0, 0, 0]));
    assert_eq!(*stored.get_pixel(30, 20), Rgb([200, 200, 200]));
    assert_eq!(*stored.get_pixel(9, 9), Rgb([200, 200, 200]));
}

#[tokio::test]
async fn selector_target_with_no_match_captures_full_viewport() {
    let dir = tempfile::tempdir().unwrap();
    let screenshot = gradient(100, 80);
    let driver = Arc::new(StubDriver::new(&screenshot).with_elements("#ghost", &[]));

    let stored = record(
        driver,
        recording_config(dir.path(), (100, 80)),
        "no_match",
        Some(Target::from("#ghost")),
        &[],
    )
    .await;

    assert_eq!(stored.dimensions(), (100, 80));
}

#[tokio::test]
async fn target_region_suppresses_exclusions() {
    let dir = tempfile::tempdir().unwrap();
    let screenshot = solid(100, 80, [64, 64, 64]);
    let driver = Arc::new(
        StubDriver::new(&screenshot).with_elements("#clock", &[rect(0.0, 0.0, 10.0, 10.0)]),
    );

    let stored = record(
        driver,
        recording_config(dir.path(), (100, 80)),
        "target_wins",
        Some(Target::from(Region::new(0, 0, 50, 40))),
        &[Target::from("#clock")],
    )
    .await;

    // Cropped to the region, and the exclusion was not painted.
    assert_eq!(stored.dimensions(), (50, 40));
    assert_eq!(*stored.get_pixel(5, 5), Rgb([64, 64, 64]));
}
