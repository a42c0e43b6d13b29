//! The comparison orchestrator.
//!
//! [`VisualTester`] owns the driver handle and the configuration for one
//! test execution and sequences every `assert_screenshot` call: resolve
//! the target, capture, persist the fresh image, resolve the baseline,
//! invoke the diff engine, clean up. One instance per test; nothing here
//! is shared across tests and no call is retried.

use std::sync::Arc;

use browser_adapter::{BrowserDriver, WindowSize};
use diff_engines::EngineError;
use image::RgbImage;

use crate::capture::ScreenshotCapture;
use crate::config::Config;
use crate::errors::VisregError;
use crate::geometry::{Region, Viewport};
use crate::store::BaselineStore;

/// A comparison target or exclusion entry: either a CSS selector resolved
/// at call time, or an already-resolved rectangle.
#[derive(Clone, Debug)]
pub enum Target {
    Selector(String),
    Region(Region),
}

impl From<&str> for Target {
    fn from(selector: &str) -> Self {
        Self::Selector(selector.to_string())
    }
}

impl From<String> for Target {
    fn from(selector: String) -> Self {
        Self::Selector(selector)
    }
}

impl From<Region> for Target {
    fn from(region: Region) -> Self {
        Self::Region(region)
    }
}

pub struct VisualTester {
    driver: Arc<dyn BrowserDriver>,
    capture: ScreenshotCapture,
    store: BaselineStore,
    config: Config,
}

impl VisualTester {
    /// Wrap a driver for one test execution: creates the screenshot
    /// directories, pins the window to the origin and fits the viewport
    /// to the configured logical size.
    pub async fn new(driver: Arc<dyn BrowserDriver>, config: Config) -> Result<Self, VisregError> {
        let store = BaselineStore::new(&config.baseline_dir, &config.output_dir)?;

        driver.set_window_position(0, 0).await?;
        fit_viewport(driver.as_ref(), config.viewport).await?;

        Ok(Self {
            capture: ScreenshotCapture::new(Arc::clone(&driver)),
            driver,
            store,
            config,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Options may be adjusted between assertions of the same test.
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    pub fn driver(&self) -> &Arc<dyn BrowserDriver> {
        &self.driver
    }

    /// Capture the viewport (or `target`'s region) and judge it against
    /// the stored baseline named `name`.
    ///
    /// In baseline-recording mode the capture is stored as the new
    /// baseline and no comparison happens. Otherwise the fresh capture is
    /// written to the output directory before anything can fail, a
    /// missing baseline aborts with [`VisregError::MissingBaseline`], and
    /// a distance strictly above `threshold` raises
    /// [`VisregError::Mismatch`] carrying the artifact paths.
    pub async fn assert_screenshot(
        &self,
        name: &str,
        target: Option<Target>,
        threshold: f64,
        exclusions: &[Target],
    ) -> Result<(), VisregError> {
        let region = self.resolve_target(target.as_ref()).await?;
        // Exclusions apply to full-viewport captures only.
        let masks = match region {
            Some(_) => Vec::new(),
            None => self.resolve_exclusions(exclusions).await?,
        };

        let fresh = self.capture.capture(region, &masks).await?;
        let output_path = self.store.write_output(name, &fresh)?;

        if self.config.save_baseline {
            self.store.write_baseline(name, &fresh)?;
            if self.config.cleanup_on_success {
                self.store.remove_output(name)?;
            }
            return Ok(());
        }

        if !self.store.baseline_exists(name) {
            return Err(VisregError::MissingBaseline {
                path: self.store.baseline_path(name),
            });
        }

        let baseline_path = self.store.baseline_path(name);
        let engine = self.config.engine.create();
        tracing::debug!(engine = engine.name(), name, threshold, "comparing against baseline");

        match engine.compare_files(&output_path, &baseline_path, threshold) {
            Ok(()) => {
                if self.config.cleanup_on_success {
                    self.store.remove_output(name)?;
                }
                Ok(())
            }
            Err(err) if err.is_mismatch() => {
                let (message, distance, diff_image) = match err {
                    EngineError::Mismatch {
                        message,
                        distance,
                        diff_image,
                    } => (message, distance, diff_image),
                    other => (other.to_string(), None, None),
                };
                // Engines that write the artifact without reporting it
                // still get it attached when the file is there.
                let diff_image = diff_image.or_else(|| {
                    let path = self.store.diff_path(name);
                    path.is_file().then_some(path)
                });
                Err(VisregError::Mismatch {
                    message,
                    baseline_image: Some(baseline_path),
                    output_image: Some(output_path),
                    diff_image,
                    distance,
                })
            }
            Err(err) => Err(VisregError::Engine(err)),
        }
    }

    /// Judge the capture against an in-memory baseline image instead of
    /// the file store. There is no missing-baseline condition here; the
    /// fresh capture is still persisted under `name` as a diagnostic.
    pub async fn assert_screenshot_against(
        &self,
        name: &str,
        baseline: &RgbImage,
        target: Option<Target>,
        threshold: f64,
        exclusions: &[Target],
    ) -> Result<(), VisregError> {
        let region = self.resolve_target(target.as_ref()).await?;
        let masks = match region {
            Some(_) => Vec::new(),
            None => self.resolve_exclusions(exclusions).await?,
        };

        let fresh = self.capture.capture(region, &masks).await?;
        let output_path = self.store.write_output(name, &fresh)?;

        let engine = self.config.engine.create();
        let distance = match engine.distance(&fresh, baseline) {
            Ok(distance) => distance.abs(),
            Err(err) if err.is_mismatch() => {
                return Err(VisregError::Mismatch {
                    message: err.to_string(),
                    baseline_image: None,
                    output_image: Some(output_path),
                    diff_image: None,
                    distance: None,
                })
            }
            Err(err) => return Err(VisregError::Engine(err)),
        };

        if distance > threshold {
            return Err(VisregError::Mismatch {
                message: format!(
                    "new screenshot did not match the baseline (by a distance of {distance:.2})"
                ),
                baseline_image: None,
                output_image: Some(output_path),
                diff_image: None,
                distance: Some(distance),
            });
        }

        if self.config.cleanup_on_success {
            self.store.remove_output(name)?;
        }
        Ok(())
    }

    /// First selector match wins; zero matches mean "no target".
    async fn resolve_target(&self, target: Option<&Target>) -> Result<Option<Region>, VisregError> {
        match target {
            None => Ok(None),
            Some(Target::Region(region)) => Ok(Some(*region)),
            Some(Target::Selector(selector)) => {
                let elements = self.driver.find_elements(selector).await?;
                if elements.is_empty() {
                    tracing::warn!(selector, "target selector matched no elements");
                }
                Ok(elements.first().map(|element| Region::from(element.rect)))
            }
        }
    }

    /// Selectors contribute every matching element; zero matches are
    /// silently dropped.
    async fn resolve_exclusions(&self, exclusions: &[Target]) -> Result<Vec<Region>, VisregError> {
        let mut regions = Vec::new();
        for entry in exclusions {
            match entry {
                Target::Region(region) => regions.push(*region),
                Target::Selector(selector) => {
                    let elements = self.driver.find_elements(selector).await?;
                    if elements.is_empty() {
                        tracing::debug!(selector, "exclusion selector matched no elements, dropped");
                    }
                    regions.extend(elements.iter().map(|element| Region::from(element.rect)));
                }
            }
        }
        Ok(regions)
    }
}

/// Resize the window so the document client area matches the requested
/// viewport: set the size, measure what the page actually got, and grow
/// the window by the chrome difference.
async fn fit_viewport(driver: &dyn BrowserDriver, viewport: Viewport) -> Result<(), VisregError> {
    driver
        .set_window_size(WindowSize::new(viewport.width, viewport.height))
        .await?;

    let measured = driver.inner_size().await?;
    let delta = i64::from(viewport.width) - i64::from(measured.width);
    let adjusted = (i64::from(viewport.width) + delta).max(1) as u32;
    driver
        .set_window_size(WindowSize::new(adjusted, viewport.height))
        .await?;
    Ok(())
}
