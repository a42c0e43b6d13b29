//! visreg - visual regression testing fixture for browser automation.
//!
//! This crate captures a screenshot of a driven browser viewport (or a
//! sub-region of it), compares the capture against a stored baseline
//! image, and raises a structured mismatch error when the two differ
//! beyond a threshold. It is meant to be wrapped by a test-harness
//! integration; the browser itself is reached through the
//! [`BrowserDriver`] trait and dissimilarity judgment is delegated to a
//! pluggable [`diff_engines::DiffEngine`].
//!
//! Typical flow:
//!
//! ```no_run
//! # async fn demo(driver: std::sync::Arc<dyn visreg::BrowserDriver>) -> Result<(), visreg::VisregError> {
//! use visreg::{Config, VisualTester};
//!
//! let tester = VisualTester::new(driver, Config::from_env()?).await?;
//! tester.assert_screenshot("home", None, 0.0, &[]).await?;
//! # Ok(())
//! # }
//! ```

pub mod capture;
pub mod config;
pub mod errors;
pub mod geometry;
pub mod store;
pub mod tester;

pub use browser_adapter::{
    AdapterError, AdapterErrorKind, BrowserDriver, ElementHandle, ElementRect, WindowSize,
};
pub use capture::ScreenshotCapture;
pub use config::Config;
pub use diff_engines::{DiffEngine, EngineError, EngineKind};
pub use errors::VisregError;
pub use geometry::{device_pixel_ratio, Region, Viewport};
pub use store::BaselineStore;
pub use tester::{Target, VisualTester};
