//! Browser automation seam for the visreg fixture.
//!
//! This crate exposes the trait the comparison pipeline wires against. A
//! concrete implementation wraps whatever automation layer drives the real
//! browser (WebDriver, CDP, a scripted stub in tests); the fixture only
//! cares about the handful of operations declared on [`BrowserDriver`].

use async_trait::async_trait;

pub mod error;
pub mod model;

pub use error::{AdapterError, AdapterErrorKind};
pub use model::{ElementHandle, ElementRect, WindowSize};

/// Operations the comparison pipeline requires from a browser session.
///
/// Every method maps to a single blocking round-trip to the automation
/// layer; implementations must not cache screenshot or geometry responses,
/// because window and image sizes can change between calls.
#[async_trait]
pub trait BrowserDriver: Send + Sync {
    /// URL of the page currently loaded in the driven browser.
    async fn current_url(&self) -> Result<String, AdapterError>;

    /// Navigate the browser to `url` and wait for the load to settle.
    async fn navigate(&self, url: &str) -> Result<(), AdapterError>;

    /// Raw screenshot of the full viewport as an encoded PNG blob.
    async fn screenshot_png(&self) -> Result<Vec<u8>, AdapterError>;

    /// Outer window size in logical pixels.
    async fn window_size(&self) -> Result<WindowSize, AdapterError>;

    /// Resize the outer window.
    async fn set_window_size(&self, size: WindowSize) -> Result<(), AdapterError>;

    /// Move the window to an absolute screen position.
    async fn set_window_position(&self, x: i32, y: i32) -> Result<(), AdapterError>;

    /// Document client area in logical pixels, measured inside the page.
    ///
    /// Differs from [`window_size`](Self::window_size) by the browser
    /// chrome (scrollbars, toolbars); used to fit the viewport exactly.
    async fn inner_size(&self) -> Result<WindowSize, AdapterError>;

    /// All elements matching a CSS selector, with their layout rectangles.
    ///
    /// An empty result is a valid answer, not an error; callers decide
    /// whether zero matches matter.
    async fn find_elements(&self, selector: &str) -> Result<Vec<ElementHandle>, AdapterError>;
}
