//! Shared test support: a scripted driver serving canned screenshots.
#![allow(dead_code)]

use std::collections::HashMap;
use std::io::Cursor;
use std::sync::{Mutex, Once};

use async_trait::async_trait;
use browser_adapter::{
    AdapterError, BrowserDriver, ElementHandle, ElementRect, WindowSize,
};
use image::{ImageOutputFormat, Rgb, RgbImage};

static TRACING: Once = Once::new();

/// Route fixture logs to the test output when `RUST_LOG` asks for them.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Driver double backed by a canned PNG. Window operations behave like a
/// chromeless browser: the document client area equals the window.
pub struct StubDriver {
    screenshot: Mutex<Vec<u8>>,
    window: Mutex<WindowSize>,
    elements: HashMap<String, Vec<ElementHandle>>,
    url: Mutex<String>,
}

impl StubDriver {
    pub fn new(screenshot: &RgbImage) -> Self {
        Self {
            screenshot: Mutex::new(encode_png(screenshot)),
            window: Mutex::new(WindowSize::new(0, 0)),
            elements: HashMap::new(),
            url: Mutex::new("about:blank".to_string()),
        }
    }

    pub fn with_elements(mut self, selector: &str, rects: &[ElementRect]) -> Self {
        self.elements.insert(
            selector.to_string(),
            rects.iter().copied().map(ElementHandle::new).collect(),
        );
        self
    }

    pub fn set_screenshot(&self, image: &RgbImage) {
        *self.screenshot.lock().unwrap() = encode_png(image);
    }
}

#[async_trait]
impl BrowserDriver for StubDriver {
    async fn current_url(&self) -> Result<String, AdapterError> {
        Ok(self.url.lock().unwrap().clone())
    }

    async fn navigate(&self, url: &str) -> Result<(), AdapterError> {
        *self.url.lock().unwrap() = url.to_string();
        Ok(())
    }

    async fn screenshot_png(&self) -> Result<Vec<u8>, AdapterError> {
        Ok(self.screenshot.lock().unwrap().clone())
    }

    async fn window_size(&self) -> Result<WindowSize, AdapterError> {
        Ok(*self.window.lock().unwrap())
    }

    async fn set_window_size(&self, size: WindowSize) -> Result<(), AdapterError> {
        *self.window.lock().unwrap() = size;
        Ok(())
    }

    async fn set_window_position(&self, _x: i32, _y: i32) -> Result<(), AdapterError> {
        Ok(())
    }

    async fn inner_size(&self) -> Result<WindowSize, AdapterError> {
        Ok(*self.window.lock().unwrap())
    }

    async fn find_elements(&self, selector: &str) -> Result<Vec<ElementHandle>, AdapterError> {
        Ok(self.elements.get(selector).cloned().unwrap_or_default())
    }
}

pub fn encode_png(image: &RgbImage) -> Vec<u8> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png)
        .expect("png encode");
    bytes
}

pub fn solid(width: u32, height: u32, color: [u8; 3]) -> RgbImage {
    RgbImage::from_pixel(width, height, Rgb(color))
}

pub fn rect(x: f64, y: f64, width: f64, height: f64) -> ElementRect {
    ElementRect {
        x,
        y,
        width,
        height,
    }
}
