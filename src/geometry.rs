//! Logical-pixel geometry and device-pixel-ratio math.

use std::str::FromStr;

use browser_adapter::{ElementRect, WindowSize};
use serde::{Deserialize, Serialize};

/// Logical viewport dimensions. Always positive.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub const DEFAULT: Viewport = Viewport {
        width: 1024,
        height: 768,
    };

    /// Parse a `"WxH"` string (case-insensitive separator, optional
    /// whitespace around it). Zero or malformed dimensions yield `None`.
    pub fn parse(input: &str) -> Option<Self> {
        let (width, height) = input.trim().split_once(['x', 'X'])?;
        let width: u32 = width.trim().parse().ok()?;
        let height: u32 = height.trim().parse().ok()?;
        if width == 0 || height == 0 {
            return None;
        }
        Some(Self { width, height })
    }

    /// Parse with the documented fallback: malformed input resolves to the
    /// 1024x768 default instead of failing.
    pub fn parse_or_default(input: &str) -> Self {
        Self::parse(input).unwrap_or(Self::DEFAULT)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl FromStr for Viewport {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Self::parse(input).ok_or_else(|| format!("invalid viewport size: {input}"))
    }
}

impl From<(u32, u32)> for Viewport {
    fn from((width, height): (u32, u32)) -> Self {
        Self { width, height }
    }
}

/// Element rectangle in logical (CSS) pixel space.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub top: u32,
    pub left: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub fn new(top: u32, left: u32, width: u32, height: u32) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    /// Map every coordinate into raw-image pixel space.
    pub fn scaled(self, ratio: u32) -> Self {
        Self {
            top: self.top * ratio,
            left: self.left * ratio,
            width: self.width * ratio,
            height: self.height * ratio,
        }
    }
}

impl From<ElementRect> for Region {
    /// Driver rectangles come back as floats; coordinates truncate and
    /// negative positions (elements scrolled out of view) clamp to zero.
    fn from(rect: ElementRect) -> Self {
        Self {
            top: rect.y.max(0.0) as u32,
            left: rect.x.max(0.0) as u32,
            width: rect.width.max(0.0) as u32,
            height: rect.height.max(0.0) as u32,
        }
    }
}

/// Scale factor between logical pixels and raw screenshot pixels:
/// `max(ceil(raw_w / win_w), ceil(raw_h / win_h))`, never below 1.
///
/// Recomputed on every capture; window and image sizes can both change
/// between calls.
pub fn device_pixel_ratio(raw_width: u32, raw_height: u32, window: WindowSize) -> u32 {
    if window.width == 0 || window.height == 0 {
        return 1;
    }
    let horizontal = (f64::from(raw_width) / f64::from(window.width)).ceil() as u32;
    let vertical = (f64::from(raw_height) / f64::from(window.height)).ceil() as u32;
    horizontal.max(vertical).max(1)
}
