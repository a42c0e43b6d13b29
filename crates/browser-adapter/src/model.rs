//! Geometry models reported by the automation layer.

use serde::{Deserialize, Serialize};

/// Outer window or document client dimensions in logical pixels.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct WindowSize {
    pub width: u32,
    pub height: u32,
}

impl WindowSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Element layout rectangle as reported by the driver, in logical pixels.
///
/// Position and size come back as floats from most automation layers;
/// consumers truncate when they need integer pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ElementRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Handle to one located element.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ElementHandle {
    pub rect: ElementRect,
}

impl ElementHandle {
    pub fn new(rect: ElementRect) -> Self {
        Self { rect }
    }
}
