//! Error taxonomy surfaced by browser driver implementations.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// High-level failure categories a driver can report.
#[derive(Clone, Debug, Error, Serialize, Deserialize)]
pub enum AdapterErrorKind {
    #[error("navigation failed")]
    NavFailed,
    #[error("screenshot capture failed")]
    ScreenshotFailed,
    #[error("window operation failed")]
    WindowOp,
    #[error("driver i/o failure")]
    DriverIo,
    #[error("invalid selector")]
    InvalidSelector,
    #[error("internal error")]
    Internal,
}

/// Driver error with optional human-readable context.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AdapterError {
    pub kind: AdapterErrorKind,
    pub hint: Option<String>,
}

impl fmt::Display for AdapterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if let Some(hint) = &self.hint {
            write!(f, ": {}", hint)?;
        }
        Ok(())
    }
}

impl std::error::Error for AdapterError {}

impl AdapterError {
    pub fn new(kind: AdapterErrorKind) -> Self {
        Self { kind, hint: None }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_hint() {
        let err = AdapterError::new(AdapterErrorKind::ScreenshotFailed)
            .with_hint("session closed");
        assert_eq!(err.to_string(), "screenshot capture failed: session closed");
    }

    #[test]
    fn display_without_hint_is_kind_only() {
        let err = AdapterError::new(AdapterErrorKind::DriverIo);
        assert_eq!(err.to_string(), "driver i/o failure");
    }
}
