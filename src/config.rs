//! Fixture configuration.
//!
//! All recognized options live in one explicit struct with typed fields;
//! the string boundary ([`Config::apply_option`]) is the only place where
//! untyped values enter, and it rejects unknown keys instead of storing
//! arbitrary entries. Harness integrations forward their flags (or the
//! `VISREG_*` environment, see [`Config::from_env`]) through that boundary.

use std::env;
use std::path::PathBuf;

use diff_engines::EngineKind;
use serde::{Deserialize, Serialize};

use crate::errors::VisregError;
use crate::geometry::Viewport;

pub const DEFAULT_BASELINE_DIR: &str = "./screenshots/baseline";
pub const DEFAULT_OUTPUT_DIR: &str = "./screenshots";

/// Environment variables mapped through the option boundary, in
/// `(variable, option key)` pairs.
const ENV_OPTIONS: &[(&str, &str)] = &[
    ("VISREG_BASELINE_DIR", "baseline_dir"),
    ("VISREG_OUTPUT_DIR", "output_dir"),
    ("VISREG_VIEWPORT_SIZE", "viewport_size"),
    ("VISREG_SAVE_BASELINE", "save_baseline"),
    ("VISREG_CLEANUP_ON_SUCCESS", "cleanup_on_success"),
    ("VISREG_ENGINE", "engine"),
];

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Where accepted reference screenshots live.
    pub baseline_dir: PathBuf,
    /// Where fresh captures and diff artifacts are written.
    pub output_dir: PathBuf,
    /// Logical viewport the window is fitted to at construction.
    pub viewport: Viewport,
    /// Record baselines instead of comparing against them.
    pub save_baseline: bool,
    /// Delete the fresh capture after a successful comparison.
    pub cleanup_on_success: bool,
    /// Which diff engine judges dissimilarity.
    pub engine: EngineKind,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            baseline_dir: PathBuf::from(DEFAULT_BASELINE_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            viewport: Viewport::DEFAULT,
            save_baseline: false,
            cleanup_on_success: false,
            engine: EngineKind::default(),
        }
    }
}

impl Config {
    /// Defaults overridden by whichever `VISREG_*` variables are set.
    pub fn from_env() -> Result<Self, VisregError> {
        let mut config = Self::default();
        for &(variable, key) in ENV_OPTIONS {
            if let Ok(value) = env::var(variable) {
                config.apply_option(key, &value)?;
            }
        }
        Ok(config)
    }

    /// Set one option from its string form. Unknown keys are rejected;
    /// recognized keys validate their value shape. A malformed
    /// `viewport_size` is the one documented exception: it falls back to
    /// the 1024x768 default rather than erroring.
    pub fn apply_option(&mut self, key: &str, value: &str) -> Result<(), VisregError> {
        match key {
            "baseline_dir" => self.baseline_dir = PathBuf::from(value),
            "output_dir" => self.output_dir = PathBuf::from(value),
            "viewport_size" => self.viewport = Viewport::parse_or_default(value),
            "save_baseline" => self.save_baseline = parse_bool(key, value)?,
            "cleanup_on_success" => self.cleanup_on_success = parse_bool(key, value)?,
            "engine" => {
                self.engine = value.parse().map_err(|_| VisregError::InvalidOption {
                    key: key.to_string(),
                    value: value.to_string(),
                })?
            }
            unknown => return Err(VisregError::UnknownOption(unknown.to_string())),
        }
        Ok(())
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, VisregError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(VisregError::InvalidOption {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}
