//! Trail configuration
//!
//! Fixed at startup. Every field has a serde default so a config file only
//! needs to name what it overrides.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Errors raised while building a trail
#[derive(Error, Debug)]
pub enum TrailError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Result type for trail operations
pub type TrailResult<T> = Result<T, TrailError>;

/// Which position a point chases within a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChainMode {
    /// Chase the predecessor's position after it moved this frame
    #[default]
    CurrentFrame,
    /// Chase the predecessor's position from the end of the previous frame
    PreviousFrame,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrailConfig {
    /// Number of trail points
    pub length: usize,
    /// Fraction of the remaining distance covered per frame, in (0, 1]
    pub ease_factor: f64,
    /// Hue of the head point in degrees (any value, taken modulo 360)
    pub hue_start: f64,
    /// Hue offset between neighbouring points
    pub hue_step: f64,
    /// Added to the starting hue after every frame
    pub hue_drift: f64,
    /// Target frame period in milliseconds
    pub frame_interval_ms: u64,
    pub chain_mode: ChainMode,
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            length: 14,
            ease_factor: 0.45,
            hue_start: 0.0,
            hue_step: 5.0,
            hue_drift: 0.0,
            frame_interval_ms: 16,
            chain_mode: ChainMode::CurrentFrame,
        }
    }
}

impl TrailConfig {
    /// Load and validate a JSON config file
    pub fn from_file(path: impl AsRef<Path>) -> TrailResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: TrailConfig = serde_json::from_str(&content)?;
        config.validate()?;

        tracing::debug!("Loaded trail config from {}", path.as_ref().display());
        Ok(config)
    }

    pub fn validate(&self) -> TrailResult<()> {
        if self.length == 0 {
            return Err(TrailError::InvalidConfig(
                "trail length must be at least 1".to_string(),
            ));
        }
        if !self.ease_factor.is_finite() || self.ease_factor <= 0.0 || self.ease_factor > 1.0 {
            return Err(TrailError::InvalidConfig(format!(
                "ease factor must be in (0, 1], got {}",
                self.ease_factor
            )));
        }
        for (name, value) in [
            ("hue start", self.hue_start),
            ("hue step", self.hue_step),
            ("hue drift", self.hue_drift),
        ] {
            if !value.is_finite() {
                return Err(TrailError::InvalidConfig(format!(
                    "{} must be finite, got {}",
                    name, value
                )));
            }
        }
        if self.frame_interval_ms == 0 {
            return Err(TrailError::InvalidConfig(
                "frame interval must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }
}
