//! Form configuration types.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::visibility::ErrorDisplayStrategy;

/// Per-form configuration.
///
/// Defines the accessibility behavior shared by every field of a form.
/// Deserializes from JSON with every key optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// When blocking errors become visible.
    pub strategy: ErrorDisplayStrategy,

    /// Mark fields touched when they lose focus.
    pub touch_on_blur: bool,

    /// Prefix for generated element ids (`{prefix}-{field}-error`, ...).
    pub id_prefix: String,

    /// Fraction of a character limit at which the count starts being
    /// announced to assistive technology.
    pub character_count_threshold: f32,

    /// Reference warnings from `aria-describedby`.
    pub announce_warnings: bool,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            strategy: ErrorDisplayStrategy::OnTouch,
            touch_on_blur: true,
            id_prefix: "af".to_string(),
            character_count_threshold: 0.8,
            announce_warnings: true,
        }
    }
}

impl FormConfig {
    /// Create a config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the error display strategy.
    pub fn strategy(mut self, strategy: ErrorDisplayStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Leave touch marking to the caller.
    pub fn manual_touch(mut self) -> Self {
        self.touch_on_blur = false;
        self
    }

    /// Set the id prefix.
    pub fn id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.id_prefix = prefix.into();
        self
    }

    /// Set the character count announcement threshold (clamped to 0..=1).
    pub fn character_count_threshold(mut self, threshold: f32) -> Self {
        self.character_count_threshold = threshold.clamp(0.0, 1.0);
        self
    }

    /// Keep warnings out of `aria-describedby`.
    pub fn quiet_warnings(mut self) -> Self {
        self.announce_warnings = false;
        self
    }

    /// Parse a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()
    }

    /// Read and parse a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        log::debug!("Loading form config from {}", path.display());
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if !(0.0..=1.0).contains(&self.character_count_threshold) {
            return Err(ConfigError::Threshold(self.character_count_threshold));
        }
        Ok(self)
    }
}
