//! # Runtime Configuration
//!
//! Settings that affect routing behaviour at runtime, loaded from a YAML
//! file and/or environment variables.
//!
//! ## Environment Variables
//!
//! - `VERBROUTER_METHOD_OVERRIDE_FIELD`: name of the POST form field carrying
//!   an emulated method (default `_method`)
//! - `VERBROUTER_LOG_LEVEL`, `VERBROUTER_LOG_FORMAT`,
//!   `VERBROUTER_LOG_TARGET_FILTER`, `VERBROUTER_LOG_INCLUDE_LOCATION`: see
//!   [`LogConfig`](crate::logging::LogConfig)
//!
//! ## YAML
//!
//! ```yaml
//! method_override_field: _verb
//! log:
//!   log_level: debug
//!   format: pretty
//! ```
//!
//! Environment variables win over the file.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;
use std::path::Path;

use crate::logging::LogConfig;
use crate::method::METHOD_OVERRIDE_FIELD;

fn default_override_field() -> String {
    METHOD_OVERRIDE_FIELD.to_string()
}

/// Router runtime configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Form field a POST may use to emulate another method
    pub method_override_field: String,
    pub log: LogConfig,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            method_override_field: default_override_field(),
            log: LogConfig::default(),
        }
    }
}

impl RouterConfig {
    /// Defaults overridden by environment variables
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().merge_env()
    }

    /// Parse YAML; missing keys take their defaults
    ///
    /// # Errors
    ///
    /// Malformed YAML or an empty override field name.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml).context("Failed to parse router config")?;
        config.validate()
    }

    /// Load a YAML file, then apply environment overrides
    ///
    /// # Errors
    ///
    /// Unreadable file, malformed YAML or an empty override field name.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_yaml_str(&yaml)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        config.merge_env().validate()
    }

    #[must_use]
    fn merge_env(mut self) -> Self {
        if let Ok(field) = env::var("VERBROUTER_METHOD_OVERRIDE_FIELD") {
            self.method_override_field = field;
        }
        self.log = self.log.merge_env();
        self
    }

    fn validate(self) -> Result<Self> {
        anyhow::ensure!(
            !self.method_override_field.trim().is_empty(),
            "method_override_field must not be empty"
        );
        Ok(self)
    }
}
