//! Configuration for the synthesis engine
//!
//! TOML-backed configuration with serde defaults and environment variable
//! overrides. The only tunable surface today is the metric classifier: the
//! allow-list of binary-state metric names that should be treated as
//! up/down gauges even though their names carry no `_up` suffix.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Top-level engine configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct EngineConfig {
    /// Metric classifier settings
    #[serde(default)]
    pub classifier: ClassifierConfig,
}

/// Metric classifier configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClassifierConfig {
    /// Metric names classified as binary up/down state regardless of suffix
    #[serde(default = "default_binary_metric_names")]
    pub binary_metric_names: Vec<String>,
}

fn default_binary_metric_names() -> Vec<String> {
    vec!["up".to_string(), "probe_success".to_string()]
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            binary_metric_names: default_binary_metric_names(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::Configuration(format!("Failed to read config file {}: {}", path, e))
        })?;

        let config: Self = toml::from_str(&contents).map_err(|e| {
            Error::Configuration(format!("Failed to parse config file {}: {}", path, e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load defaults with environment variable overrides applied
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env_overrides();
        config
    }

    /// Apply environment variable overrides
    ///
    /// `PROMQL_SYNTH_BINARY_METRICS` is a comma-separated list replacing the
    /// binary-state allow-list.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(names) = std::env::var("PROMQL_SYNTH_BINARY_METRICS") {
            self.classifier.binary_metric_names = names
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        for name in &self.classifier.binary_metric_names {
            if name.trim().is_empty() {
                return Err(Error::Configuration(
                    "binary metric allow-list entries cannot be empty".to_string(),
                ));
            }
        }
        Ok(())
    }
}
