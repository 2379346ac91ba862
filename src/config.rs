use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Result, SwitcherError};
use crate::platform::QualificationRules;
use crate::ranking::RankOptions;

/// Engine configuration, read from a YAML file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwitcherConfig {
    pub ranking: RankOptions,
    pub filter: QualificationRules,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl SwitcherConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&contents)
    }

    /// Load `path`, or fall back to defaults when it does not exist
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::warn!("Config {} not found, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: SwitcherConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let RankOptions {
            title_weight,
            path_weight,
            ..
        } = self.ranking;

        for (name, weight) in [("title_weight", title_weight), ("path_weight", path_weight)] {
            if !weight.is_finite() || weight < 0.0 {
                return Err(SwitcherError::Config(format!(
                    "ranking.{} must be a non-negative number, got {}",
                    name, weight
                )));
            }
        }

        if title_weight + path_weight <= 0.0 {
            return Err(SwitcherError::Config(
                "ranking weights must not both be zero".to_string(),
            ));
        }

        if self.filter.min_window_area < 0 {
            return Err(SwitcherError::Config(format!(
                "filter.min_window_area must be >= 0, got {}",
                self.filter.min_window_area
            )));
        }

        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
            other => Err(SwitcherError::Config(format!("Invalid log level: {}", other))),
        }
    }
}
