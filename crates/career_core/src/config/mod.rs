//! # Career Configuration
//!
//! Every tuning constant of the four engines lives here.
//!
//! - Presets: `realistic()` (default), `arcade()`, `hardcore()`
//! - Files: YAML (`.yaml`/`.yml`) or JSON (`.json`), chosen by extension
//! - `CAREER_CONFIG_PATH` overrides the path used by [`CareerConfig::from_env`]
//!
//! ```rust
//! use career_core::config::CareerConfig;
//!
//! let config = CareerConfig::default();
//! let arcade = CareerConfig::arcade();
//! assert!(arcade.training.base_gain > config.training.base_gain);
//! ```

mod scoring_weights;
mod season_params;
mod training_params;
mod transfer_params;

pub use scoring_weights::ScoringWeights;
pub use season_params::SeasonParams;
pub use training_params::TrainingParams;
pub use transfer_params::{ByPressure, TransferParams};

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Environment variable naming a config file
pub const CONFIG_PATH_ENV: &str = "CAREER_CONFIG_PATH";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported config extension: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid config value: {0}")]
    Invalid(String),
}

/// Full engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CareerConfig {
    #[serde(default)]
    pub training: TrainingParams,
    #[serde(default)]
    pub season: SeasonParams,
    #[serde(default)]
    pub transfer: TransferParams,
    #[serde(default)]
    pub scoring: ScoringWeights,
}

impl CareerConfig {
    pub fn realistic() -> Self {
        Self::default()
    }

    /// Faster growth, more goals, a livelier market
    pub fn arcade() -> Self {
        let mut cfg = Self::default();
        cfg.training.base_gain = 4.5;
        cfg.training.variance_min = 0.85;
        cfg.season.injury_risk = 0.06;
        cfg.season.call_up_overall = 70;
        cfg.transfer.interest_probability = ByPressure { calm: 0.5, agitating: 0.75, forced: 0.95 };
        cfg.transfer.max_offers = ByPressure { calm: 3, agitating: 5, forced: 8 };
        cfg
    }

    /// Slow growth, frequent injuries, a cautious market
    pub fn hardcore() -> Self {
        let mut cfg = Self::default();
        cfg.training.base_gain = 2.2;
        cfg.training.fatigue_threshold = 0.95;
        cfg.season.injury_risk = 0.2;
        cfg.season.selection_scale = 4.0;
        cfg.season.renewal_approval = 55;
        cfg.transfer.interest_probability = ByPressure { calm: 0.25, agitating: 0.45, forced: 0.7 };
        cfg.transfer.negotiation_ceiling = 1.1;
        cfg
    }

    /// Preset by name (`realistic`, `arcade`, `hardcore`)
    pub fn preset(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "realistic" | "default" => Some(Self::realistic()),
            "arcade" => Some(Self::arcade()),
            "hardcore" => Some(Self::hardcore()),
            _ => None,
        }
    }

    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_yaml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load a config file; the format follows the extension
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("").to_ascii_lowercase();
        let cfg = match ext.as_str() {
            "yaml" | "yml" => Self::from_yaml_str(&text)?,
            "json" => Self::from_json_str(&text)?,
            other => return Err(ConfigError::UnsupportedFormat(other.to_string())),
        };
        log::info!("Loaded career config from {}", path.display());
        Ok(cfg)
    }

    /// Config from `CAREER_CONFIG_PATH`, or the default preset when unset
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::load(path.trim()),
            _ => Ok(Self::default()),
        }
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.training.validate().map_err(ConfigError::Invalid)?;
        self.season.validate().map_err(ConfigError::Invalid)?;
        self.transfer.validate().map_err(ConfigError::Invalid)?;
        self.scoring.validate().map_err(ConfigError::Invalid)?;
        Ok(())
    }
}
