//! Application configuration — optional TOML file with dashboard defaults and
//! provider settings.
//!
//! ```toml
//! [defaults]
//! days = 20
//! price_min = 0.0
//! price_max = 3500.0
//! companies = ["google", "apple", "meta", "amazon"]
//!
//! [provider]
//! timeout_secs = 30
//! offline = false
//! seed = 42
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::{TickerRegistry, DEFAULT_SELECTION};
use crate::pipeline::{
    DashboardParams, Lookback, PriceRange, DEFAULT_DAYS, PRICE_CEILING, PRICE_FLOOR,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub defaults: DefaultsConfig,
    pub provider: ProviderConfig,
}

/// Initial values of the dashboard controls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DefaultsConfig {
    pub days: u32,
    pub price_min: f64,
    pub price_max: f64,
    pub companies: Vec<String>,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            days: DEFAULT_DAYS,
            price_min: PRICE_FLOOR,
            price_max: PRICE_CEILING,
            companies: DEFAULT_SELECTION.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProviderConfig {
    /// HTTP transport timeout per request.
    pub timeout_secs: u64,
    /// Use the synthetic provider instead of Yahoo Finance.
    pub offline: bool,
    /// Master seed of the synthetic provider.
    pub seed: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            offline: false,
            seed: 42,
        }
    }
}

impl ProviderConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl AppConfig {
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        if config.provider.timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "provider.timeout_secs",
                reason: "must be at least 1".into(),
            });
        }
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Load `path` if given. Without a path, load `fallback` when it exists and
    /// use built-in defaults otherwise.
    pub fn load_or_default(
        path: Option<&Path>,
        fallback: Option<&Path>,
    ) -> Result<Self, ConfigError> {
        match (path, fallback) {
            (Some(p), _) => Self::load(p),
            (None, Some(f)) if f.exists() => Self::load(f),
            _ => Ok(Self::default()),
        }
    }

    /// Validate the `[defaults]` table into dashboard parameters.
    pub fn initial_params(
        &self,
        registry: &TickerRegistry,
    ) -> Result<DashboardParams, ConfigError> {
        let d = &self.defaults;
        let days = Lookback::new(d.days).map_err(|e| ConfigError::Invalid {
            field: "defaults.days",
            reason: e.to_string(),
        })?;
        let price_range = PriceRange::new(d.price_min, d.price_max).map_err(|e| {
            ConfigError::Invalid {
                field: "defaults.price_min/price_max",
                reason: e.to_string(),
            }
        })?;
        if let Some(unknown) = d.companies.iter().find(|c| !registry.contains(c)) {
            return Err(ConfigError::Invalid {
                field: "defaults.companies",
                reason: format!("unknown company {unknown:?}"),
            });
        }
        Ok(DashboardParams {
            days,
            price_range,
            selection: d.companies.clone(),
        })
    }
}
