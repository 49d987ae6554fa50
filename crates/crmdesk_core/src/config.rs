//! Runtime configuration.
//!
//! # Responsibility
//! - Describe simulated latency, logging and seed source in one value.
//! - Load it from an optional JSON file, then apply environment overrides.
//!
//! # Invariants
//! - A missing config file is not an error; defaults apply.
//! - Environment overrides always win over file values.

use crate::logging::default_log_level;
use crate::repo::Latency;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const ENV_LOG_LEVEL: &str = "CRMDESK_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "CRMDESK_LOG_DIR";
pub const ENV_SEED_PATH: &str = "CRMDESK_SEED_PATH";
pub const ENV_LATENCY_SCALE: &str = "CRMDESK_LATENCY_SCALE";

#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    InvalidOverride {
        key: &'static str,
        value: String,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "invalid config `{}`: {source}", path.display())
            }
            Self::InvalidOverride { key, value } => {
                write!(f, "invalid value `{value}` for {key}")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::InvalidOverride { .. } => None,
        }
    }
}

/// Simulated delays in milliseconds per operation class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatencyConfig {
    pub list_ms: u64,
    pub read_ms: u64,
    pub write_ms: u64,
    pub delete_ms: u64,
}

impl Default for LatencyConfig {
    fn default() -> Self {
        let mock = Latency::mock_network();
        Self {
            list_ms: mock.list.as_millis() as u64,
            read_ms: mock.read.as_millis() as u64,
            write_ms: mock.write.as_millis() as u64,
            delete_ms: mock.delete.as_millis() as u64,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrmConfig {
    pub latency: LatencyConfig,
    /// Multiplier over `latency`; 0 disables simulated delay.
    pub latency_scale: f64,
    pub log_level: String,
    /// Absolute directory for rolling log files; stderr when unset.
    pub log_dir: Option<PathBuf>,
    /// Seed dataset; the builtin dataset when unset.
    pub seed_path: Option<PathBuf>,
}

impl Default for CrmConfig {
    fn default() -> Self {
        Self {
            latency: LatencyConfig::default(),
            latency_scale: 1.0,
            log_level: default_log_level().to_string(),
            log_dir: None,
            seed_path: None,
        }
    }
}

impl CrmConfig {
    /// Reads `path` if it exists, then applies process environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) if path.exists() => Self::from_file(path)?,
            _ => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Applies overrides from `lookup`; empty values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(level) = get(ENV_LOG_LEVEL) {
            self.log_level = level;
        }
        if let Some(dir) = get(ENV_LOG_DIR) {
            self.log_dir = Some(PathBuf::from(dir));
        }
        if let Some(seed) = get(ENV_SEED_PATH) {
            self.seed_path = Some(PathBuf::from(seed));
        }
        if let Some(scale) = get(ENV_LATENCY_SCALE) {
            self.latency_scale = scale
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite() && *value >= 0.0)
                .ok_or(ConfigError::InvalidOverride {
                    key: ENV_LATENCY_SCALE,
                    value: scale,
                })?;
        }
        Ok(())
    }

    /// Effective store latency after scaling.
    pub fn latency(&self) -> Latency {
        Latency {
            list: Duration::from_millis(self.latency.list_ms),
            read: Duration::from_millis(self.latency.read_ms),
            write: Duration::from_millis(self.latency.write_ms),
            delete: Duration::from_millis(self.latency.delete_ms),
        }
        .scaled(self.latency_scale)
    }
}
