//! Library configuration
//!
//! Loaded from a TOML file and/or environment variables:
//!
//! ```toml
//! [registry]
//! max_handles = 4096   # optional; unbounded when absent
//!
//! [demo]
//! start = 0
//! trigger = 3
//! pings = 11
//! ```
//!
//! `PINGPONG_CONFIG` names a file to load; `PINGPONG_MAX_HANDLES` sets a
//! limit on live counters afterwards.

use crate::errors::ConfigError;
use crate::ffi::MAX_HANDLES;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub registry: RegistryConfig,

    #[serde(default)]
    pub demo: DemoConfig,
}

/// Handle table settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Opt-in limit on live counters; `None` leaves only the handle
    /// encoding limit
    #[serde(default)]
    pub max_handles: Option<usize>,
}

/// Demo driver defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemoConfig {
    #[serde(default)]
    pub start: i32,

    #[serde(default = "default_trigger")]
    pub trigger: i32,

    #[serde(default = "default_pings")]
    pub pings: u32,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            start: 0,
            trigger: default_trigger(),
            pings: default_pings(),
        }
    }
}

fn default_trigger() -> i32 { 3 }
fn default_pings() -> u32 { 11 }

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(&content)
    }

    /// Parse configuration from a TOML string
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Build configuration from the environment
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = match std::env::var_os("PINGPONG_CONFIG") {
            Some(path) => Self::load(Path::new(&path))?,
            None => Self::default(),
        };

        if let Ok(value) = std::env::var("PINGPONG_MAX_HANDLES") {
            let limit = value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue {
                    key: "PINGPONG_MAX_HANDLES",
                    value: value.clone(),
                })?;
            config.registry.max_handles = Some(limit);
        }

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        match self.registry.max_handles {
            Some(limit) if limit == 0 || limit > MAX_HANDLES => Err(ConfigError::InvalidValue {
                key: "registry.max_handles",
                value: limit.to_string(),
            }),
            _ => Ok(()),
        }
    }
}
