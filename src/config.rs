//! Service configuration.
//!
//! Settings are read from an optional JSON file (path in `NEWTAB_CONFIG`),
//! then individual environment variables override single fields. A missing
//! file means defaults; a malformed one is an error.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::platform;
use crate::services::favicon_resolver::{default_user_agent, ResolverSettings};
use crate::types::errors::ConfigError;

pub const ENV_CONFIG_PATH: &str = "NEWTAB_CONFIG";
pub const ENV_PORT: &str = "NEWTAB_PORT";
pub const ENV_BIND: &str = "NEWTAB_BIND";
pub const ENV_DATABASE: &str = "NEWTAB_DB";

/// File name of the database inside the data directory.
pub const DATABASE_FILE_NAME: &str = "identifier.sqlite";

/// Runtime configuration for the newtab server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub bind_address: String,
    pub port: u16,
    pub database_path: PathBuf,
    /// Per-fetch timeout for favicon discovery, in milliseconds.
    pub favicon_timeout_ms: u64,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 8080,
            database_path: platform::get_data_dir().join(DATABASE_FILE_NAME),
            favicon_timeout_ms: 1500,
            user_agent: default_user_agent(),
        }
    }
}

impl Config {
    /// Loads configuration from the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match std::env::var(ENV_CONFIG_PATH) {
            Ok(path) if !path.is_empty() => Self::from_file(path)?,
            _ => Self::from_file(platform::get_config_dir().join("config.json"))?,
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Reads a JSON config file. A file that does not exist yields defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Applies `NEWTAB_PORT`, `NEWTAB_BIND` and `NEWTAB_DB` from `lookup`.
    /// Empty values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(port) = get(ENV_PORT) {
            self.port = port.trim().parse().map_err(|_| ConfigError::InvalidOverride {
                key: ENV_PORT.to_string(),
                value: port.clone(),
            })?;
        }
        if let Some(bind) = get(ENV_BIND) {
            self.bind_address = bind.trim().to_string();
        }
        if let Some(db) = get(ENV_DATABASE) {
            self.database_path = PathBuf::from(db);
        }
        Ok(())
    }

    /// `host:port` the listener binds to.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }

    /// Settings for the favicon resolver derived from this config.
    pub fn resolver_settings(&self) -> ResolverSettings {
        ResolverSettings {
            timeout: Duration::from_millis(self.favicon_timeout_ms),
            user_agent: self.user_agent.clone(),
            ..ResolverSettings::default()
        }
    }
}
