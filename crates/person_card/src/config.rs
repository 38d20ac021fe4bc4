//! Person Card configuration
//!
//! Config file: ~/.config/person-card/config.toml or /etc/person-card/config.toml

use crate::card::FallbackPolicy;
use crate::image_probe::ImageConfig;
use crate::searx::SearxConfig;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Overrides the search endpoint
pub const ENV_SEARX_URL: &str = "PERSON_CARD_SEARX_URL";

/// Set to "1" to disable the search backend
pub const ENV_OFFLINE: &str = "PERSON_CARD_OFFLINE";

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Default tracing filter; RUST_LOG takes precedence
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Main configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardConfig {
    #[serde(default)]
    pub search: SearxConfig,

    #[serde(default)]
    pub fallback: FallbackPolicy,

    #[serde(default)]
    pub image: ImageConfig,

    #[serde(default)]
    pub log: LogConfig,
}

impl CardConfig {
    /// User config path: $XDG_CONFIG_HOME/person-card/config.toml
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("person-card").join("config.toml"))
    }

    /// System config path: /etc/person-card/config.toml
    pub fn system_config_path() -> PathBuf {
        PathBuf::from("/etc/person-card/config.toml")
    }

    /// Load configuration
    ///
    /// Priority:
    /// 1. User config
    /// 2. System config
    /// 3. Defaults
    ///
    /// Environment overrides are applied on top.
    pub fn load() -> Result<Self> {
        let mut config = match Self::user_config_path().filter(|p| p.exists()) {
            Some(user_path) => Self::load_from(&user_path)?,
            None => {
                let system_path = Self::system_config_path();
                if system_path.exists() {
                    Self::load_from(&system_path)?
                } else {
                    debug!("No config file found, using defaults");
                    Self::default()
                }
            }
        };

        config.apply_env();
        Ok(config)
    }

    /// Load from an explicit path (no environment overrides)
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config = Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }

    /// Apply environment overrides
    pub fn apply_env(&mut self) {
        self.apply_overrides(
            std::env::var(ENV_SEARX_URL).ok(),
            std::env::var(ENV_OFFLINE).ok(),
        );
    }

    fn apply_overrides(&mut self, searx_url: Option<String>, offline: Option<String>) {
        if let Some(url) = searx_url.filter(|u| !u.trim().is_empty()) {
            self.search.endpoint = url;
        }
        if offline.as_deref() == Some("1") {
            self.search.enabled = false;
        }
    }
}
