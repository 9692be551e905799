//! User configuration loaded from `~/.lookout/config.yaml`

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_CHARACTER_API_URL, DEFAULT_PRODUCT_LIMIT,
    DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_STORE_API_URL,
};
use crate::messages::ui_events::AppTab;

/// Settings read once at startup. Every field is optional in the file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub character_api_url: String,
    pub store_api_url: String,
    /// Page-size hint for the product list; `null` fetches the unparameterized list
    pub product_limit: Option<usize>,
    pub request_timeout_secs: u64,
    pub start_tab: AppTab,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            character_api_url: String::from(DEFAULT_CHARACTER_API_URL),
            store_api_url: String::from(DEFAULT_STORE_API_URL),
            product_limit: Some(DEFAULT_PRODUCT_LIMIT),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            start_tab: AppTab::Characters,
        }
    }
}

impl Config {
    /// Default location of the config file
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Load from the default location, falling back to defaults if absent
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        if content.trim().is_empty() {
            return Ok(Config::default());
        }

        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        Ok(config)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}
