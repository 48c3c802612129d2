//! Deploy-time configuration for the offline cache layer.
//!
//! The pre-warm list, cache version, API prefix, and offline fallback are
//! fixed at deploy time, not at runtime. They live in a config file at
//! `~/.config/acougue-sistema/config.json`; a missing file means the
//! built-in defaults, which match what the application ships with.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Application name used for config/cache directory paths
const APP_NAME: &str = "acougue-sistema";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Cache bucket version. Bumping this is the sole mechanism for
/// invalidating every previously cached asset.
const CACHE_VERSION: &str = "1.0.0";

/// Origin the application shell is served from (the local Flask server).
const DEFAULT_ORIGIN: &str = "http://127.0.0.1:5000";

/// Path prefix of the live ledger API. Anything under it carries
/// financial data and is never cached.
const API_PREFIX: &str = "/api/";

/// Navigation fallback served when the network is gone. Must be in the
/// pre-warm set to be available offline.
const OFFLINE_FALLBACK: &str = "/offline.html";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShellConfig {
    pub origin: String,
    pub cache_version: String,
    pub precache_urls: Vec<String>,
    pub api_prefix: String,
    pub offline_fallback: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN.to_string(),
            cache_version: CACHE_VERSION.to_string(),
            precache_urls: vec![
                "/".to_string(),
                "/static/css/style.css".to_string(),
                "/static/js/main.js".to_string(),
                "/static/img/logo.png".to_string(),
                OFFLINE_FALLBACK.to_string(),
            ],
            api_prefix: API_PREFIX.to_string(),
            offline_fallback: OFFLINE_FALLBACK.to_string(),
        }
    }
}

impl ShellConfig {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            Ok(serde_json::from_str(&contents)?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Versioned bucket name, e.g. `acougue-sistema-v1.0.0`.
    pub fn cache_name(&self) -> String {
        format!("{}-v{}", APP_NAME, self.cache_version)
    }

    pub fn cache_dir(&self) -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }
}
