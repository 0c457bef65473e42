//! Top-level application configuration.
//!
//! Configuration is stored in `pickaihub.yaml` and includes:
//! - Catalog API base URL and optional bearer token
//! - Request timeout
//! - Catalog page size
//! - Live search tolerance threshold
//!
//! Environment variables `PICKAIHUB_API_URL` and `PICKAIHUB_TOKEN` override
//! the file values, so CI and one-off invocations need no config file.

use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::PAGE_SIZE;

pub const CONFIG_FILE: &str = "pickaihub.yaml";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the catalog API (default: http://localhost:3000)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Authentication for favorites access
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<ApiAuth>,

    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,

    /// Catalog page size (default: 20)
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Live search configuration
    #[serde(default, skip_serializing_if = "SearchConfig::is_default")]
    pub search: SearchConfig,
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_page_size() -> u32 {
    PAGE_SIZE
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            auth: None,
            request_timeout: default_request_timeout(),
            page_size: default_page_size(),
            search: SearchConfig::default(),
        }
    }
}

/// Bearer token for the favorites endpoints
#[derive(Clone, Serialize, Deserialize)]
pub struct ApiAuth {
    pub token: String,
}

impl fmt::Debug for ApiAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiAuth")
            .field("token", &"[REDACTED]")
            .finish()
    }
}

/// Live search configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Match tolerance: 0.0 requires exact substrings, 1.0 matches anything
    #[serde(default = "default_search_threshold")]
    pub threshold: f64,
}

fn default_search_threshold() -> f64 {
    0.4
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            threshold: default_search_threshold(),
        }
    }
}

impl SearchConfig {
    /// Check if this config has default values (for serialization skip)
    pub fn is_default(&self) -> bool {
        self.threshold == default_search_threshold()
    }
}

impl Config {
    /// Path of the config file in the current directory
    pub fn config_path() -> PathBuf {
        PathBuf::from(CONFIG_FILE)
    }

    /// Load configuration from the default location, or return defaults if
    /// no file exists. Environment overrides are applied either way.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = fs::read_to_string(path)?;
            serde_yaml_ng::from_str(&content)?
        } else {
            Config::default()
        };
        config.apply_env_overrides();
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(url) = env::var("PICKAIHUB_API_URL")
            && !url.is_empty()
        {
            self.base_url = url;
        }
        if let Ok(token) = env::var("PICKAIHUB_TOKEN")
            && !token.is_empty()
        {
            self.auth = Some(ApiAuth { token });
        }
    }
}
