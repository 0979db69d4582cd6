//! Configuration module for the Seva portal client.
//!
//! Loads configuration from YAML files and environment variables.

use std::path::PathBuf;

use config::{Config as ConfigLoader, ConfigError, Environment, File};
use serde::Deserialize;

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub navigation: NavigationConfig,
    /// Credentials used to sign in when no session is stored.
    #[serde(default)]
    pub login: Option<LoginConfig>,
}

/// Backend API configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Versioned API root, endpoint paths are appended verbatim.
    pub base_url: String,
    /// Request timeout. Transport default when unset.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Cookie that mirrors the anti-forgery token.
    #[serde(default = "default_csrf_cookie")]
    pub csrf_cookie: String,
}

/// Session store configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// JSON file backing the persistent session store.
    pub store_path: PathBuf,
}

/// Navigation targets.
#[derive(Debug, Clone, Deserialize)]
pub struct NavigationConfig {
    /// Destination for every unauthorized or rejected flow.
    pub login_path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginConfig {
    pub username: String,
    pub password: String,
}

fn default_csrf_cookie() -> String {
    "csrftoken".to_string()
}

impl Config {
    /// Load configuration from files and environment.
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (SEVA__*)
    /// 2. config/local.yaml (if exists)
    /// 3. config/default.yaml (if exists)
    pub fn load() -> Result<Self, ConfigError> {
        let config = ConfigLoader::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(
                Environment::with_prefix("SEVA")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000/api".to_string(),
            timeout_secs: None,
            csrf_cookie: default_csrf_cookie(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(".seva/session.json"),
        }
    }
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            login_path: "/login/".to_string(),
        }
    }
}
