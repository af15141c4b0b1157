//
//  confluence-client
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! Loads and saves the `cfl` configuration: which gateway to discover the
//! tenant through, an optional fixed API root, HTTP client settings and where
//! to find the access token.
//!
//! ## Configuration File Location
//!
//! - **Linux**: `~/.config/cfl/config.toml`
//! - **macOS**: `~/Library/Application Support/cfl/config.toml`
//! - **Windows**: `C:\Users\<User>\AppData\Roaming\cfl\config\config.toml`
//!
//! The `CFL_CONFIG` environment variable points at a different file.
//!
//! ## Example Configuration File
//!
//! ```toml
//! [api]
//! gateway_url = "https://api.atlassian.com"
//! api_root = "https://api.atlassian.com/ex/confluence/abc123/api/v2"
//! timeout_secs = 30
//!
//! [auth]
//! token_env = "CONFLUENCE_ACCESS_TOKEN"
//! ```
//!
//! ## Precedence
//!
//! Command-line flags, then `CFL_GATEWAY_URL` / `CFL_API_ROOT`, then the
//! file, then built-in defaults.
//!
//! ## Submodules
//!
//! - [`file`]: Low-level configuration file I/O operations

mod file;

pub use file::*;

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::api::resolver::DEFAULT_GATEWAY_URL;

/// Environment variable overriding the config file location.
pub const CONFIG_PATH_ENV: &str = "CFL_CONFIG";
/// Environment variable overriding `api.gateway_url`.
pub const GATEWAY_URL_ENV: &str = "CFL_GATEWAY_URL";
/// Environment variable overriding `api.api_root`.
pub const API_ROOT_ENV: &str = "CFL_API_ROOT";

/// Keys accepted by [`Config::get`] and [`Config::set`].
pub const KEYS: &[&str] = &[
    "api.gateway_url",
    "api.api_root",
    "api.timeout_secs",
    "api.user_agent",
    "auth.token_env",
];

/// Global configuration container.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub auth: AuthConfig,
}

/// Where and how the client talks to Confluence.
///
/// # Default Values
///
/// | Field | Default |
/// |-------|---------|
/// | `gateway_url` | `https://api.atlassian.com` |
/// | `api_root` | `None` (discovered) |
/// | `timeout_secs` | `30` |
/// | `user_agent` | `None` (`cfl/<version>`) |
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiConfig {
    /// Provider gateway serving discovery and tenant API roots.
    #[serde(default = "default_gateway_url")]
    pub gateway_url: String,

    /// Fixed API root. When set, discovery never runs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_root: Option<String>,

    /// Per-request timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

fn default_gateway_url() -> String {
    DEFAULT_GATEWAY_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            gateway_url: default_gateway_url(),
            api_root: None,
            timeout_secs: default_timeout_secs(),
            user_agent: None,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn user_agent(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(|| format!("{}/{}", crate::APP_NAME, crate::VERSION))
    }
}

/// Where the access token comes from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthConfig {
    /// Name of the environment variable holding the bearer token.
    #[serde(default = "default_token_env")]
    pub token_env: String,
}

fn default_token_env() -> String {
    "CONFLUENCE_ACCESS_TOKEN".to_string()
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_env: default_token_env(),
        }
    }
}

impl Config {
    /// Loads configuration from the default location, then applies
    /// environment overrides.
    ///
    /// A missing file is not an error; defaults are used.
    ///
    /// # Errors
    ///
    /// Fails if the file exists but cannot be read or is not valid TOML for
    /// this schema.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        let mut config = Self::load_from(&path)?;
        config.apply_env(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Loads configuration from `path` without environment overrides.
    pub fn load_from(path: &Path) -> Result<Self> {
        let config: Self = match read_config_file(path)? {
            Some(content) => toml::from_str(&content)
                .with_context(|| format!("Invalid configuration in {}", path.display()))?,
            None => return Ok(Self::default()),
        };
        if config.api.timeout_secs == 0 {
            anyhow::bail!(
                "Invalid configuration in {}: api.timeout_secs must be at least 1",
                path.display()
            );
        }
        Ok(config)
    }

    /// Applies `CFL_GATEWAY_URL` and `CFL_API_ROOT` through `lookup`.
    ///
    /// Empty values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(gateway) = lookup(GATEWAY_URL_ENV).filter(|v| !v.is_empty()) {
            tracing::debug!("Gateway URL taken from {}", GATEWAY_URL_ENV);
            self.api.gateway_url = gateway;
        }
        if let Some(root) = lookup(API_ROOT_ENV).filter(|v| !v.is_empty()) {
            tracing::debug!("API root taken from {}", API_ROOT_ENV);
            self.api.api_root = Some(root);
        }
    }

    /// Saves the configuration to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Saves the configuration as pretty TOML, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;
        write_config_file(path, &content)
    }

    /// Returns the path to the configuration file.
    ///
    /// `CFL_CONFIG` wins over the platform directory. The file may not exist.
    pub fn config_path() -> Result<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_PATH_ENV).filter(|p| !p.is_empty()) {
            return Ok(PathBuf::from(path));
        }
        let dirs = ProjectDirs::from("", "", crate::APP_NAME)
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Gets a value by dotted key.
    ///
    /// Returns `None` for unknown keys and unset optional values.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use confluence_client::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.get("api.timeout_secs"), Some("30".to_string()));
    /// assert_eq!(config.get("api.api_root"), None);
    /// assert_eq!(config.get("unknown"), None);
    /// ```
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "api.gateway_url" => Some(self.api.gateway_url.clone()),
            "api.api_root" => self.api.api_root.clone(),
            "api.timeout_secs" => Some(self.api.timeout_secs.to_string()),
            "api.user_agent" => self.api.user_agent.clone(),
            "auth.token_env" => Some(self.auth.token_env.clone()),
            _ => None,
        }
    }

    /// Sets a value by dotted key.
    ///
    /// An empty value clears optional keys. Returns `Ok(false)` for unknown
    /// keys. Changes persist only after [`Config::save`].
    ///
    /// # Errors
    ///
    /// Fails when the value does not fit the key, e.g. a non-numeric timeout.
    pub fn set(&mut self, key: &str, value: &str) -> Result<bool> {
        let optional = |v: &str| (!v.is_empty()).then(|| v.to_string());

        match key {
            "api.gateway_url" => {
                if value.is_empty() {
                    anyhow::bail!("api.gateway_url cannot be empty");
                }
                self.api.gateway_url = value.trim_end_matches('/').to_string();
            }
            "api.api_root" => self.api.api_root = optional(value),
            "api.timeout_secs" => {
                let secs: u64 = value
                    .parse()
                    .with_context(|| format!("api.timeout_secs must be a number, got '{}'", value))?;
                if secs == 0 {
                    anyhow::bail!("api.timeout_secs must be at least 1");
                }
                self.api.timeout_secs = secs;
            }
            "api.user_agent" => self.api.user_agent = optional(value),
            "auth.token_env" => {
                if value.is_empty() {
                    anyhow::bail!("auth.token_env cannot be empty");
                }
                self.auth.token_env = value.to_string();
            }
            _ => return Ok(false),
        }
        Ok(true)
    }
}
