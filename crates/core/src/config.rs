//! Client configuration
//!
//! Loads the TOML config naming the three origins the client talks to and
//! through. Origins are never defaulted or hardcoded: the identity provider
//! validates the redirect against a registered origin, so a guessed value
//! fails at the provider with no useful diagnostic here.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use url::Url;

/// Client configuration loaded from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HavenConfig {
    /// Origin serving the JSON API, e.g. `https://api.haven.example`
    pub api_origin: String,
    /// Origin of the external identity provider
    pub auth_origin: String,
    /// Origin this app is reachable at; the provider redirects back to it
    pub app_origin: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

/// Error type for config loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Config file not found: {0}")]
    ConfigNotFound(PathBuf),
    #[error("Invalid origin '{origin}': {source}")]
    InvalidOrigin {
        origin: String,
        source: url::ParseError,
    },
}

impl HavenConfig {
    /// Load from the platform config location
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::default_path())
    }

    /// Load from an explicit path
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::ConfigNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse directly from TOML content (for testing)
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: HavenConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Platform config location: `<config_dir>/haven.toml`
    pub fn default_path() -> PathBuf {
        ProjectDirs::from("dev", "onyx", "haven")
            .map(|dirs| dirs.config_dir().join("haven.toml"))
            .unwrap_or_else(|| PathBuf::from("haven.toml"))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        parse_origin(&self.api_origin)?;
        parse_origin(&self.auth_origin)?;
        parse_origin(&self.app_origin)?;
        Ok(())
    }

    /// Provider login URL carrying the redirect back into this app
    ///
    /// The redirect target is derived from `app_origin` at call time.
    pub fn login_url(&self) -> Result<Url, ConfigError> {
        let mut url = parse_origin(&self.auth_origin)?;
        let redirect = format!("{}/dashboard", self.app_origin.trim_end_matches('/'));
        url.query_pairs_mut().append_pair("redirect", &redirect);
        Ok(url)
    }
}

fn parse_origin(origin: &str) -> Result<Url, ConfigError> {
    Url::parse(origin).map_err(|source| ConfigError::InvalidOrigin {
        origin: origin.to_string(),
        source,
    })
}
