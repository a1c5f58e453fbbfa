//! Client configuration
//!
//! Settings live in a JSON file, by default `~/.coursedesk/config.json`.
//! Every field has a default, so a partial file (or none at all) is fine.
//! `COURSEDESK_API_URL` overrides the base URL after the file is read.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tokio::fs;

const CONFIG_FILE: &str = "config.json";

/// Environment variable overriding [`ClientConfig::base_url`]
pub const API_URL_ENV: &str = "COURSEDESK_API_URL";

/// Upper bound for request timeouts
const MAX_TIMEOUT_SECS: u64 = 300;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),

    #[error("Cannot determine home directory")]
    NoHomeDir,
}

/// Connection settings for the course API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientConfig {
    /// Root of the course API, e.g. `https://api.example.com/v1`
    pub base_url: String,

    /// Per-request timeout
    pub timeout_secs: u64,

    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:4000/api".to_string(),
            timeout_secs: 30,
            user_agent: format!("coursedesk/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        let url = self.base_url.trim();
        if url.is_empty() {
            return Err("base_url cannot be empty".to_string());
        }

        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(format!(
                "base_url must start with http:// or https://, got '{}'",
                url
            ));
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        if self.timeout_secs > MAX_TIMEOUT_SECS {
            return Err(format!(
                "timeout_secs cannot exceed {}",
                MAX_TIMEOUT_SECS
            ));
        }

        if self.user_agent.trim().is_empty() {
            return Err("user_agent cannot be empty".to_string());
        }

        Ok(())
    }

    /// Apply environment overrides using a custom lookup
    ///
    /// Split out from [`Self::apply_env_overrides`] so tests don't have to
    /// mutate the process environment.
    pub fn apply_env_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(API_URL_ENV).filter(|url| !url.trim().is_empty()) {
            tracing::info!("Using API URL from {}: {}", API_URL_ENV, url);
            self.base_url = url;
        }
    }

    pub fn apply_env_overrides(&mut self) {
        self.apply_env_overrides_from(|key| std::env::var(key).ok());
    }

    /// Load configuration
    ///
    /// An explicit `path` must exist. Without one, the default location is
    /// tried and a missing file yields defaults. Environment overrides are
    /// applied before validation.
    pub async fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound(path.to_path_buf()));
                }
                Self::read_from(path).await?
            }
            None => {
                let default_path = default_config_path()?;
                if default_path.exists() {
                    Self::read_from(&default_path).await?
                } else {
                    tracing::debug!("No config at {:?}, using defaults", default_path);
                    Self::default()
                }
            }
        };

        config.apply_env_overrides();
        config.validate().map_err(ConfigError::Invalid)?;
        Ok(config)
    }

    async fn read_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).await?;
        let config = serde_json::from_str(&contents)?;
        tracing::debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Write the config as pretty JSON
    ///
    /// Writes to a temp file and renames it into place so a crash never
    /// leaves a truncated file behind.
    pub async fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let serialized = serde_json::to_string_pretty(self)?;
        let mut temp_name = path.as_os_str().to_owned();
        temp_name.push(".tmp");
        let temp_file = PathBuf::from(temp_name);

        fs::write(&temp_file, serialized).await?;
        fs::rename(&temp_file, path).await?;
        Ok(())
    }
}

/// `~/.coursedesk/config.json`
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    let home_dir = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
    Ok(home_dir.join(".coursedesk").join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:4000/api");
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert!(config.user_agent.starts_with("coursedesk/"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = ClientConfig::default();

        config.base_url = "  ".to_string();
        assert!(config.validate().is_err());

        config.base_url = "localhost:4000".to_string();
        assert!(config.validate().is_err());

        config.base_url = "https://api.example.com".to_string();
        config.timeout_secs = 0;
        assert!(config.validate().is_err());

        config.timeout_secs = 301;
        assert!(config.validate().is_err());

        config.timeout_secs = 300;
        config.user_agent = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_env_override() {
        let mut config = ClientConfig::default();
        config.apply_env_overrides_from(|key| {
            (key == API_URL_ENV).then(|| "https://staging.example.com".to_string())
        });
        assert_eq!(config.base_url, "https://staging.example.com");

        // Blank values are ignored
        config.apply_env_overrides_from(|_| Some(" ".to_string()));
        assert_eq!(config.base_url, "https://staging.example.com");
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"baseUrl": "https://api.example.com"}"#).unwrap();
        assert_eq!(config.base_url, "https://api.example.com");
        assert_eq!(config.timeout_secs, 30);
    }
}
