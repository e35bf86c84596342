use crate::core::path::{config_file, ensure_dir};
use crate::core::{KilnError, KilnResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// User-level settings, stored as YAML in the Kiln home directory
///
/// Per-package release settings live in Cargo.toml instead, see
/// [`crate::package::manifest::ReleaseSettings`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Timeout for each HTTP request, in seconds
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,

    /// User-Agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Token for private repositories (the GITHUB_TOKEN environment variable
    /// takes precedence)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_token: Option<String>,
}

fn default_http_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    "kiln".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http_timeout_secs: default_http_timeout_secs(),
            user_agent: default_user_agent(),
            github_token: None,
        }
    }
}

impl Config {
    /// Load config from the platform-specific config directory, creating a
    /// default one if it doesn't exist
    ///
    /// Config locations:
    /// - Windows: %APPDATA%\kiln\config.yaml
    /// - Linux: ~/.config/kiln/config.yaml
    /// - macOS: ~/Library/Application Support/kiln/config.yaml
    pub fn load() -> KilnResult<Self> {
        let config_path = config_file()?;

        if !config_path.exists() {
            let config = Self::default();
            config.save_to(&config_path)?;
            return Ok(config);
        }

        Self::load_from(&config_path)
    }

    /// Load config from an explicit path
    pub fn load_from(path: &Path) -> KilnResult<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| KilnError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(config)
    }

    /// Save config to an explicit path
    pub fn save_to(&self, path: &Path) -> KilnResult<()> {
        let config_dir = path
            .parent()
            .ok_or_else(|| KilnError::Path("Invalid config path".to_string()))?;
        ensure_dir(config_dir)?;

        let content = serde_yaml::to_string(self)
            .map_err(|e| KilnError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, content)?;
        Ok(())
    }

    /// Token to authenticate with, if any
    pub fn github_token(&self) -> Option<String> {
        std::env::var("GITHUB_TOKEN")
            .ok()
            .filter(|t| !t.is_empty())
            .or_else(|| self.github_token.clone())
    }
}
