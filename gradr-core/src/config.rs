//! Configuration management for gradr
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (GRADR_*)
//! 3. Config file (~/.config/gradr/config.toml)
//! 4. Default values
//!
//! Credentials never live here; see [`crate::Secrets`].

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// GitHub REST API settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// Base URL of the REST API
    pub api_url: String,

    /// Per-request timeout for contents listings
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,

    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.github.com".to_string(),
            timeout: Duration::from_secs(30),
            user_agent: "gradr".to_string(),
        }
    }
}

/// Chat-completion endpoint settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CompletionConfig {
    /// Base URL of an OpenAI-compatible API
    pub api_url: String,

    /// Model identifier sent with each completion
    pub model: String,

    /// Per-request timeout for a completion
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4-turbo".to_string(),
            timeout: Duration::from_secs(120),
        }
    }
}

/// HTTP endpoint settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the review endpoint listens on
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8000".to_string(),
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub github: GitHubConfig,
    pub completion: CompletionConfig,
    pub server: ServerConfig,
}

/// Overrides taken from the command line
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub github_api_url: Option<String>,
    pub completion_api_url: Option<String>,
    pub model: Option<String>,
    pub bind: Option<String>,
}

impl Config {
    /// Load configuration from the default config file location
    ///
    /// Returns default config if file doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();

        if let Some(path) = config_path {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &PathBuf) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(Error::Io)?;
        toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
    }

    /// Get the default config file path
    ///
    /// Returns `~/.config/gradr/config.toml` on Unix
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("gradr").join("config.toml"))
    }

    /// Apply environment variable overrides
    ///
    /// Supported variables:
    /// - GRADR_GITHUB_API_URL: GitHub REST base URL
    /// - GRADR_COMPLETION_API_URL: chat-completion base URL
    /// - GRADR_MODEL: completion model
    /// - GRADR_BIND: review endpoint address
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(ConfigOverrides {
            github_api_url: std::env::var("GRADR_GITHUB_API_URL").ok(),
            completion_api_url: std::env::var("GRADR_COMPLETION_API_URL").ok(),
            model: std::env::var("GRADR_MODEL").ok(),
            bind: std::env::var("GRADR_BIND").ok(),
        })
    }

    /// Apply explicit overrides, ignoring unset and blank values
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        fn set(target: &mut String, value: Option<String>) {
            if let Some(v) = value.filter(|v| !v.trim().is_empty()) {
                *target = v;
            }
        }

        set(&mut self.github.api_url, overrides.github_api_url);
        set(&mut self.completion.api_url, overrides.completion_api_url);
        set(&mut self.completion.model, overrides.model);
        set(&mut self.server.bind, overrides.bind);

        self
    }

    /// Load configuration with all overrides applied
    ///
    /// Priority: CLI > env > config file > defaults
    pub fn load_with_overrides(overrides: ConfigOverrides) -> Result<Self> {
        Ok(Self::load()?.with_env_overrides().with_overrides(overrides))
    }
}
