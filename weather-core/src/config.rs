use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::{locale::Locale, provider::openweather};

/// Environment variable holding the chat platform token.
pub const TOKEN_ENV: &str = "API_TOKEN";
/// Environment variable holding the weather provider key.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

pub const DEFAULT_TELEGRAM_BASE_URL: &str = "https://api.telegram.org";

/// Bot configuration, read once at start-up.
///
/// Example TOML:
/// ```toml
/// telegram_token = "123:abc"
/// openweather_api_key = "..."
/// language = "ru"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub telegram_token: Option<String>,
    pub openweather_api_key: Option<String>,
    pub language: Locale,
    /// Timeout for each weather provider call.
    pub request_timeout_secs: u64,
    /// Long-poll wait passed to `getUpdates`.
    pub poll_timeout_secs: u64,
    pub openweather_base_url: String,
    pub telegram_base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            telegram_token: None,
            openweather_api_key: None,
            language: Locale::default(),
            request_timeout_secs: openweather::DEFAULT_TIMEOUT.as_secs(),
            poll_timeout_secs: 30,
            openweather_base_url: openweather::DEFAULT_BASE_URL.to_string(),
            telegram_base_url: DEFAULT_TELEGRAM_BASE_URL.to_string(),
        }
    }
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-bot", "weather-bot")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Override secrets with the process environment.
    pub fn apply_env(self) -> Self {
        self.apply_overrides(std::env::var(TOKEN_ENV).ok(), std::env::var(API_KEY_ENV).ok())
    }

    fn apply_overrides(mut self, token: Option<String>, api_key: Option<String>) -> Self {
        if let Some(token) = token.filter(|t| !t.trim().is_empty()) {
            self.telegram_token = Some(token);
        }
        if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
            self.openweather_api_key = Some(key);
        }
        self
    }

    /// Check everything the bot needs to run and hand back the chat token.
    pub fn validate(&self) -> Result<&str> {
        let token = self.telegram_token.as_deref().ok_or_else(|| {
            anyhow!(
                "No chat token configured.\n\
                 Hint: set {TOKEN_ENV} or run `weather-bot configure`."
            )
        })?;
        if self.openweather_api_key.is_none() {
            return Err(anyhow!(
                "No OpenWeather API key configured.\n\
                 Hint: set {API_KEY_ENV} or run `weather-bot configure`."
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(anyhow!("request_timeout_secs must be greater than zero."));
        }
        Ok(token)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
