//! Application configuration management.
//!
//! This module handles loading and saving the dashboard configuration,
//! which includes the backend URL, the statistics poll interval, an optional
//! request timeout and the UI locale.
//!
//! Configuration is stored at `~/.config/studybot-dashboard/config.json`.
//! Environment variables (`STUDYBOT_URL`, `STUDYBOT_POLL_SECS`,
//! `STUDYBOT_LOCALE`) take precedence over the file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::locale::Locale;

/// Application name used for config/log directory paths
const APP_NAME: &str = "studybot-dashboard";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Backend the bot's web server listens on by default
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// Statistics are refreshed every 30 seconds unless configured otherwise
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 30;

const ENV_URL: &str = "STUDYBOT_URL";
const ENV_POLL_SECS: &str = "STUDYBOT_POLL_SECS";
const ENV_LOCALE: &str = "STUDYBOT_LOCALE";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub base_url: String,
    pub poll_interval_secs: u64,
    pub request_timeout_secs: Option<u64>,
    pub locale: Locale,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
            request_timeout_secs: None,
            locale: Locale::default(),
        }
    }
}

impl Config {
    /// Load the config file (or defaults) and apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&Self::config_path()?)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Read a config file, falling back to defaults when it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_json::from_str(&contents).context("Failed to parse config file")
    }

    /// Write the config to its standard location and return that path
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }

    /// Apply overrides from a variable lookup. Invalid values are logged and ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_URL).filter(|u| !u.trim().is_empty()) {
            self.base_url = url.trim().to_string();
        }

        if let Some(secs) = lookup(ENV_POLL_SECS) {
            match secs.trim().parse::<u64>() {
                Ok(secs) => self.poll_interval_secs = secs,
                Err(e) => warn!(value = %secs, error = %e, "Ignoring invalid poll interval"),
            }
        }

        if let Some(locale) = lookup(ENV_LOCALE) {
            match locale.parse::<Locale>() {
                Ok(locale) => self.locale = locale,
                Err(e) => warn!(value = %locale, error = %e, "Ignoring invalid locale"),
            }
        }
    }

    /// Poll interval, never shorter than one second
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.max(1))
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Directory for log files
    pub fn log_dir(&self) -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.poll_interval(), Duration::from_secs(30));
        assert!(config.request_timeout().is_none());
        assert_eq!(config.locale, Locale::Arabic);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config.apply_overrides(lookup(&[
            (ENV_URL, "https://bot.example.org "),
            (ENV_POLL_SECS, "10"),
            (ENV_LOCALE, "en"),
        ]));

        assert_eq!(config.base_url, "https://bot.example.org");
        assert_eq!(config.poll_interval_secs, 10);
        assert_eq!(config.locale, Locale::English);
    }

    #[test]
    fn test_invalid_overrides_ignored() {
        let mut config = Config::default();
        config.apply_overrides(lookup(&[
            (ENV_URL, "   "),
            (ENV_POLL_SECS, "soon"),
            (ENV_LOCALE, "klingon"),
        ]));

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.poll_interval_secs, DEFAULT_POLL_INTERVAL_SECS);
        assert_eq!(config.locale, Locale::Arabic);
    }

    #[test]
    fn test_zero_poll_interval_clamped() {
        let config = Config {
            poll_interval_secs: 0,
            ..Config::default()
        };
        assert_eq!(config.poll_interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_partial_config_file_uses_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"locale": "en", "request_timeout_secs": 15}"#).expect("parse");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.locale, Locale::English);
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(15)));
    }

    #[test]
    fn test_save_then_load_from_file() {
        let dir = std::env::temp_dir().join(format!("{}-test-{}", APP_NAME, std::process::id()));
        let path = dir.join(CONFIG_FILE);
        let config = Config {
            base_url: "https://bot.example.org".to_string(),
            poll_interval_secs: 12,
            request_timeout_secs: Some(5),
            locale: Locale::English,
        };

        config.save_to(&path).expect("save");
        let loaded = Config::load_from(&path).expect("load");
        std::fs::remove_dir_all(&dir).expect("cleanup");

        assert_eq!(loaded.base_url, "https://bot.example.org");
        assert_eq!(loaded.poll_interval_secs, 12);
        assert_eq!(loaded.request_timeout_secs, Some(5));
        assert_eq!(loaded.locale, Locale::English);
    }

    #[test]
    fn test_load_from_missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("studybot-dashboard-no-such-dir").join(CONFIG_FILE);
        let config = Config::load_from(&path).expect("load");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }
}
