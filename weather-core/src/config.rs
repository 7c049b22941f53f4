use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

pub const DEFAULT_API_URL: &str = "https://api.openweathermap.org/data/2.5/forecast";
pub const DEFAULT_LANGUAGE: &str = "ua";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

pub const ENV_API_URL: &str = "WEATHER_API_URL";
pub const ENV_API_KEY: &str = "WEATHER_API_KEY";
pub const ENV_API_TOKEN: &str = "WEATHER_API_TOKEN";

/// Process-wide settings, loaded once at startup and passed down by reference.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// api_token = "..."
/// language = "ua"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// OpenWeather 5-day forecast endpoint.
    pub api_url: String,

    /// OpenWeather `appid`.
    pub api_key: Option<String>,

    /// Secret that clients must send in the `token` field.
    pub api_token: Option<String>,

    /// Value of the provider's `lang` query parameter.
    pub language: String,

    /// Upper bound for a single provider call.
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: None,
            api_token: None,
            language: DEFAULT_LANGUAGE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Load config from `path` (or the platform default), then apply environment overrides.
    ///
    /// A missing file is not an error: the defaults are used instead.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::config_file_path()?,
        };

        let mut cfg = Self::from_file(&path)?;
        cfg.apply_overrides(|key| std::env::var(key).ok());
        Ok(cfg)
    }

    /// Read a TOML config file, or return defaults if it doesn't exist yet.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Overwrite fields with values returned by `lookup` for the `WEATHER_*` variables.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.is_empty()) {
            self.api_url = url;
        }
        if let Some(key) = lookup(ENV_API_KEY).filter(|v| !v.is_empty()) {
            self.api_key = Some(key);
        }
        if let Some(token) = lookup(ENV_API_TOKEN).filter(|v| !v.is_empty()) {
            self.api_token = Some(token);
        }
    }

    /// Path to the default config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-task", "weather-server")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// OpenWeather API key, required to reach the provider.
    pub fn api_key(&self) -> Result<&str> {
        self.api_key.as_deref().filter(|k| !k.is_empty()).ok_or_else(|| {
            anyhow!(
                "No OpenWeather API key configured.\n\
                 Hint: set `api_key` in the config file or export {ENV_API_KEY}."
            )
        })
    }

    /// Token clients must present, required to serve requests.
    pub fn api_token(&self) -> Result<&str> {
        self.api_token.as_deref().filter(|t| !t.is_empty()).ok_or_else(|| {
            anyhow!(
                "No API token configured.\n\
                 Hint: set `api_token` in the config file or export {ENV_API_TOKEN}."
            )
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
