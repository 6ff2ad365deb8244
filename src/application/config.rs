use crate::application::Theme;
use crate::infrastructure::{DEFAULT_BASE_URL, DEFAULT_ROVER};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use url::Url;

pub const API_KEY_VAR: &str = "NASA_API_KEY";
pub const BASE_URL_VAR: &str = "NASA_API_BASE_URL";
pub const ROVER_VAR: &str = "NASA_ROVER";
pub const TIMEOUT_VAR: &str = "NASA_TIMEOUT_SECS";
pub const DIR_VAR: &str = "NASA_EXPLORER_DIR";
pub const THEME_VAR: &str = "NASA_EXPLORER_THEME";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("No API key configured; set NASA_API_KEY or pass --api-key")]
    MissingApiKey,

    #[error("Invalid API base URL {value:?}: {source}")]
    InvalidBaseUrl {
        value: String,
        source: url::ParseError,
    },

    #[error("API base URL {0:?} cannot have paths appended")]
    UnusableBaseUrl(String),

    #[error("Invalid request timeout {0:?}, expected whole seconds")]
    InvalidTimeout(String),

    #[error("Unknown theme {0:?}, expected one of: {1}")]
    UnknownTheme(String, String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub api_base_url: Url,
    pub default_rover: String,
    pub request_timeout: Duration,
    pub log_dir: PathBuf,
    pub theme: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from any variable source. Empty values count
    /// as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let api_key = var(API_KEY_VAR).ok_or(ConfigError::MissingApiKey)?;

        let base_url = var(BASE_URL_VAR).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let api_base_url = Url::parse(&base_url).map_err(|source| ConfigError::InvalidBaseUrl {
            value: base_url.clone(),
            source,
        })?;
        if api_base_url.cannot_be_a_base() {
            return Err(ConfigError::UnusableBaseUrl(base_url));
        }

        let default_rover = var(ROVER_VAR)
            .map(|rover| normalize_rover(&rover))
            .unwrap_or_else(|| DEFAULT_ROVER.to_string());

        let request_timeout = match var(TIMEOUT_VAR) {
            Some(value) => value
                .trim()
                .parse()
                .map(Duration::from_secs)
                .map_err(|_| ConfigError::InvalidTimeout(value))?,
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        let log_dir = var(DIR_VAR).map(PathBuf::from).unwrap_or_else(|| {
            dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("nasa-explorer")
        });

        let theme = var(THEME_VAR).unwrap_or_else(|| "dark".to_string());
        validate_theme(&theme)?;

        Ok(Self {
            api_key,
            api_base_url,
            default_rover,
            request_timeout,
            log_dir,
            theme,
        })
    }
}

/// Rover names go into the request path, which the API matches in lowercase
pub fn normalize_rover(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Reject names [`Theme::by_name`] would silently map to the default
pub fn validate_theme(name: &str) -> Result<(), ConfigError> {
    let available = Theme::available_themes();
    if available.iter().any(|theme| theme.eq_ignore_ascii_case(name)) {
        Ok(())
    } else {
        Err(ConfigError::UnknownTheme(name.to_string(), available.join(", ")))
    }
}
