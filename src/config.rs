use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::constants::DEFAULT_USER_AGENT;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for {name}: {message}")]
    InvalidValue { name: String, message: String },
    #[error("failed to parse {name} as integer: {source}")]
    ParseInt {
        name: String,
        #[source]
        source: std::num::ParseIntError,
    },
}

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Backend
    pub base_url: Url,
    pub http_timeout: Duration,
    pub user_agent: String,
    pub login_path: String,

    // Feed pagination
    pub page_size: u64,
    pub scroll_offset_px: u32,
    pub scroll_debounce: Duration,
    pub slow_warning: Duration,

    // Headless viewport
    pub auto_scroll_interval: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if required environment variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            // Backend
            base_url: parse_url("YELLS_BASE_URL", &required_env("YELLS_BASE_URL")?)?,
            http_timeout: Duration::from_secs(parse_env_u64("YELLS_HTTP_TIMEOUT_SECS", 30)?),
            user_agent: env_or_default("YELLS_USER_AGENT", DEFAULT_USER_AGENT),
            login_path: env_or_default("YELLS_LOGIN_PATH", "/login"),

            // Feed pagination
            page_size: parse_env_u64("YELLS_PAGE_SIZE", 15)?,
            scroll_offset_px: parse_env_u32("YELLS_SCROLL_OFFSET_PX", 100)?,
            scroll_debounce: Duration::from_millis(parse_env_u64("YELLS_SCROLL_DEBOUNCE_MS", 500)?),
            slow_warning: Duration::from_secs(parse_env_u64("YELLS_SLOW_WARNING_SECS", 7)?),

            // Headless viewport
            auto_scroll_interval: Duration::from_millis(parse_env_u64("YELLS_AUTO_SCROLL_MS", 250)?),
        })
    }

    /// Configuration pointing at `base_url` with every other value at its default.
    #[must_use]
    pub fn for_testing(base_url: Url) -> Self {
        Self {
            base_url,
            http_timeout: Duration::from_secs(10),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            login_path: "/login".to_string(),
            page_size: 15,
            scroll_offset_px: 100,
            scroll_debounce: Duration::from_millis(500),
            slow_warning: Duration::from_secs(7),
            auto_scroll_interval: Duration::from_millis(250),
        }
    }

    /// Validate that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !matches!(self.base_url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidValue {
                name: "YELLS_BASE_URL".to_string(),
                message: format!("scheme must be http or https, got '{}'", self.base_url.scheme()),
            });
        }
        if self.base_url.host_str().is_none() {
            return Err(ConfigError::InvalidValue {
                name: "YELLS_BASE_URL".to_string(),
                message: "must include a host".to_string(),
            });
        }
        if self.page_size == 0 {
            return Err(ConfigError::InvalidValue {
                name: "YELLS_PAGE_SIZE".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if !self.login_path.starts_with('/') {
            return Err(ConfigError::InvalidValue {
                name: "YELLS_LOGIN_PATH".to_string(),
                message: "must be an absolute path".to_string(),
            });
        }
        Ok(())
    }
}

fn required_env(name: &str) -> Result<String, ConfigError> {
    std::env::var(name)
        .ok()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
}

fn env_or_default(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_url(name: &str, value: &str) -> Result<Url, ConfigError> {
    Url::parse(value).map_err(|e| ConfigError::InvalidValue {
        name: name.to_string(),
        message: e.to_string(),
    })
}

fn parse_env_u64(name: &str, default: u64) -> Result<u64, ConfigError> {
    match std::env::var(name) {
        Ok(val) if !val.is_empty() => val.parse().map_err(|e| ConfigError::ParseInt {
            name: name.to_string(),
            source: e,
        }),
        _ => Ok(default),
    }
}

fn parse_env_u32(name: &str, default: u32) -> Result<u32, ConfigError> {
    match std::env::var(name) {
        Ok(val) if !val.is_empty() => val.parse().map_err(|e| ConfigError::ParseInt {
            name: name.to_string(),
            source: e,
        }),
        _ => Ok(default),
    }
}
