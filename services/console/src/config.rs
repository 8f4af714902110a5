//! services/console/src/config.rs
//!
//! Defines the console's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing the environment variable {0}")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub api_base_url: String,
    pub log_level: Level,
    pub page_size: u32,
    pub sibling_count: u32,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination.
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        let api_base_url = std::env::var("API_BASE_URL")
            .map_err(|_| ConfigError::MissingVar("API_BASE_URL".to_string()))?;

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let page_size_str = std::env::var("PAGE_SIZE").unwrap_or_else(|_| "10".to_string());
        let page_size = page_size_str.parse::<u32>().ok().filter(|size| *size > 0).ok_or_else(
            || {
                ConfigError::InvalidValue(
                    "PAGE_SIZE".to_string(),
                    format!("'{}' is not a positive page size", page_size_str),
                )
            },
        )?;

        let sibling_count_str =
            std::env::var("SIBLING_COUNT").unwrap_or_else(|_| "1".to_string());
        let sibling_count = sibling_count_str.parse::<u32>().map_err(|_| {
            ConfigError::InvalidValue(
                "SIBLING_COUNT".to_string(),
                format!("'{}' is not a valid sibling count", sibling_count_str),
            )
        })?;

        // --- Optional non-interactive login credentials ---
        let email = std::env::var("CONSOLE_EMAIL").ok();
        let password = std::env::var("CONSOLE_PASSWORD").ok();

        Ok(Self {
            api_base_url,
            log_level,
            page_size,
            sibling_count,
            email,
            password,
        })
    }
}
