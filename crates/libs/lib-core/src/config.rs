//! # Application Configuration
//!
//! This module manages gateway configuration loaded from environment variables.
//! All configuration is validated on startup to fail fast if misconfigured.
//!
//! There is no global instance: the binary builds one [`Config`] at process
//! start and hands it to the server, which stores it in the router state.
//!
//! ```rust,no_run
//! use lib_core::Config;
//!
//! let config = Config::from_env().expect("configuration");
//! config.validate().expect("valid configuration");
//! ```

use chrono::Duration;
use lib_utils::envs::{get_env, get_env_or, get_env_parse_or};

/// Deployment environment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "production" | "prod" => Environment::Production,
            _ => Environment::Development,
        }
    }
}

/// Gateway configuration loaded from environment variables.
#[derive(Clone, Debug)]
pub struct Config {
    /// Base URL of the platform backend, without trailing slash
    pub backend_url: String,

    /// Secret key for session token signing and verification
    ///
    /// **Must be at least 32 characters long** for security.
    pub session_secret: String,

    /// Session token lifetime in minutes
    pub session_max_age_minutes: i64,

    /// Minutes before expiry during which a session may be refreshed
    pub session_refresh_window_minutes: i64,

    /// Timeout applied to every backend call
    pub backend_timeout_secs: u64,

    pub environment: Environment,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, String> {
        let backend_url = get_env("BACKEND_URL")
            .map_err(|_| "BACKEND_URL must be set in environment")?
            .trim()
            .trim_end_matches('/')
            .to_string();

        let session_secret = get_env("SESSION_SECRET")
            .map_err(|_| "SESSION_SECRET must be set in environment")?;

        let session_max_age_minutes = get_env_parse_or("SESSION_MAX_AGE_MINUTES", 15)
            .map_err(|_| "SESSION_MAX_AGE_MINUTES must be a valid number")?;

        let session_refresh_window_minutes = get_env_parse_or("SESSION_REFRESH_WINDOW_MINUTES", 5)
            .map_err(|_| "SESSION_REFRESH_WINDOW_MINUTES must be a valid number")?;

        let backend_timeout_secs = get_env_parse_or("BACKEND_TIMEOUT_SECS", 15)
            .map_err(|_| "BACKEND_TIMEOUT_SECS must be a valid number")?;

        let environment = Environment::parse(&get_env_or("APP_ENV", "development"));

        Ok(Self {
            backend_url,
            session_secret,
            session_max_age_minutes,
            session_refresh_window_minutes,
            backend_timeout_secs,
            environment,
        })
    }

    /// Validate configuration values against security and business rules.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.backend_url.starts_with("http://") || self.backend_url.starts_with("https://")) {
            return Err("BACKEND_URL must be an http(s) URL".to_string());
        }

        if self.session_secret.len() < 32 {
            return Err("SESSION_SECRET must be at least 32 characters long".to_string());
        }

        if self.session_max_age_minutes < 1 || self.session_max_age_minutes > 1440 {
            return Err("SESSION_MAX_AGE_MINUTES must be between 1 and 1440".to_string());
        }

        if self.session_refresh_window_minutes < 0
            || self.session_refresh_window_minutes >= self.session_max_age_minutes
        {
            return Err(
                "SESSION_REFRESH_WINDOW_MINUTES must be non-negative and shorter than the session lifetime"
                    .to_string(),
            );
        }

        if self.backend_timeout_secs == 0 {
            return Err("BACKEND_TIMEOUT_SECS must be greater than zero".to_string());
        }

        Ok(())
    }

    pub fn session_max_age(&self) -> Duration {
        Duration::minutes(self.session_max_age_minutes)
    }

    pub fn session_refresh_window(&self) -> Duration {
        Duration::minutes(self.session_refresh_window_minutes)
    }

    pub fn backend_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.backend_timeout_secs)
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }
}
