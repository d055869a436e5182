//! Configuration loaded from environment variables.

use std::env;
use std::net::SocketAddr;
use std::str::FromStr;

use mail_tools::MailMode;

/// API server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address.
    pub addr: SocketAddr,
    /// SQLite database URL.
    pub database_url: String,
    /// Which mail provider set to run with.
    pub mail_mode: MailMode,
    /// Gmail API base URL override, if any.
    pub gmail_api_url: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `API_PORT` / `PORT` | Server port (`API_PORT` wins) | `3000` |
    /// | `DATABASE_URL` | SQLite database URL | `sqlite:echo.db?mode=rwc` |
    /// | `MAIL_MODE` | `mock` or `gmail` | `mock` |
    /// | `GMAIL_API_URL` | Gmail API base URL override | (none) |
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = env::var("API_PORT")
            .or_else(|_| env::var("PORT"))
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;
        let addr = SocketAddr::from(([0, 0, 0, 0], port));

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:echo.db?mode=rwc".to_string());

        let mail_mode = match env::var("MAIL_MODE") {
            Ok(raw) => MailMode::from_str(&raw).map_err(|_| ConfigError::InvalidMailMode(raw))?,
            Err(_) => MailMode::Mock,
        };

        let gmail_api_url = env::var("GMAIL_API_URL").ok();

        Ok(Self {
            addr,
            database_url,
            mail_mode,
            gmail_api_url,
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid API_PORT/PORT value")]
    InvalidPort,

    #[error("Invalid MAIL_MODE value: {0} (expected mock or gmail)")]
    InvalidMailMode(String),
}
