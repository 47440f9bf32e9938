//! Configuration for the Auth API service.

use rollcall_auth_core::AuthConfig;
use std::time::Duration;

/// Auth API configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub http_port: u16,

    /// Database URL
    pub database_url: String,

    /// Maximum database connections in the pool
    pub db_max_connections: u32,

    /// Auth core configuration
    pub auth: AuthConfig,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;

        let http_port = std::env::var("HTTP_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("HTTP_PORT"))?;

        let db_max_connections = std::env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("DB_MAX_CONNECTIONS"))?;

        // Shared signing secret (minimum 32 bytes), validated once at startup
        let token_secret =
            std::env::var("TOKEN_SECRET").map_err(|_| ConfigError::Missing("TOKEN_SECRET"))?;

        let access_ttl_hours: u64 = std::env::var("ACCESS_TTL_HOURS")
            .unwrap_or_else(|_| "12".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("ACCESS_TTL_HOURS"))?;

        let refresh_ttl_days: u64 = std::env::var("REFRESH_TTL_DAYS")
            .unwrap_or_else(|_| "7".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("REFRESH_TTL_DAYS"))?;

        let invite_ttl_days: u64 = std::env::var("INVITE_TTL_DAYS")
            .unwrap_or_else(|_| "365".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("INVITE_TTL_DAYS"))?;

        let reset_ttl_minutes: u64 = std::env::var("RESET_TTL_MINUTES")
            .unwrap_or_else(|_| "60".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("RESET_TTL_MINUTES"))?;

        let auth = AuthConfig::new(token_secret)
            .map_err(|e| ConfigError::AuthConfig(e.to_string()))?
            .with_access_ttl(Duration::from_secs(access_ttl_hours * 3600))
            .with_refresh_ttl(Duration::from_secs(refresh_ttl_days * 24 * 3600))
            .with_invite_ttl(Duration::from_secs(invite_ttl_days * 24 * 3600))
            .with_reset_ttl(Duration::from_secs(reset_ttl_minutes * 60));

        Ok(Self {
            http_port,
            database_url,
            db_max_connections,
            auth,
        })
    }
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),

    #[error("Auth config error: {0}")]
    AuthConfig(String),
}
