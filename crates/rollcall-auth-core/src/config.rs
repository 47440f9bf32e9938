//! Configuration types for the auth core

use std::time::Duration;

/// Auth core configuration
///
/// The signing secret is a process-wide value injected at startup; it is
/// validated here once rather than read ad hoc.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Shared HS256 secret signing all four token kinds
    pub token_secret: String,
    /// Access token lifetime
    pub access_ttl: Duration,
    /// Refresh token lifetime
    pub refresh_ttl: Duration,
    /// Invite token lifetime (long-lived)
    pub invite_ttl: Duration,
    /// Password reset token lifetime
    pub reset_ttl: Duration,
}

impl AuthConfig {
    /// Minimum allowed secret length in bytes (256 bits)
    pub const MIN_SECRET_LENGTH: usize = 32;

    /// Create a new auth config with default lifetimes
    ///
    /// # Errors
    /// Returns an error if the secret is shorter than 32 bytes.
    pub fn new(token_secret: impl Into<String>) -> Result<Self, AuthConfigError> {
        let token_secret = token_secret.into();
        if token_secret.len() < Self::MIN_SECRET_LENGTH {
            return Err(AuthConfigError::SecretTooShort {
                actual: token_secret.len(),
                minimum: Self::MIN_SECRET_LENGTH,
            });
        }

        Ok(Self {
            token_secret,
            access_ttl: Duration::from_secs(12 * 60 * 60),
            refresh_ttl: Duration::from_secs(7 * 24 * 60 * 60),
            invite_ttl: Duration::from_secs(365 * 24 * 60 * 60),
            reset_ttl: Duration::from_secs(60 * 60),
        })
    }

    /// Set the access token lifetime
    pub fn with_access_ttl(mut self, ttl: Duration) -> Self {
        self.access_ttl = ttl;
        self
    }

    /// Set the refresh token lifetime
    pub fn with_refresh_ttl(mut self, ttl: Duration) -> Self {
        self.refresh_ttl = ttl;
        self
    }

    /// Set the invite token lifetime
    pub fn with_invite_ttl(mut self, ttl: Duration) -> Self {
        self.invite_ttl = ttl;
        self
    }

    /// Set the reset token lifetime
    pub fn with_reset_ttl(mut self, ttl: Duration) -> Self {
        self.reset_ttl = ttl;
        self
    }
}

/// Errors that can occur when building an auth config
#[derive(Debug, Clone, thiserror::Error)]
pub enum AuthConfigError {
    #[error("token secret too short: got {actual} bytes, need at least {minimum}")]
    SecretTooShort { actual: usize, minimum: usize },
}
