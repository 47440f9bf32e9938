//! Password hashing and verification
//!
//! bcrypt is CPU-bound, so both hashing and verification run on the
//! blocking thread pool; request handling on the async reactor is never
//! stalled by a credential check.

use crate::error::AuthError;

/// Minimum accepted password length
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Reject passwords below the minimum length
pub fn check_password(password: &str) -> Result<(), AuthError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::Validation(
            "password must be at least 8 characters",
        ));
    }
    Ok(())
}

/// Hash a password with bcrypt and an automatic salt
pub async fn hash_password(password: &str) -> Result<String, AuthError> {
    let password = password.to_string();
    tokio::task::spawn_blocking(move || bcrypt::hash(password, bcrypt::DEFAULT_COST))
        .await
        .map_err(|e| {
            tracing::error!("Hashing task panicked: {}", e);
            AuthError::Internal("password hashing failed".to_string())
        })?
        .map_err(|e| {
            tracing::error!("Failed to hash password: {}", e);
            AuthError::Internal("password hashing failed".to_string())
        })
}

/// Verify a password against a stored bcrypt hash
pub async fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    let password = password.to_string();
    let hash = hash.to_string();
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| {
            tracing::error!("Verification task panicked: {}", e);
            AuthError::Internal("password verification failed".to_string())
        })?
        .map_err(|e| {
            tracing::error!("Failed to verify password: {}", e);
            AuthError::Internal("password verification failed".to_string())
        })
}
