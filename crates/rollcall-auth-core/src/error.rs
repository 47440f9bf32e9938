//! Auth errors

use thiserror::Error;

/// Authentication and authorization errors
///
/// Every failure here is recovered at the operation boundary and mapped
/// to one of five transport codes; nothing surfaces as an unhandled
/// fault. Login deliberately collapses its three internal reasons into
/// `InvalidCredentials` so callers cannot enumerate accounts.
#[derive(Error, Debug)]
pub enum AuthError {
    /// Unknown email, missing password hash, or wrong password.
    /// One message for all three.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// Member exists and credentials match, but the account is inactive
    #[error("account is deactivated")]
    AccountDeactivated,

    /// Malformed, forged, or tampered token
    #[error("invalid token")]
    TokenInvalid,

    /// Structurally valid token past its expiry
    #[error("token expired")]
    TokenExpired,

    /// Token kind does not match the consuming operation
    #[error("invalid token")]
    TokenKindMismatch,

    /// Invite already accepted (member has a password)
    #[error("invite already accepted")]
    AlreadyAccepted,

    /// Target record absent
    #[error("member not found")]
    NotFound,

    /// Duplicate email on create
    #[error("email is already registered")]
    DuplicateEmail,

    /// Actor attempted a role change or deactivation on themselves
    #[error("cannot perform this action on your own account")]
    SelfActionForbidden,

    /// No resolved identity where one is required
    #[error("authentication required")]
    Unauthenticated,

    /// Authenticated but the role is insufficient
    #[error("insufficient role")]
    InsufficientRole,

    /// Remaining request-level rejections (password too short,
    /// password reuse, wrong current password, already active/inactive)
    #[error("{0}")]
    Validation(&'static str),

    /// Storage-layer failure, logged internally and surfaced generically
    #[error("storage error")]
    Storage(String),

    /// Internal error
    #[error("internal error")]
    Internal(String),
}

/// Transport-level error code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Unauthorized,
    Forbidden,
    BadRequest,
    NotFound,
    Conflict,
    Internal,
}

impl ErrorCode {
    /// HTTP status for this code
    pub const fn status(&self) -> u16 {
        match self {
            Self::BadRequest => 400,
            Self::Unauthorized => 401,
            Self::Forbidden => 403,
            Self::NotFound => 404,
            Self::Conflict => 409,
            Self::Internal => 500,
        }
    }

    /// Wire name for API responses
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::BadRequest => "BAD_REQUEST",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::NotFound => "NOT_FOUND",
            Self::Conflict => "CONFLICT",
            Self::Internal => "INTERNAL_ERROR",
        }
    }
}

impl AuthError {
    /// Transport code for this error
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidCredentials | Self::Unauthenticated => ErrorCode::Unauthorized,
            Self::AccountDeactivated | Self::InsufficientRole => ErrorCode::Forbidden,
            Self::TokenInvalid
            | Self::TokenExpired
            | Self::TokenKindMismatch
            | Self::AlreadyAccepted
            | Self::SelfActionForbidden
            | Self::Validation(_) => ErrorCode::BadRequest,
            Self::NotFound => ErrorCode::NotFound,
            Self::DuplicateEmail => ErrorCode::Conflict,
            Self::Storage(_) | Self::Internal(_) => ErrorCode::Internal,
        }
    }
}

impl From<rollcall_db::DbError> for AuthError {
    fn from(err: rollcall_db::DbError) -> Self {
        match err {
            rollcall_db::DbError::Duplicate => Self::DuplicateEmail,
            rollcall_db::DbError::NotFound => Self::NotFound,
            other => {
                tracing::error!("Database error: {}", other);
                Self::Storage(other.to_string())
            }
        }
    }
}
