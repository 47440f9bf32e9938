//! Application state

use std::sync::Arc;

use rollcall_auth_core::AuthService;
use rollcall_db::PgMemberRepository;

use crate::mailer::Mailer;

/// Type alias for the auth service with the concrete repository type
pub type AuthServiceImpl = AuthService<PgMemberRepository>;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Auth service for the credential lifecycle and token resolution
    pub auth: Arc<AuthServiceImpl>,
    /// Outbound delivery port for invite and reset tokens
    pub mailer: Arc<dyn Mailer>,
}

impl AppState {
    /// Create new application state
    pub fn new(auth: AuthServiceImpl, mailer: Arc<dyn Mailer>) -> Self {
        Self {
            auth: Arc::new(auth),
            mailer,
        }
    }
}
