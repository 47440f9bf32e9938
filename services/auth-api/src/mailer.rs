//! Outbound delivery port for invite and reset tokens
//!
//! Email delivery is an external collaborator; the service only hands
//! tokens to this port. The default implementation traces the dispatch so
//! local development works without a provider.

use async_trait::async_trait;

/// Outbound token delivery
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Deliver an invite token to a newly invited member
    async fn send_invite(&self, email: &str, name: &str, token: &str);

    /// Deliver a password reset token
    async fn send_password_reset(&self, email: &str, token: &str);
}

/// Mailer that logs dispatches instead of sending anything
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send_invite(&self, email: &str, name: &str, token: &str) {
        tracing::info!(email, name, token_len = token.len(), "Invite dispatch");
    }

    async fn send_password_reset(&self, email: &str, token: &str) {
        tracing::info!(email, token_len = token.len(), "Password reset dispatch");
    }
}
