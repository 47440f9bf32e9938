//! Axum extractors for authentication
//!
//! The request context is resolved exactly once, before any guard runs:
//! the bearer access token (if any) is verified and reduced to an
//! identity. Guards only inspect the result.

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum::http::header;

use rollcall_auth_core::RequestContext;

use crate::state::AppState;

/// Request context carrying the optionally resolved identity
#[derive(Debug, Clone)]
pub struct Ctx(pub RequestContext);

impl<S> FromRequestParts<S> for Ctx
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut Parts,
        state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let app_state = AppState::from_ref(state);

            let identity = bearer_token(parts).and_then(|token| {
                match app_state.auth.tokens().verify_access(&token) {
                    Ok(identity) => Some(identity),
                    Err(e) => {
                        // An unverifiable token resolves to no identity;
                        // guarded routes reject it as unauthenticated
                        tracing::debug!(error = ?e, "Bearer token did not resolve");
                        None
                    }
                }
            });

            Ok(Ctx(RequestContext { identity }))
        })
    }
}

/// Extract the bearer token from the Authorization header
fn bearer_token(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(String::from)
}
