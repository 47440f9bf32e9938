//! Rollcall Auth API
//!
//! REST service for the membership credential lifecycle: registration,
//! login, token refresh, invites, password reset, and member
//! administration.

mod config;
mod error;
mod extractors;
mod handlers;
mod mailer;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::{get, post, put};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::EnvFilter;

use rollcall_auth_core::AuthService;
use rollcall_db::{create_pool, PgMemberRepository, PoolOptions};

use crate::config::Config;
use crate::mailer::LogMailer;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    tracing::info!("Starting Rollcall Auth API");

    let config = Config::from_env()?;

    let pool = create_pool(
        &config.database_url,
        PoolOptions::default().max_connections(config.db_max_connections),
    )
    .await?;
    let members = Arc::new(PgMemberRepository::new(pool));
    let auth = AuthService::new(config.auth.clone(), members);

    let state = AppState::new(auth, Arc::new(LogMailer));

    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn router(state: AppState) -> Router {
    let api = Router::new()
        // Public: credential lifecycle
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/refresh", post(handlers::auth::refresh))
        .route("/auth/forgot-password", post(handlers::auth::forgot_password))
        .route("/auth/reset-password", post(handlers::auth::reset_password))
        // Public: invite acceptance (the token authorizes the call)
        .route("/invites/accept", post(handlers::invites::accept))
        .route("/invites/validate", get(handlers::invites::validate))
        // Authenticated
        .route("/auth/me", get(handlers::auth::me))
        .route("/auth/change-password", post(handlers::auth::change_password))
        // Manager or above
        .route("/invites", post(handlers::invites::create))
        .route("/invites/:id/resend", post(handlers::invites::resend))
        .route("/invites/:id/revoke", post(handlers::invites::revoke))
        // Admin only
        .route("/members/:id/role", put(handlers::members::update_role))
        .route("/members/:id/deactivate", post(handlers::members::deactivate))
        .route("/members/:id/reactivate", post(handlers::members::reactivate));

    // Middleware stack (order matters - outermost first)
    let middleware = ServiceBuilder::new()
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    Router::new()
        .nest("/api/v1", api)
        .layer(middleware)
        // Health route outside the middleware stack - must always respond
        .route("/health", get(handlers::health::health))
        .with_state(state)
}
