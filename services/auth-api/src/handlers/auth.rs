//! Authentication handlers (register, login, refresh, passwords, me)

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use rollcall_auth_core::GuardChain;

use crate::error::ApiResult;
use crate::extractors::Ctx;
use crate::handlers::shared::{MemberInfo, SessionResponse, SuccessResponse};
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub name: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub token: String,
    pub new_password: String,
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/v1/auth/register
///
/// Public self-service registration.
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<Json<SessionResponse>> {
    let session = state
        .auth
        .register(&req.email, &req.name, &req.password)
        .await?;

    Ok(Json(SessionResponse::from(session)))
}

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<SessionResponse>> {
    let session = state.auth.login(&req.email, &req.password).await?;

    Ok(Json(SessionResponse::from(session)))
}

/// POST /api/v1/auth/refresh
///
/// Exchange a refresh token for a rotated pair.
pub async fn refresh(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> ApiResult<Json<RefreshResponse>> {
    let tokens = state.auth.refresh(&req.refresh_token).await?;

    Ok(Json(RefreshResponse {
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
    }))
}

/// POST /api/v1/auth/forgot-password
///
/// Always acknowledges, whether or not the email matches a member; a reset
/// token is dispatched out of band only when it does.
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(req): Json<ForgotPasswordRequest>,
) -> ApiResult<Json<SuccessResponse>> {
    if let Some(reset) = state.auth.forgot_password(&req.email).await? {
        state
            .mailer
            .send_password_reset(&reset.email, &reset.token)
            .await;
    }

    Ok(Json(SuccessResponse::ok()))
}

/// POST /api/v1/auth/reset-password
pub async fn reset_password(
    State(state): State<AppState>,
    Json(req): Json<ResetPasswordRequest>,
) -> ApiResult<Json<SuccessResponse>> {
    state
        .auth
        .reset_password(&req.token, &req.new_password)
        .await?;

    Ok(Json(SuccessResponse::ok()))
}

/// POST /api/v1/auth/change-password
pub async fn change_password(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    Json(req): Json<ChangePasswordRequest>,
) -> ApiResult<Json<SuccessResponse>> {
    let identity = GuardChain::authenticated().require(&ctx)?;

    state
        .auth
        .change_password(identity, &req.current_password, &req.new_password)
        .await?;

    Ok(Json(SuccessResponse::ok()))
}

/// GET /api/v1/auth/me
pub async fn me(State(state): State<AppState>, Ctx(ctx): Ctx) -> ApiResult<Json<MemberInfo>> {
    let identity = GuardChain::authenticated().require(&ctx)?;

    let member = state.auth.get_member(identity.member_id).await?;

    Ok(Json(MemberInfo::from(member)))
}
