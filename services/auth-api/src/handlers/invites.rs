//! Invite handlers (issue, accept, validate, resend, revoke)

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use rollcall_auth_core::{GuardChain, InviteCheck};
use rollcall_types::{MemberId, Role};

use crate::error::ApiResult;
use crate::extractors::Ctx;
use crate::handlers::shared::{MemberInfo, SessionResponse, SuccessResponse};
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateInviteRequest {
    pub email: String,
    pub name: String,
    pub role: Role,
}

#[derive(Debug, Serialize)]
pub struct InviteResponse {
    pub member: MemberInfo,
    /// True when an existing pending invite was re-issued
    pub resent: bool,
}

#[derive(Debug, Deserialize)]
pub struct AcceptInviteRequest {
    pub token: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct ValidateInviteParams {
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct ValidateInviteResponse {
    pub valid: bool,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/v1/invites
///
/// Issue (or re-issue) an invite; manager or above.
pub async fn create(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    Json(req): Json<CreateInviteRequest>,
) -> ApiResult<Json<InviteResponse>> {
    GuardChain::manager_or_above().require(&ctx)?;

    let outcome = state.auth.invite(&req.email, &req.name, req.role).await?;

    state
        .mailer
        .send_invite(&outcome.member.email, &outcome.member.name, &outcome.token)
        .await;

    Ok(Json(InviteResponse {
        resent: outcome.resent,
        member: MemberInfo::from(outcome.member),
    }))
}

/// POST /api/v1/invites/accept
///
/// Public: the invite token itself authorizes the call.
pub async fn accept(
    State(state): State<AppState>,
    Json(req): Json<AcceptInviteRequest>,
) -> ApiResult<Json<SessionResponse>> {
    let session = state.auth.accept_invite(&req.token, &req.password).await?;

    Ok(Json(SessionResponse::from(session)))
}

/// GET /api/v1/invites/validate
///
/// Public read-only pre-flight for the acceptance UI; mutates nothing.
pub async fn validate(
    State(state): State<AppState>,
    Query(params): Query<ValidateInviteParams>,
) -> ApiResult<Json<ValidateInviteResponse>> {
    let response = match state.auth.validate_invite(&params.token).await? {
        InviteCheck::Valid { email, name } => ValidateInviteResponse {
            valid: true,
            status: "valid",
            email: Some(email),
            name: Some(name),
        },
        InviteCheck::AlreadyAccepted => ValidateInviteResponse {
            valid: false,
            status: "already_accepted",
            email: None,
            name: None,
        },
        InviteCheck::Deactivated => ValidateInviteResponse {
            valid: false,
            status: "deactivated",
            email: None,
            name: None,
        },
    };

    Ok(Json(response))
}

/// POST /api/v1/invites/:id/resend
///
/// Mint and dispatch a fresh invite token; manager or above.
pub async fn resend(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<SuccessResponse>> {
    GuardChain::manager_or_above().require(&ctx)?;

    let outcome = state.auth.resend_invite(MemberId::from(id)).await?;

    state
        .mailer
        .send_invite(&outcome.member.email, &outcome.member.name, &outcome.token)
        .await;

    Ok(Json(SuccessResponse::ok()))
}

/// POST /api/v1/invites/:id/revoke
///
/// Revoke a pending invite; manager or above.
pub async fn revoke(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<SuccessResponse>> {
    GuardChain::manager_or_above().require(&ctx)?;

    state.auth.revoke_invite(MemberId::from(id)).await?;

    Ok(Json(SuccessResponse::ok()))
}
