//! Member administration handlers (admin only)

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use rollcall_auth_core::GuardChain;
use rollcall_types::{MemberId, Role};

use crate::error::ApiResult;
use crate::extractors::Ctx;
use crate::handlers::shared::{MemberInfo, SuccessResponse};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UpdateRoleRequest {
    pub role: Role,
}

/// PUT /api/v1/members/:id/role
pub async fn update_role(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateRoleRequest>,
) -> ApiResult<Json<MemberInfo>> {
    let actor = GuardChain::admin_only().require(&ctx)?;

    let member = state
        .auth
        .update_role(actor.member_id, MemberId::from(id), req.role)
        .await?;

    Ok(Json(MemberInfo::from(member)))
}

/// POST /api/v1/members/:id/deactivate
pub async fn deactivate(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<SuccessResponse>> {
    let actor = GuardChain::admin_only().require(&ctx)?;

    state
        .auth
        .deactivate(actor.member_id, MemberId::from(id))
        .await?;

    Ok(Json(SuccessResponse::ok()))
}

/// POST /api/v1/members/:id/reactivate
pub async fn reactivate(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<SuccessResponse>> {
    GuardChain::admin_only().require(&ctx)?;

    state.auth.reactivate(MemberId::from(id)).await?;

    Ok(Json(SuccessResponse::ok()))
}
