//! Response types shared across handlers

use rollcall_db::MemberRow;
use serde::Serialize;

/// Public view of a member record
#[derive(Debug, Serialize)]
pub struct MemberInfo {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: String,
    pub is_active: bool,
    pub email_verified: bool,
}

impl From<MemberRow> for MemberInfo {
    fn from(row: MemberRow) -> Self {
        Self {
            id: row.id.to_string(),
            email: row.email,
            name: row.name,
            role: row.role,
            is_active: row.is_active,
            email_verified: row.email_verified,
        }
    }
}

/// Generic acknowledgement body
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// A member together with freshly issued tokens
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub member: MemberInfo,
    pub access_token: String,
    pub refresh_token: String,
}

impl From<rollcall_auth_core::AuthSession> for SessionResponse {
    fn from(session: rollcall_auth_core::AuthSession) -> Self {
        Self {
            member: MemberInfo::from(session.member),
            access_token: session.tokens.access_token,
            refresh_token: session.tokens.refresh_token,
        }
    }
}
