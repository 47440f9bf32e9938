//! Signed-token issuance and verification
//!
//! One HS256 secret signs all four token kinds. Type confusion between
//! kinds is prevented only by the embedded `kind` discriminator, so every
//! consumer must go through [`TokenService::verify_kind`] or
//! [`TokenService::verify_access`] rather than raw [`TokenService::verify`].

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use rollcall_types::{MemberId, Role};

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::guard::Identity;

/// Discriminator for non-access token kinds
///
/// Access tokens carry no `kind`; they are distinguished by carrying a
/// `role` claim instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Refresh,
    Invite,
    Reset,
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Refresh => write!(f, "refresh"),
            Self::Invite => write!(f, "invite"),
            Self::Reset => write!(f, "reset"),
        }
    }
}

/// Claims embedded in every signed token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject member ID
    pub sub: String,
    /// Role, present only on access tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    /// Kind discriminator, present on refresh/invite/reset tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<TokenKind>,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Parse the subject as a member ID
    pub fn member_id(&self) -> Result<MemberId, AuthError> {
        MemberId::parse(&self.sub).map_err(|_| AuthError::TokenInvalid)
    }
}

/// An access token and refresh token issued together
#[derive(Debug, Clone, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Token service signing and verifying all four token kinds
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    config: AuthConfig,
}

impl TokenService {
    /// Create a new token service from validated configuration
    pub fn new(config: AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.token_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.token_secret.as_bytes()),
            config,
        }
    }

    /// Sign an access token carrying the member's role
    pub fn sign_access(&self, member_id: MemberId, role: Role) -> Result<String, AuthError> {
        self.sign(member_id, Some(role), None, self.config.access_ttl)
    }

    /// Sign a refresh token
    pub fn sign_refresh(&self, member_id: MemberId) -> Result<String, AuthError> {
        self.sign(member_id, None, Some(TokenKind::Refresh), self.config.refresh_ttl)
    }

    /// Sign an invite token
    pub fn sign_invite(&self, member_id: MemberId) -> Result<String, AuthError> {
        self.sign(member_id, None, Some(TokenKind::Invite), self.config.invite_ttl)
    }

    /// Sign a password reset token
    pub fn sign_reset(&self, member_id: MemberId) -> Result<String, AuthError> {
        self.sign(member_id, None, Some(TokenKind::Reset), self.config.reset_ttl)
    }

    /// Sign an access and refresh token pair
    pub fn sign_pair(&self, member_id: MemberId, role: Role) -> Result<TokenPair, AuthError> {
        Ok(TokenPair {
            access_token: self.sign_access(member_id, role)?,
            refresh_token: self.sign_refresh(member_id)?,
        })
    }

    /// Verify signature and expiry, returning raw claims
    ///
    /// Callers consuming a specific kind must use [`Self::verify_kind`] or
    /// [`Self::verify_access`]; this alone does not check the discriminator.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let validation = Validation::new(Algorithm::HS256);

        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            tracing::debug!("Token verification failed: {}", e);
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::TokenInvalid,
            }
        })?;

        Ok(data.claims)
    }

    /// Verify a token and require its kind discriminator
    pub fn verify_kind(&self, token: &str, expected: TokenKind) -> Result<Claims, AuthError> {
        let claims = self.verify(token)?;

        if claims.kind != Some(expected) {
            tracing::debug!(
                expected = %expected,
                got = ?claims.kind,
                "Token kind mismatch"
            );
            return Err(AuthError::TokenKindMismatch);
        }

        Ok(claims)
    }

    /// Verify an access token and resolve it to an identity
    ///
    /// Access tokens must carry a role and no kind discriminator; a kinded
    /// token presented as an access token is rejected.
    pub fn verify_access(&self, token: &str) -> Result<Identity, AuthError> {
        let claims = self.verify(token)?;

        if claims.kind.is_some() {
            tracing::debug!(got = ?claims.kind, "Non-access token presented as access token");
            return Err(AuthError::TokenKindMismatch);
        }

        let role = claims.role.ok_or(AuthError::TokenInvalid)?;
        let member_id = claims.member_id()?;

        Ok(Identity { member_id, role })
    }

    fn sign(
        &self,
        member_id: MemberId,
        role: Option<Role>,
        kind: Option<TokenKind>,
        ttl: std::time::Duration,
    ) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: member_id.to_string(),
            role,
            kind,
            iat: now,
            exp: now + ttl.as_secs() as i64,
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!("Failed to sign token: {}", e);
            AuthError::Internal("token signing failed".to_string())
        })
    }
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new(AuthConfig::new("test-secret-test-secret-test-secret!").unwrap())
    }

    #[test]
    fn test_access_token_roundtrip() {
        let svc = service();
        let id = MemberId::new();
        let token = svc.sign_access(id, Role::Manager).unwrap();

        let identity = svc.verify_access(&token).unwrap();
        assert_eq!(identity.member_id, id);
        assert_eq!(identity.role, Role::Manager);
    }

    #[test]
    fn test_kinded_token_roundtrip() {
        let svc = service();
        let id = MemberId::new();

        for kind in [TokenKind::Refresh, TokenKind::Invite, TokenKind::Reset] {
            let token = match kind {
                TokenKind::Refresh => svc.sign_refresh(id).unwrap(),
                TokenKind::Invite => svc.sign_invite(id).unwrap(),
                TokenKind::Reset => svc.sign_reset(id).unwrap(),
            };
            let claims = svc.verify_kind(&token, kind).unwrap();
            assert_eq!(claims.member_id().unwrap(), id);
            assert!(claims.role.is_none());
        }
    }

    #[test]
    fn test_kind_confusion_rejected() {
        let svc = service();
        let id = MemberId::new();

        // A reset token is not an invite token
        let reset = svc.sign_reset(id).unwrap();
        assert!(matches!(
            svc.verify_kind(&reset, TokenKind::Invite),
            Err(AuthError::TokenKindMismatch)
        ));

        // An invite token is not a reset token
        let invite = svc.sign_invite(id).unwrap();
        assert!(matches!(
            svc.verify_kind(&invite, TokenKind::Reset),
            Err(AuthError::TokenKindMismatch)
        ));

        // An access token is not a refresh token
        let access = svc.sign_access(id, Role::Member).unwrap();
        assert!(matches!(
            svc.verify_kind(&access, TokenKind::Refresh),
            Err(AuthError::TokenKindMismatch)
        ));

        // A refresh token is not an access token
        let refresh = svc.sign_refresh(id).unwrap();
        assert!(matches!(
            svc.verify_access(&refresh),
            Err(AuthError::TokenKindMismatch)
        ));
    }

    #[test]
    fn test_tampered_token_rejected() {
        let svc = service();
        let token = svc.sign_access(MemberId::new(), Role::Member).unwrap();

        let mut tampered = token.clone();
        let last = tampered.pop().unwrap();
        tampered.push(if last == 'a' { 'b' } else { 'a' });

        assert!(matches!(
            svc.verify(&tampered),
            Err(AuthError::TokenInvalid)
        ));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let signer = service();
        let verifier =
            TokenService::new(AuthConfig::new("another-secret-another-secret-yes!!").unwrap());

        let token = signer.sign_refresh(MemberId::new()).unwrap();
        assert!(matches!(
            verifier.verify(&token),
            Err(AuthError::TokenInvalid)
        ));
    }

    #[test]
    fn test_expired_token_rejected() {
        let svc = service();
        let id = MemberId::new();

        // Craft an already-expired reset token with the same secret
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: id.to_string(),
            role: None,
            kind: Some(TokenKind::Reset),
            iat: now - 7200,
            exp: now - 3600,
        };
        let expired = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret("test-secret-test-secret-test-secret!".as_bytes()),
        )
        .unwrap();

        assert!(matches!(
            svc.verify_kind(&expired, TokenKind::Reset),
            Err(AuthError::TokenExpired)
        ));
    }

    #[test]
    fn test_garbage_token_rejected() {
        let svc = service();
        assert!(matches!(svc.verify("garbage"), Err(AuthError::TokenInvalid)));
        assert!(matches!(
            svc.verify("a.b.c"),
            Err(AuthError::TokenInvalid)
        ));
    }
}
