use chrono::Utc;
use habitlog_core::{ACCESS_TOKEN_TTL_SECS, REFRESH_TOKEN_TTL_SECS};

use crate::ServiceError;
use crate::token::{Claims, TokenKind, TokenSigner};

/// A freshly issued access/refresh pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub session_id: String,
    pub access_token: String,
    pub refresh_token: String,
}

/// Issues, refreshes and checks bearer tokens.
///
/// `*_at` variants take the current unix time explicitly; the plain
/// variants read the system clock.
#[derive(Clone)]
pub struct AuthService {
    signer: TokenSigner,
}

impl AuthService {
    pub fn new(secret: &str) -> Result<Self, ServiceError> {
        Ok(Self { signer: TokenSigner::new(secret.as_bytes())? })
    }

    pub fn issue(&self) -> Result<TokenPair, ServiceError> {
        self.issue_at(Utc::now().timestamp())
    }

    /// Start a new session: both tokens share one random session id.
    pub fn issue_at(&self, now: i64) -> Result<TokenPair, ServiceError> {
        let session_id = uuid::Uuid::new_v4().to_string();
        let access_token = self.sign(&session_id, TokenKind::Access, now)?;
        let refresh_token = self.sign(&session_id, TokenKind::Refresh, now)?;
        tracing::info!(session = %session_id, "Issued token pair");
        Ok(TokenPair { session_id, access_token, refresh_token })
    }

    pub fn refresh(&self, refresh_token: Option<&str>) -> Result<String, ServiceError> {
        self.refresh_at(refresh_token, Utc::now().timestamp())
    }

    /// Exchange a valid refresh token for a new access token in the same
    /// session. The refresh token itself is not rotated.
    pub fn refresh_at(&self, refresh_token: Option<&str>, now: i64) -> Result<String, ServiceError> {
        let token = refresh_token.filter(|t| !t.is_empty()).ok_or(ServiceError::Unauthorized)?;
        let claims = self.signer.verify(token, TokenKind::Refresh, now).map_err(|e| {
            tracing::warn!(error = %e, "Refresh token rejected");
            e
        })?;
        let access = self.sign(&claims.sid, TokenKind::Access, now)?;
        tracing::debug!(session = %claims.sid, "Refreshed access token");
        Ok(access)
    }

    pub fn verify_access(&self, access_token: Option<&str>) -> Result<Claims, ServiceError> {
        self.verify_access_at(access_token, Utc::now().timestamp())
    }

    pub fn verify_access_at(
        &self,
        access_token: Option<&str>,
        now: i64,
    ) -> Result<Claims, ServiceError> {
        let token = access_token.filter(|t| !t.is_empty()).ok_or(ServiceError::Unauthorized)?;
        Ok(self.signer.verify(token, TokenKind::Access, now)?)
    }

    fn sign(&self, session_id: &str, kind: TokenKind, now: i64) -> Result<String, ServiceError> {
        let ttl = match kind {
            TokenKind::Access => ACCESS_TOKEN_TTL_SECS,
            TokenKind::Refresh => REFRESH_TOKEN_TTL_SECS,
        };
        let claims =
            Claims { sid: session_id.to_owned(), kind, iat: now, exp: now.saturating_add(ttl) };
        Ok(self.signer.sign(&claims)?)
    }
}
