//! Token issuance and verification.
//!
//! Two token kinds exist, distinguished by the optional `typ` claim:
//!
//! - **Access** (`typ` absent): short-lived, authorizes API calls
//! - **Refresh** (`typ = "refresh"`): long-lived, only exchangeable for a
//!   new access token
//!
//! Verification always takes the kind the caller expects. A refresh token
//! presented where an access token is expected (or the reverse) is rejected
//! with [`TokenError::WrongKind`] even when signature and expiry are fine.

use std::fmt;

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind};
use serde::{Deserialize, Serialize};

use crate::config::jwt::JwtConfig;
use crate::utils::errors::AppError;

/// Role carried by every admin token. The only role this deployment knows,
/// kept as data so the capability check stays a real comparison.
pub const ROLE_ADMIN: &str = "ADMIN";

const TYP_REFRESH: &str = "refresh";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Access,
    Refresh,
}

/// Signed claim bundle embedded in both token kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the admin's id
    pub sub: String,
    /// Role tag, compared by the authorization guard
    pub role: String,
    /// Token-type tag; `"refresh"` on refresh tokens, absent on access tokens
    #[serde(skip_serializing_if = "Option::is_none")]
    pub typ: Option<String>,
    /// Expiry (Unix timestamp)
    pub exp: usize,
    /// Issued-at (Unix timestamp)
    pub iat: usize,
}

impl Claims {
    pub fn kind(&self) -> TokenKind {
        match self.typ.as_deref() {
            Some(TYP_REFRESH) => TokenKind::Refresh,
            _ => TokenKind::Access,
        }
    }
}

/// Why a token was rejected. Collapsed to a uniform 401 at the HTTP
/// boundary; the distinction is kept for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    BadSignature,
    Expired,
    WrongKind,
}

impl fmt::Display for TokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenError::BadSignature => write!(f, "bad signature"),
            TokenError::Expired => write!(f, "expired"),
            TokenError::WrongKind => write!(f, "wrong token kind"),
        }
    }
}

/// Mints a token of the given kind for `sub`/`role`, expiring `ttl` seconds
/// from now.
pub fn issue_token(
    sub: &str,
    role: &str,
    kind: TokenKind,
    ttl: i64,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp();
    let exp = now + ttl;

    let claims = Claims {
        sub: sub.to_string(),
        role: role.to_string(),
        typ: match kind {
            TokenKind::Access => None,
            TokenKind::Refresh => Some(TYP_REFRESH.to_string()),
        },
        exp: exp as usize,
        iat: now as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to create token: {}", e)))
}

/// Verifies signature, expiry, and kind, in that order. A token without a
/// `typ` claim is an access token.
pub fn verify_token(
    token: &str,
    expected: TokenKind,
    jwt_config: &JwtConfig,
) -> Result<Claims, TokenError> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::BadSignature,
    })?;

    if data.claims.kind() != expected {
        return Err(TokenError::WrongKind);
    }

    Ok(data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-key-at-least-32-characters-long".to_string(),
            access_token_expiry: 900,
            refresh_token_expiry: 604800,
        }
    }

    #[test]
    fn access_token_has_no_typ_claim() {
        let config = test_config();
        let token = issue_token("admin-1", ROLE_ADMIN, TokenKind::Access, 900, &config).unwrap();
        let claims = verify_token(&token, TokenKind::Access, &config).unwrap();
        assert!(claims.typ.is_none());
        assert_eq!(claims.kind(), TokenKind::Access);
    }

    #[test]
    fn refresh_token_is_tagged() {
        let config = test_config();
        let token = issue_token("admin-1", ROLE_ADMIN, TokenKind::Refresh, 604800, &config).unwrap();
        let claims = verify_token(&token, TokenKind::Refresh, &config).unwrap();
        assert_eq!(claims.typ.as_deref(), Some("refresh"));
        assert_eq!(claims.kind(), TokenKind::Refresh);
    }

    #[test]
    fn kind_mismatch_is_rejected_before_claims_are_released() {
        let config = test_config();
        let refresh = issue_token("admin-1", ROLE_ADMIN, TokenKind::Refresh, 604800, &config).unwrap();
        assert_eq!(
            verify_token(&refresh, TokenKind::Access, &config),
            Err(TokenError::WrongKind)
        );
    }
}
