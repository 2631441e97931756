//! Session token issuing and verification.
//!
//! Tokens are HS256 JWTs with an absolute seven-day lifetime. Verification is
//! pure computation: no database, no clock other than the system clock.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rand::distr::Alphanumeric;
use rand::{Rng, rng};
use thiserror::Error;
use tracing::{info, warn};

use super::AuthError;
use crate::models::auth::{Account, TokenClaims};

/// Session lifetime: 7 days, not sliding.
pub const SESSION_TTL_DAYS: i64 = 7;

/// Session lifetime in seconds (also the cookie max-age).
pub const SESSION_TTL_SECS: i64 = SESSION_TTL_DAYS * 24 * 60 * 60;

/// Shortest signing secret accepted in production.
pub const MIN_SECRET_LEN: usize = 32;

/// Why a session token was rejected.
///
/// Callers treat every variant as "invalid"; the distinction is for logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("malformed token")]
    Malformed,

    #[error("bad signature")]
    BadSignature,

    #[error("token expired")]
    Expired,
}

/// Sign an arbitrary claim set with HS256.
pub fn sign_claims(claims: &TokenClaims, secret: &[u8]) -> Result<String, AuthError> {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret),
    )
    .map_err(|e| AuthError::Internal(format!("jwt encode: {e}")))
}

/// Issue a session token for an account, issued now.
pub fn issue_session_token(account: &Account, secret: &[u8]) -> Result<String, AuthError> {
    issue_session_token_at(account, Utc::now(), secret)
}

/// Issue a session token for an account with an explicit issued-at time.
pub fn issue_session_token_at(
    account: &Account,
    issued_at: DateTime<Utc>,
    secret: &[u8],
) -> Result<String, AuthError> {
    let claims = TokenClaims {
        sub: account.id.to_string(),
        email: account.email.clone(),
        role: account.role.to_string(),
        iat: issued_at.timestamp(),
        exp: (issued_at + Duration::days(SESSION_TTL_DAYS)).timestamp(),
    };
    sign_claims(&claims, secret)
}

/// Verify a session token, returning the claims on success.
pub fn verify_session_token(token: &str, secret: &[u8]) -> Result<TokenClaims, TokenError> {
    let key = DecodingKey::from_secret(secret);
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation.validate_exp = true;
    validation.set_required_spec_claims(&["exp", "iat", "sub"]);
    decode::<TokenClaims>(token, &key, &validation)
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::InvalidSignature => TokenError::BadSignature,
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Malformed,
        })
}

/// Resolve the signing secret from the configured value.
///
/// In production a missing or short secret is an error. Outside production a
/// random secret is generated once and persisted under the platform data dir.
pub fn resolve_jwt_secret(configured: Option<String>, production: bool) -> Result<String, AuthError> {
    resolve_jwt_secret_with_path(configured, production, &jwt_secret_path())
}

/// Like [`resolve_jwt_secret`] with an explicit persistence path.
pub fn resolve_jwt_secret_with_path(
    configured: Option<String>,
    production: bool,
    secret_path: &Path,
) -> Result<String, AuthError> {
    if let Some(secret) = configured.filter(|s| !s.trim().is_empty()) {
        if secret.len() < MIN_SECRET_LEN {
            if production {
                return Err(AuthError::MissingSecret(format!(
                    "JWT_SECRET must be at least {MIN_SECRET_LEN} bytes"
                )));
            }
            warn!("JWT_SECRET is shorter than {MIN_SECRET_LEN} bytes");
        }
        return Ok(secret);
    }

    if production {
        return Err(AuthError::MissingSecret("JWT_SECRET is not set".into()));
    }

    if let Ok(existing) = std::fs::read_to_string(secret_path) {
        let trimmed = existing.trim();
        if !trimmed.is_empty() {
            warn!(path = %secret_path.display(), "JWT_SECRET not set, using persisted development secret");
            return Ok(trimmed.to_string());
        }
    }

    let secret: String = rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect();
    if let Some(parent) = secret_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    if let Err(e) = std::fs::write(secret_path, &secret) {
        warn!(path = %secret_path.display(), "could not persist development secret: {e}");
    } else {
        info!(path = %secret_path.display(), "generated new development JWT secret");
    }
    Ok(secret)
}

/// Path to the persisted development secret file.
fn jwt_secret_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("folio")
        .join("jwt-secret")
}
