//! Authentication and credential logic.
//!
//! Provides password hashing, session token management, and the account
//! queries backing the credential store. Shared by `folio_api` and `folio_cli`.

pub mod jwt;
pub mod password;
pub mod queries;

use thiserror::Error;

pub use jwt::TokenError;

/// Authentication errors.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    CredentialError,

    #[error("Token error: {0}")]
    TokenError(#[from] TokenError),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Account already exists: {0}")]
    DuplicateAccount(String),

    #[error("Signing secret missing: {0}")]
    MissingSecret(String),

    #[error("Database error: {0}")]
    DbError(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Normalize an email for storage and lookup: trimmed and lowercased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_email_is_case_insensitive() {
        assert_eq!(normalize_email("  Admin@X.IO "), "admin@x.io");
    }
}
