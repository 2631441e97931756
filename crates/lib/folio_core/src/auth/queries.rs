//! Account queries backing the credential store.

use sqlx::PgPool;
use uuid::Uuid;

use super::{AuthError, normalize_email};
use crate::models::auth::{Account, AccountCredential, Role};

/// Fetch an account and its password hash by email (case-insensitive).
pub async fn find_credential_by_email(
    pool: &PgPool,
    email: &str,
) -> Result<Option<AccountCredential>, AuthError> {
    let row = sqlx::query_as::<_, AccountCredential>(
        "SELECT id, email, role, created_at, password_hash FROM accounts WHERE email = $1",
    )
    .bind(normalize_email(email))
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Fetch an account and its password hash by ID.
pub async fn find_credential_by_id(
    pool: &PgPool,
    account_id: &Uuid,
) -> Result<Option<AccountCredential>, AuthError> {
    let row = sqlx::query_as::<_, AccountCredential>(
        "SELECT id, email, role, created_at, password_hash FROM accounts WHERE id = $1",
    )
    .bind(account_id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Create a new account, returning it without the hash.
pub async fn create_account(
    pool: &PgPool,
    email: &str,
    password_hash: &str,
    role: Role,
) -> Result<Account, AuthError> {
    let email = normalize_email(email);
    let result = sqlx::query_as::<_, Account>(
        "INSERT INTO accounts (id, email, password_hash, role) VALUES ($1, $2, $3, $4) \
         RETURNING id, email, role, created_at",
    )
    .bind(Uuid::now_v7())
    .bind(&email)
    .bind(password_hash)
    .bind(role)
    .fetch_one(pool)
    .await;

    match result {
        Ok(account) => Ok(account),
        Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
            Err(AuthError::DuplicateAccount(email))
        }
        Err(e) => Err(e.into()),
    }
}

/// Replace an account's password hash. Returns `false` if no such account.
pub async fn update_password_hash(
    pool: &PgPool,
    account_id: &Uuid,
    password_hash: &str,
) -> Result<bool, AuthError> {
    let result = sqlx::query(
        "UPDATE accounts SET password_hash = $2, updated_at = now() WHERE id = $1",
    )
    .bind(account_id)
    .bind(password_hash)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() == 1)
}

/// Replace a password hash by email. Returns `false` if no such account.
pub async fn update_password_hash_by_email(
    pool: &PgPool,
    email: &str,
    password_hash: &str,
) -> Result<bool, AuthError> {
    let result = sqlx::query(
        "UPDATE accounts SET password_hash = $2, updated_at = now() WHERE email = $1",
    )
    .bind(normalize_email(email))
    .bind(password_hash)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() == 1)
}
