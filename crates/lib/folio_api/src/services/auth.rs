//! Authentication service: login and password change, delegating to
//! `folio_core::auth`.
//!
//! bcrypt runs on the blocking pool so a burst of logins cannot stall the
//! async workers.

use sqlx::PgPool;
use tokio::task::spawn_blocking;
use tracing::{info, warn};
use uuid::Uuid;

use folio_core::auth::{jwt, password, queries};
use folio_core::models::auth::Account;

use crate::error::{AppError, AppResult};

async fn verify(password: String, hash: Option<String>) -> AppResult<bool> {
    spawn_blocking(move || match hash {
        Some(hash) => password::verify_password(&password, &hash),
        None => password::verify_against_dummy(&password),
    })
    .await
    .map_err(|e| AppError::Internal(format!("password verification task: {e}")))
}

async fn hash(password: String) -> AppResult<String> {
    spawn_blocking(move || password::hash_password(&password))
        .await
        .map_err(|e| AppError::Internal(format!("password hashing task: {e}")))?
        .map_err(AppError::from)
}

/// Check credentials and issue a session token.
///
/// Unknown email and wrong password give the same error, and both pay for
/// a bcrypt comparison.
pub async fn login(
    pool: &PgPool,
    email: &str,
    password: &str,
    jwt_secret: &[u8],
) -> AppResult<(Account, String)> {
    let credential = queries::find_credential_by_email(pool, email).await?;
    let hash = credential.as_ref().map(|c| c.password_hash.clone());

    if !verify(password.to_string(), hash).await? {
        warn!("login rejected");
        return Err(AppError::Unauthorized("Invalid credentials".into()));
    }
    let Some(credential) = credential else {
        return Err(AppError::Unauthorized("Invalid credentials".into()));
    };

    let token = jwt::issue_session_token(&credential.account, jwt_secret)?;
    info!(account_id = %credential.account.id, "login succeeded");
    Ok((credential.account, token))
}

/// Change the calling account's password after checking the current one.
pub async fn change_password(
    pool: &PgPool,
    account_id: &Uuid,
    current_password: &str,
    new_password: &str,
) -> AppResult<()> {
    let credential = queries::find_credential_by_id(pool, account_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Unauthorized".into()))?;

    if !verify(current_password.to_string(), Some(credential.password_hash)).await? {
        warn!(%account_id, "password change rejected: current password mismatch");
        return Err(AppError::invalid_field(
            "currentPassword",
            "Current password is incorrect",
        ));
    }

    let new_hash = hash(new_password.to_string()).await?;
    if !queries::update_password_hash(pool, account_id, &new_hash).await? {
        return Err(AppError::Unauthorized("Unauthorized".into()));
    }
    info!(%account_id, "password changed");
    Ok(())
}
