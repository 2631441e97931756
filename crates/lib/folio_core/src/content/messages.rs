//! Contact message queries.

use sqlx::PgPool;
use uuid::Uuid;

use super::ContentError;
use crate::models::content::{ContactMessage, ContactMessageRow};
use crate::validation::contact::ContactRequest;

const COLUMNS: &str = "id, name, email, subject, message, is_read, created_at";

/// Store a contact form submission.
pub async fn create(pool: &PgPool, req: ContactRequest) -> Result<ContactMessage, ContentError> {
    let row = sqlx::query_as::<_, ContactMessageRow>(&format!(
        "INSERT INTO contact_messages (id, name, email, subject, message) \
         VALUES ($1, $2, $3, $4, $5) RETURNING {COLUMNS}"
    ))
    .bind(Uuid::now_v7())
    .bind(req.name)
    .bind(req.email)
    .bind(req.subject)
    .bind(req.message)
    .fetch_one(pool)
    .await?;
    Ok(row.into())
}

/// Inbox, newest first.
pub async fn list(pool: &PgPool) -> Result<Vec<ContactMessage>, ContentError> {
    let rows = sqlx::query_as::<_, ContactMessageRow>(&format!(
        "SELECT {COLUMNS} FROM contact_messages ORDER BY created_at DESC"
    ))
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(ContactMessage::from).collect())
}

pub async fn set_read(pool: &PgPool, id: &Uuid, is_read: bool) -> Result<ContactMessage, ContentError> {
    sqlx::query_as::<_, ContactMessageRow>(&format!(
        "UPDATE contact_messages SET is_read = $2 WHERE id = $1 RETURNING {COLUMNS}"
    ))
    .bind(id)
    .bind(is_read)
    .fetch_optional(pool)
    .await?
    .map(ContactMessage::from)
    .ok_or_else(|| ContentError::NotFound(format!("message {id}")))
}

pub async fn delete(pool: &PgPool, id: &Uuid) -> Result<(), ContentError> {
    let result = sqlx::query("DELETE FROM contact_messages WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(ContentError::NotFound(format!("message {id}")));
    }
    Ok(())
}

pub async fn unread_count(pool: &PgPool) -> Result<i64, ContentError> {
    let n = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM contact_messages WHERE NOT is_read")
        .fetch_one(pool)
        .await?;
    Ok(n)
}
