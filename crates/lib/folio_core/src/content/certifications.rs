//! Certification queries.

use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::{ContentError, push_patch};
use crate::models::content::{Certification, CertificationRow};
use crate::validation::certification::{CreateCertificationRequest, UpdateCertificationRequest};

const COLUMNS: &str = "id, title, issuer, issued_on, credential_id, credential_url, image_url, \
     published, sort_order, created_at, updated_at";

pub async fn list_published(pool: &PgPool) -> Result<Vec<Certification>, ContentError> {
    let rows = sqlx::query_as::<_, CertificationRow>(&format!(
        "SELECT {COLUMNS} FROM certifications WHERE published \
         ORDER BY sort_order ASC, issued_on DESC"
    ))
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(Certification::from).collect())
}

pub async fn find_published(pool: &PgPool, id: &Uuid) -> Result<Certification, ContentError> {
    sqlx::query_as::<_, CertificationRow>(&format!(
        "SELECT {COLUMNS} FROM certifications WHERE id = $1 AND published"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?
    .map(Certification::from)
    .ok_or_else(|| ContentError::NotFound(format!("certification {id}")))
}

pub async fn list_all(pool: &PgPool) -> Result<Vec<Certification>, ContentError> {
    let rows = sqlx::query_as::<_, CertificationRow>(&format!(
        "SELECT {COLUMNS} FROM certifications ORDER BY sort_order ASC, issued_on DESC"
    ))
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(Certification::from).collect())
}

pub async fn get(pool: &PgPool, id: &Uuid) -> Result<Certification, ContentError> {
    sqlx::query_as::<_, CertificationRow>(&format!(
        "SELECT {COLUMNS} FROM certifications WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?
    .map(Certification::from)
    .ok_or_else(|| ContentError::NotFound(format!("certification {id}")))
}

pub async fn create(
    pool: &PgPool,
    req: CreateCertificationRequest,
) -> Result<Certification, ContentError> {
    let row = sqlx::query_as::<_, CertificationRow>(&format!(
        "INSERT INTO certifications (id, title, issuer, issued_on, credential_id, credential_url, \
         image_url, published, sort_order) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
         RETURNING {COLUMNS}"
    ))
    .bind(Uuid::now_v7())
    .bind(req.title.map(Json))
    .bind(req.issuer)
    .bind(req.issued_on)
    .bind(req.credential_id)
    .bind(req.credential_url)
    .bind(req.image_url)
    .bind(req.published)
    .bind(req.sort_order)
    .fetch_one(pool)
    .await?;
    Ok(row.into())
}

pub async fn update(
    pool: &PgPool,
    id: &Uuid,
    changes: UpdateCertificationRequest,
) -> Result<Certification, ContentError> {
    let mut qb = QueryBuilder::<Postgres>::new("UPDATE certifications SET ");
    {
        let mut set = qb.separated(", ");
        push_patch(&mut set, "title", &changes.title.map(Json));
        push_patch(&mut set, "issuer", &changes.issuer);
        push_patch(&mut set, "issued_on", &changes.issued_on);
        push_patch(&mut set, "credential_id", &changes.credential_id);
        push_patch(&mut set, "credential_url", &changes.credential_url);
        push_patch(&mut set, "image_url", &changes.image_url);
        push_patch(&mut set, "published", &changes.published);
        push_patch(&mut set, "sort_order", &changes.sort_order);
        set.push("updated_at = now()");
    }
    qb.push(" WHERE id = ").push_bind(*id);
    qb.push(" RETURNING ").push(COLUMNS);

    qb.build_query_as::<CertificationRow>()
        .fetch_optional(pool)
        .await?
        .map(Certification::from)
        .ok_or_else(|| ContentError::NotFound(format!("certification {id}")))
}

pub async fn delete(pool: &PgPool, id: &Uuid) -> Result<(), ContentError> {
    let result = sqlx::query("DELETE FROM certifications WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(ContentError::NotFound(format!("certification {id}")));
    }
    Ok(())
}

pub async fn count(pool: &PgPool) -> Result<i64, ContentError> {
    let n = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM certifications")
        .fetch_one(pool)
        .await?;
    Ok(n)
}
