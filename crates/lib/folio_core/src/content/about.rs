//! About-page queries. The `about` table holds exactly one row (`id = 1`),
//! created by the migrations with an empty headline.

use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::{ContentError, push_patch};
use crate::models::content::{About, AboutRow};
use crate::validation::about::UpdateAboutRequest;

const COLUMNS: &str =
    "headline, bio, location, email, resume_url, avatar_url, socials, updated_at";

/// The about page as stored, including an unfilled one.
pub async fn get(pool: &PgPool) -> Result<About, ContentError> {
    sqlx::query_as::<_, AboutRow>(&format!("SELECT {COLUMNS} FROM about WHERE id = 1"))
        .fetch_optional(pool)
        .await?
        .map(About::from)
        .ok_or_else(|| ContentError::NotFound("about".into()))
}

/// The about page for public readers; `NotFound` until a headline is set.
pub async fn get_public(pool: &PgPool) -> Result<About, ContentError> {
    let about = get(pool).await?;
    if about.headline.en.trim().is_empty() {
        return Err(ContentError::NotFound("about".into()));
    }
    Ok(about)
}

pub async fn update(pool: &PgPool, changes: UpdateAboutRequest) -> Result<About, ContentError> {
    let mut qb = QueryBuilder::<Postgres>::new("UPDATE about SET ");
    {
        let mut set = qb.separated(", ");
        push_patch(&mut set, "headline", &changes.headline.map(Json));
        push_patch(&mut set, "bio", &changes.bio.map(Json));
        push_patch(&mut set, "location", &changes.location);
        push_patch(&mut set, "email", &changes.email);
        push_patch(&mut set, "resume_url", &changes.resume_url);
        push_patch(&mut set, "avatar_url", &changes.avatar_url);
        push_patch(&mut set, "socials", &changes.socials.map(Json));
        set.push("updated_at = now()");
    }
    qb.push(" WHERE id = 1 RETURNING ").push(COLUMNS);

    qb.build_query_as::<AboutRow>()
        .fetch_optional(pool)
        .await?
        .map(About::from)
        .ok_or_else(|| ContentError::NotFound("about".into()))
}
