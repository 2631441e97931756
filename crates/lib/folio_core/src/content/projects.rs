//! Project queries.

use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::{ContentError, push_patch, slug_conflict};
use crate::models::content::{Project, ProjectRow};
use crate::validation::project::{CreateProjectRequest, UpdateProjectRequest};

const COLUMNS: &str = "id, slug, title, summary, description, tech_stack, github_url, live_url, \
     image_url, published, featured, sort_order, created_at, updated_at";

/// Published projects, optionally only featured ones.
pub async fn list_published(pool: &PgPool, featured_only: bool) -> Result<Vec<Project>, ContentError> {
    let rows = sqlx::query_as::<_, ProjectRow>(&format!(
        "SELECT {COLUMNS} FROM projects \
         WHERE published AND ($1 = false OR featured) \
         ORDER BY sort_order ASC, created_at DESC"
    ))
    .bind(featured_only)
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(Project::from).collect())
}

/// A published project by slug.
pub async fn find_published_by_slug(pool: &PgPool, slug: &str) -> Result<Project, ContentError> {
    sqlx::query_as::<_, ProjectRow>(&format!(
        "SELECT {COLUMNS} FROM projects WHERE slug = $1 AND published"
    ))
    .bind(slug)
    .fetch_optional(pool)
    .await?
    .map(Project::from)
    .ok_or_else(|| ContentError::NotFound(format!("project '{slug}'")))
}

/// All projects, for the admin list.
pub async fn list_all(pool: &PgPool) -> Result<Vec<Project>, ContentError> {
    let rows = sqlx::query_as::<_, ProjectRow>(&format!(
        "SELECT {COLUMNS} FROM projects ORDER BY sort_order ASC, created_at DESC"
    ))
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(Project::from).collect())
}

pub async fn get(pool: &PgPool, id: &Uuid) -> Result<Project, ContentError> {
    sqlx::query_as::<_, ProjectRow>(&format!("SELECT {COLUMNS} FROM projects WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await?
        .map(Project::from)
        .ok_or_else(|| ContentError::NotFound(format!("project {id}")))
}

pub async fn create(pool: &PgPool, req: CreateProjectRequest) -> Result<Project, ContentError> {
    let CreateProjectRequest {
        slug,
        title,
        summary,
        description,
        tech_stack,
        github_url,
        live_url,
        image_url,
        published,
        featured,
        sort_order,
    } = req;

    sqlx::query_as::<_, ProjectRow>(&format!(
        "INSERT INTO projects (id, slug, title, summary, description, tech_stack, github_url, \
         live_url, image_url, published, featured, sort_order) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
         RETURNING {COLUMNS}"
    ))
    .bind(Uuid::now_v7())
    .bind(&slug)
    .bind(title.map(Json))
    .bind(summary.map(Json))
    .bind(description.map(Json))
    .bind(tech_stack)
    .bind(github_url)
    .bind(live_url)
    .bind(image_url)
    .bind(published)
    .bind(featured)
    .bind(sort_order)
    .fetch_one(pool)
    .await
    .map(Project::from)
    .map_err(|e| slug_conflict(e, Some(&slug)))
}

pub async fn update(
    pool: &PgPool,
    id: &Uuid,
    changes: UpdateProjectRequest,
) -> Result<Project, ContentError> {
    let mut qb = QueryBuilder::<Postgres>::new("UPDATE projects SET ");
    {
        let mut set = qb.separated(", ");
        push_patch(&mut set, "slug", &changes.slug);
        push_patch(&mut set, "title", &changes.title.clone().map(Json));
        push_patch(&mut set, "summary", &changes.summary.clone().map(Json));
        push_patch(&mut set, "description", &changes.description.clone().map(Json));
        push_patch(&mut set, "tech_stack", &changes.tech_stack);
        push_patch(&mut set, "github_url", &changes.github_url);
        push_patch(&mut set, "live_url", &changes.live_url);
        push_patch(&mut set, "image_url", &changes.image_url);
        push_patch(&mut set, "published", &changes.published);
        push_patch(&mut set, "featured", &changes.featured);
        push_patch(&mut set, "sort_order", &changes.sort_order);
        set.push("updated_at = now()");
    }
    qb.push(" WHERE id = ").push_bind(*id);
    qb.push(" RETURNING ").push(COLUMNS);

    qb.build_query_as::<ProjectRow>()
        .fetch_optional(pool)
        .await
        .map_err(|e| slug_conflict(e, changes.slug.as_set().map(String::as_str)))?
        .map(Project::from)
        .ok_or_else(|| ContentError::NotFound(format!("project {id}")))
}

/// Hard delete. `NotFound` if nothing was deleted.
pub async fn delete(pool: &PgPool, id: &Uuid) -> Result<(), ContentError> {
    let result = sqlx::query("DELETE FROM projects WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(ContentError::NotFound(format!("project {id}")));
    }
    Ok(())
}

pub async fn count(pool: &PgPool) -> Result<i64, ContentError> {
    let n = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM projects")
        .fetch_one(pool)
        .await?;
    Ok(n)
}
