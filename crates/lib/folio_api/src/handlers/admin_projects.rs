//! Admin project CRUD. All projects are visible, published or not.

use axum::extract::{Path, State};
use tracing::info;

use folio_core::content::projects;
use folio_core::models::content::Project;
use folio_core::validation::project::{CreateProjectRequest, UpdateProjectRequest};

use super::{ApiResult, CreatedResult, created, ok, parse_id, require_changes};
use crate::AppState;
use crate::extract::ValidatedJson;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::ResourceId;

/// `GET /admin/projects`
pub async fn list_handler(State(state): State<AppState>) -> ApiResult<Vec<Project>> {
    ok(projects::list_all(&state.pool).await?)
}

/// `GET /admin/projects/{id}`
pub async fn get_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Project> {
    let id = parse_id(&id, "project")?;
    ok(projects::get(&state.pool, &id).await?)
}

/// `POST /admin/projects`
pub async fn create_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ValidatedJson(body): ValidatedJson<CreateProjectRequest>,
) -> CreatedResult<Project> {
    let project = projects::create(&state.pool, body).await?;
    info!(project_id = %project.id, slug = %project.slug, by = %user.0.sub, "project created");
    created(project)
}

/// `PATCH /admin/projects/{id}`: only the fields present in the body change.
pub async fn update_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
    ValidatedJson(body): ValidatedJson<UpdateProjectRequest>,
) -> ApiResult<Project> {
    let id = parse_id(&id, "project")?;
    require_changes(body.is_empty())?;
    let project = projects::update(&state.pool, &id, body).await?;
    info!(project_id = %id, by = %user.0.sub, "project updated");
    ok(project)
}

/// `DELETE /admin/projects/{id}`
pub async fn delete_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
) -> ApiResult<ResourceId> {
    let id = parse_id(&id, "project")?;
    projects::delete(&state.pool, &id).await?;
    info!(project_id = %id, by = %user.0.sub, "project deleted");
    ok(ResourceId { id: id.to_string() })
}
