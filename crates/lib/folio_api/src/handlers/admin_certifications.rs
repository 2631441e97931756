//! Admin certification CRUD.

use axum::extract::{Path, State};
use tracing::info;

use folio_core::content::certifications;
use folio_core::models::content::Certification;
use folio_core::validation::certification::{
    CreateCertificationRequest, UpdateCertificationRequest,
};

use super::{ApiResult, CreatedResult, created, ok, parse_id, require_changes};
use crate::AppState;
use crate::extract::ValidatedJson;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::ResourceId;

pub async fn list_handler(State(state): State<AppState>) -> ApiResult<Vec<Certification>> {
    ok(certifications::list_all(&state.pool).await?)
}

pub async fn get_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Certification> {
    let id = parse_id(&id, "certification")?;
    ok(certifications::get(&state.pool, &id).await?)
}

pub async fn create_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ValidatedJson(body): ValidatedJson<CreateCertificationRequest>,
) -> CreatedResult<Certification> {
    let cert = certifications::create(&state.pool, body).await?;
    info!(certification_id = %cert.id, by = %user.0.sub, "certification created");
    created(cert)
}

pub async fn update_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
    ValidatedJson(body): ValidatedJson<UpdateCertificationRequest>,
) -> ApiResult<Certification> {
    let id = parse_id(&id, "certification")?;
    require_changes(body.is_empty())?;
    let cert = certifications::update(&state.pool, &id, body).await?;
    info!(certification_id = %id, by = %user.0.sub, "certification updated");
    ok(cert)
}

pub async fn delete_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
) -> ApiResult<ResourceId> {
    let id = parse_id(&id, "certification")?;
    certifications::delete(&state.pool, &id).await?;
    info!(certification_id = %id, by = %user.0.sub, "certification deleted");
    ok(ResourceId { id: id.to_string() })
}
