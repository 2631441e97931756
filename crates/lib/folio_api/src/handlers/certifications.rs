//! Public certification reads. Only published certifications are visible.

use axum::extract::{Path, State};

use folio_core::content::certifications;
use folio_core::models::content::Certification;

use super::{ApiResult, ok, parse_id};
use crate::AppState;

/// `GET /certifications`
pub async fn list_certifications_handler(
    State(state): State<AppState>,
) -> ApiResult<Vec<Certification>> {
    ok(certifications::list_published(&state.pool).await?)
}

/// `GET /certifications/{id}`
pub async fn get_certification_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Certification> {
    let id = parse_id(&id, "certification")?;
    ok(certifications::find_published(&state.pool, &id).await?)
}
