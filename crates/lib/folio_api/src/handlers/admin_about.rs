//! Admin about-page editing.

use axum::extract::State;
use tracing::info;

use folio_core::content::about;
use folio_core::models::content::About;
use folio_core::validation::about::UpdateAboutRequest;

use super::{ApiResult, ok, require_changes};
use crate::AppState;
use crate::extract::ValidatedJson;
use crate::middleware::auth::AuthenticatedUser;

/// `GET /admin/about`: returned even while the headline is still empty.
pub async fn get_handler(State(state): State<AppState>) -> ApiResult<About> {
    ok(about::get(&state.pool).await?)
}

/// `PATCH /admin/about`
pub async fn update_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ValidatedJson(body): ValidatedJson<UpdateAboutRequest>,
) -> ApiResult<About> {
    require_changes(body.is_empty())?;
    let updated = about::update(&state.pool, body).await?;
    info!(by = %user.0.sub, "about page updated");
    ok(updated)
}
