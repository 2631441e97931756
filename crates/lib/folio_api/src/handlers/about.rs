//! `GET /about`: the public about page.

use axum::extract::State;

use folio_core::content::about;
use folio_core::models::content::About;

use super::{ApiResult, ok};
use crate::AppState;

pub async fn get_about_handler(State(state): State<AppState>) -> ApiResult<About> {
    ok(about::get_public(&state.pool).await?)
}
