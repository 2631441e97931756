//! `PATCH /admin/account/password`: change the caller's own password.

use axum::extract::State;

use folio_core::validation::account::ChangePasswordRequest;

use super::{ApiResult, ok};
use crate::AppState;
use crate::extract::ValidatedJson;
use crate::middleware::auth::AuthenticatedUser;
use crate::services::auth;

pub async fn change_password_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ValidatedJson(body): ValidatedJson<ChangePasswordRequest>,
) -> ApiResult<serde_json::Value> {
    let account_id = user.account_id()?;
    auth::change_password(
        &state.pool,
        &account_id,
        &body.current_password,
        &body.new_password,
    )
    .await?;
    ok(serde_json::json!({ "updated": true }))
}
