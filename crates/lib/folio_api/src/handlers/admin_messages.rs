//! Admin contact-message inbox.

use axum::extract::{Path, State};
use tracing::info;

use folio_core::content::messages;
use folio_core::models::content::ContactMessage;
use folio_core::validation::contact::UpdateMessageRequest;

use super::{ApiResult, ok, parse_id};
use crate::AppState;
use crate::extract::ValidatedJson;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::ResourceId;

pub async fn list_handler(State(state): State<AppState>) -> ApiResult<Vec<ContactMessage>> {
    ok(messages::list(&state.pool).await?)
}

/// `PATCH /admin/messages/{id}`: mark read or unread.
pub async fn update_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(body): ValidatedJson<UpdateMessageRequest>,
) -> ApiResult<ContactMessage> {
    let id = parse_id(&id, "message")?;
    ok(messages::set_read(&state.pool, &id, body.is_read).await?)
}

pub async fn delete_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
) -> ApiResult<ResourceId> {
    let id = parse_id(&id, "message")?;
    messages::delete(&state.pool, &id).await?;
    info!(message_id = %id, by = %user.0.sub, "message deleted");
    ok(ResourceId { id: id.to_string() })
}
