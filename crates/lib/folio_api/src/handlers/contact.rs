//! `POST /contact`: public contact form.

use axum::extract::State;
use tracing::info;

use folio_core::content::messages;
use folio_core::validation::contact::ContactRequest;

use super::{CreatedResult, created};
use crate::AppState;
use crate::extract::ValidatedJson;
use crate::models::ResourceId;

/// Stores the message and answers with its ID only; the inbox is admin-only.
pub async fn submit_contact_handler(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<ContactRequest>,
) -> CreatedResult<ResourceId> {
    let message = messages::create(&state.pool, body).await?;
    info!(message_id = %message.id, "contact message received");
    created(ResourceId {
        id: message.id.to_string(),
    })
}
