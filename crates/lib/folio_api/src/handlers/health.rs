//! `GET /health`: liveness plus database reachability.

use axum::extract::State;
use tracing::warn;

use super::{ApiResult, ok};
use crate::AppState;
use crate::models::HealthData;

pub async fn health_handler(State(state): State<AppState>) -> ApiResult<HealthData> {
    let db_connected = match sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(&state.pool)
        .await
    {
        Ok(_) => true,
        Err(e) => {
            warn!("health check: database unreachable: {e}");
            false
        }
    };

    ok(HealthData {
        status: if db_connected { "ok" } else { "degraded" }.into(),
        version: folio_core::version().to_string(),
        db_connected,
    })
}
