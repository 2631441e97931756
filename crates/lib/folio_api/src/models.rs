//! Response envelopes shared by every handler.

use serde::{Deserialize, Serialize};

use folio_core::models::auth::SessionUser;
use folio_core::validation::FieldIssue;

/// `{ "success": true, "data": ... }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// `{ "success": false, "error": ..., "details": [...] }`
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldIssue>>,
}

/// Body of `/auth/login` and `/auth/me`; `user` is null when signed out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionData {
    pub user: Option<SessionUser>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthData {
    pub status: String,
    pub version: String,
    pub db_connected: bool,
}

/// Body naming the resource a write touched (contact submission, delete).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceId {
    pub id: String,
}
