//! Request handlers.

pub mod about;
pub mod account;
pub mod admin_about;
pub mod admin_certifications;
pub mod admin_messages;
pub mod admin_projects;
pub mod auth;
pub mod certifications;
pub mod contact;
pub mod dashboard;
pub mod health;
pub mod projects;

use axum::Json;
use axum::http::StatusCode;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::ApiResponse;

/// Handler result carrying the success envelope.
pub type ApiResult<T> = AppResult<Json<ApiResponse<T>>>;

/// Handler result for a created resource (201).
pub type CreatedResult<T> = AppResult<(StatusCode, Json<ApiResponse<T>>)>;

pub fn ok<T>(data: T) -> ApiResult<T> {
    Ok(Json(ApiResponse::ok(data)))
}

pub fn created<T>(data: T) -> CreatedResult<T> {
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(data))))
}

/// Parse a path ID; a malformed one names nothing, so it is a 404.
pub fn parse_id(raw: &str, what: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound(format!("Not found: {what} {raw}")))
}

/// Reject a patch body that changes nothing.
pub fn require_changes(is_empty: bool) -> AppResult<()> {
    if is_empty {
        return Err(AppError::invalid_field("body", "No fields to update"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_ids_are_not_found() {
        let err = parse_id("not-a-uuid", "project").unwrap_err();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn empty_patch_is_rejected() {
        assert!(require_changes(false).is_ok());
        assert_eq!(
            require_changes(true).unwrap_err().status(),
            StatusCode::BAD_REQUEST
        );
    }
}
