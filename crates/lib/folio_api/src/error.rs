//! Application error types and the JSON error envelope.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

use folio_core::auth::AuthError;
use folio_core::content::ContentError;
use folio_core::validation::{FieldIssue, field_issues};

use crate::models::ErrorResponse;

/// Convenience alias for handler return types.
pub type AppResult<T> = Result<T, AppError>;

/// Application-level errors with HTTP status mapping.
#[derive(Debug, Error)]
pub enum AppError {
    /// Schema validation failed; one detail per failing constraint.
    #[error("Validation failed")]
    Validation(Vec<FieldIssue>),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Internal server error")]
    Internal(String),
}

impl AppError {
    /// A single-field validation failure.
    pub fn invalid_field(field: &str, message: impl Into<String>) -> Self {
        AppError::Validation(vec![FieldIssue {
            field: field.to_string(),
            message: message.into(),
        }])
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            AppError::Validation(details) => ErrorResponse {
                success: false,
                error: "Validation failed".into(),
                details: Some(details),
            },
            AppError::BadRequest(m)
            | AppError::NotFound(m)
            | AppError::Unauthorized(m)
            | AppError::Forbidden(m) => ErrorResponse {
                success: false,
                error: m,
                details: None,
            },
            AppError::MethodNotAllowed => ErrorResponse {
                success: false,
                error: "Method not allowed".into(),
                details: None,
            },
            AppError::Internal(source) => {
                // Runs inside the request span, which carries method, URI and request id.
                error!(%source, "unexpected error");
                ErrorResponse {
                    success: false,
                    error: "Internal server error".into(),
                    details: None,
                }
            }
        };
        (status, Json(body)).into_response()
    }
}

impl From<ValidationErrors> for AppError {
    fn from(e: ValidationErrors) -> Self {
        AppError::Validation(field_issues(&e))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::invalid_field("body", rejection.body_text())
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => AppError::NotFound("Not found".into()),
            _ => AppError::Internal(e.to_string()),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::CredentialError => AppError::Unauthorized("Invalid credentials".into()),
            AuthError::TokenError(_) => AppError::Unauthorized("Unauthorized".into()),
            AuthError::ValidationError(msg) => AppError::BadRequest(msg),
            AuthError::DuplicateAccount(email) => {
                AppError::invalid_field("email", format!("An account for {email} already exists"))
            }
            AuthError::DbError(e) => AppError::from(e),
            AuthError::MissingSecret(msg) | AuthError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl From<ContentError> for AppError {
    fn from(e: ContentError) -> Self {
        match e {
            ContentError::NotFound(what) => AppError::NotFound(format!("Not found: {what}")),
            ContentError::DuplicateSlug(slug) => {
                AppError::invalid_field("slug", format!("Slug '{slug}' is already in use"))
            }
            ContentError::DbError(e) => AppError::from(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::validation::Validate;
    use folio_core::validation::contact::ContactRequest;

    async fn body_json(resp: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn internal_errors_hide_their_source() {
        let resp = AppError::Internal("connection refused at 10.0.0.3".into()).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(resp).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "Internal server error");
        assert!(json.get("details").is_none());
    }

    #[tokio::test]
    async fn validation_errors_list_every_field() {
        let req: ContactRequest = serde_json::from_str(r#"{"email":"nope"}"#).unwrap();
        let err = AppError::from(req.validate().unwrap_err());
        let resp = err.into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let json = body_json(resp).await;
        assert_eq!(json["error"], "Validation failed");
        let fields: Vec<&str> = json["details"]
            .as_array()
            .unwrap()
            .iter()
            .map(|d| d["field"].as_str().unwrap())
            .collect();
        assert_eq!(fields, vec!["email", "message", "name"]);
    }

    #[test]
    fn duplicate_slug_is_a_field_error() {
        let err = AppError::from(ContentError::DuplicateSlug("folio".into()));
        match err {
            AppError::Validation(details) => assert_eq!(details[0].field, "slug"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn row_not_found_is_404() {
        assert_eq!(
            AppError::from(sqlx::Error::RowNotFound).status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn bad_credentials_are_401() {
        let err = AppError::from(AuthError::CredentialError);
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.to_string(), "Unauthorized: Invalid credentials");
    }
}
