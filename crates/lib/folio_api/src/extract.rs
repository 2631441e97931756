//! Request extractors.

use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use serde_path_to_error::Segment;
use validator::Validate;

use folio_core::validation::{FieldIssue, field_issues};

use crate::error::AppError;

/// JSON body that has been deserialized and then validated.
///
/// Unreadable bodies and schema failures both come back as a 400 in the
/// error envelope; handlers only ever see valid input. Fields of the wrong
/// JSON type are reported by path alongside the schema failures of the
/// remaining fields.
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<Value>::from_request(req, state).await?;
        let (parsed, mut issues) = deserialize_fields::<T>(body);

        if let Some(value) = &parsed {
            if let Err(errors) = value.validate() {
                // A mistyped key was dropped before parsing; its schema
                // failures would only repeat the type error.
                let mistyped: Vec<String> =
                    issues.iter().map(|i| top_level(&i.field).to_string()).collect();
                issues.extend(
                    field_issues(&errors)
                        .into_iter()
                        .filter(|i| !mistyped.iter().any(|m| m == top_level(&i.field))),
                );
            }
        }

        match parsed {
            Some(value) if issues.is_empty() => Ok(ValidatedJson(value)),
            _ => {
                issues.sort_by(|a, b| {
                    a.field.cmp(&b.field).then_with(|| a.message.cmp(&b.message))
                });
                Err(AppError::Validation(issues))
            }
        }
    }
}

/// Deserialize `body` into `T`, collecting one issue per mistyped top-level key.
///
/// Each failing key is removed and parsing retried, so the loop ends after at
/// most one pass per key. Returns `None` when the body cannot be parsed even
/// without the failing keys.
fn deserialize_fields<T: DeserializeOwned>(mut body: Value) -> (Option<T>, Vec<FieldIssue>) {
    let mut issues = Vec::new();
    loop {
        let result: Result<T, _> = serde_path_to_error::deserialize(&body);
        let err = match result {
            Ok(value) => return (Some(value), issues),
            Err(err) => err,
        };

        let key = match err.path().iter().next() {
            Some(Segment::Map { key }) => Some(key.clone()),
            _ => None,
        };
        let removed = key
            .as_ref()
            .and_then(|k| body.as_object_mut().and_then(|o| o.remove(k)));

        if removed.is_none() {
            // Root-level failure (not an object, or a required key now
            // missing). Only worth reporting if nothing else was.
            if issues.is_empty() {
                issues.push(FieldIssue {
                    field: "body".into(),
                    message: err.inner().to_string(),
                });
            }
            return (None, issues);
        }

        issues.push(FieldIssue {
            field: err.path().to_string(),
            message: err.inner().to_string(),
        });
    }
}

fn top_level(field: &str) -> &str {
    field.split('.').next().unwrap_or(field)
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::validation::project::CreateProjectRequest;
    use serde_json::json;

    #[test]
    fn every_mistyped_key_is_reported_by_path() {
        let body = json!({
            "slug": "ok",
            "published": "yes",
            "sortOrder": "x",
            "title": {"en": 5},
        });
        let (parsed, issues) = deserialize_fields::<CreateProjectRequest>(body);
        assert!(parsed.is_some());
        let mut fields: Vec<&str> = issues.iter().map(|i| i.field.as_str()).collect();
        fields.sort();
        assert_eq!(fields, vec!["published", "sortOrder", "title.en"]);
        assert!(issues.iter().all(|i| i.message.contains("invalid type")));
    }

    #[test]
    fn well_typed_body_has_no_issues() {
        let body = json!({"slug": "ok", "published": true});
        let (parsed, issues) = deserialize_fields::<CreateProjectRequest>(body);
        assert!(parsed.is_some());
        assert!(issues.is_empty());
    }

    #[test]
    fn non_object_body_is_a_body_issue() {
        let (parsed, issues) = deserialize_fields::<CreateProjectRequest>(json!("title"));
        assert!(parsed.is_none());
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field, "body");
    }
}
