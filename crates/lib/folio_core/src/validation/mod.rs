//! Request schemas and their validation.
//!
//! Every write body is deserialized into one of the schema types below and
//! then checked through the `validator::Validate` trait. Flat schemas derive
//! it; schemas with patch fields or nested bilingual text implement it with
//! [`Checker`]. Either way every failing field is reported, not just the
//! first.

pub mod about;
pub mod account;
pub mod certification;
pub mod contact;
pub mod patch;
pub mod project;

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use url::Url;
use validator::{ValidateEmail, ValidationError, ValidationErrors};

use crate::models::content::LocalizedText;

pub use patch::Patch;
pub use validator::Validate;

/// Lowercase alphanumeric words joined by single hyphens.
pub static SLUG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("slug pattern is valid")
});

pub const SLUG_MESSAGE: &str =
    "Slug may only contain lowercase letters, digits, and single hyphens between words";

/// One failing field, as rendered in an error response's `details`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    pub field: String,
    pub message: String,
}

/// Flatten validation errors into one issue per failing constraint, ordered by field.
pub fn field_issues(errors: &ValidationErrors) -> Vec<FieldIssue> {
    let mut issues: Vec<FieldIssue> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            let field = field.to_string();
            errs.iter().map(move |e| FieldIssue {
                field: field.clone(),
                message: e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value ({})", e.code)),
            })
        })
        .collect();
    issues.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.message.cmp(&b.message)));
    issues
}

/// Accumulates field errors for hand-written `Validate` impls.
#[derive(Debug)]
pub struct Checker {
    errors: ValidationErrors,
}

impl Default for Checker {
    fn default() -> Self {
        Self::new()
    }
}

impl Checker {
    pub fn new() -> Self {
        Self {
            errors: ValidationErrors::new(),
        }
    }

    pub fn fail(&mut self, field: &'static str, code: &'static str, message: impl Into<String>) {
        let mut error = ValidationError::new(code);
        error.message = Some(Cow::Owned(message.into()));
        self.errors.add(field, error);
    }

    /// Character-count bounds, inclusive.
    pub fn length(&mut self, field: &'static str, value: &str, min: usize, max: usize) {
        let len = value.chars().count();
        if len < min || len > max {
            let message = if len < min && min == 1 {
                format!("{field} is required")
            } else {
                format!("{field} must be between {min} and {max} characters")
            };
            self.fail(field, "length", message);
        }
    }

    /// Absolute `http`/`https` URL.
    pub fn url(&mut self, field: &'static str, value: &str) {
        if !is_http_url(value) {
            self.fail(field, "url", format!("{field} must be a valid http(s) URL"));
        }
    }

    pub fn email(&mut self, field: &'static str, value: &str) {
        if !value.to_owned().validate_email() {
            self.fail(field, "email", "Invalid email format");
        }
    }

    pub fn slug(&mut self, field: &'static str, value: &str) {
        if value.is_empty() || value.len() > 100 || !SLUG_RE.is_match(value) {
            self.fail(field, "slug", SLUG_MESSAGE);
        }
    }

    pub fn range(&mut self, field: &'static str, value: i64, min: i64, max: i64) {
        if value < min || value > max {
            self.fail(field, "range", format!("{field} must be between {min} and {max}"));
        }
    }

    /// Bilingual text: `en` required, `fr` optional but never blank, both bounded.
    pub fn localized(
        &mut self,
        en_field: &'static str,
        fr_field: &'static str,
        value: &LocalizedText,
        max: usize,
    ) {
        self.length(en_field, value.en.trim(), 1, max);
        match value.fr.as_deref() {
            Some(fr) if fr.trim().is_empty() => {
                self.fail(fr_field, "length", format!("{fr_field} must not be blank"));
            }
            Some(fr) => self.length(fr_field, fr, 1, max),
            None => {}
        }
    }

    /// A patch on a NOT NULL column may not clear it.
    pub fn not_cleared<T>(&mut self, field: &'static str, patch: &Patch<T>) {
        if matches!(patch, Patch::Clear) {
            self.fail(field, "required", format!("{field} cannot be cleared"));
        }
    }

    pub fn finish(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

pub fn is_http_url(value: &str) -> bool {
    Url::parse(value)
        .map(|u| matches!(u.scheme(), "http" | "https") && u.host_str().is_some())
        .unwrap_or(false)
}
