//! Login and password-change schemas.

use serde::Deserialize;
use validator::{Validate, ValidationError, ValidationErrors};

use super::Checker;
use super::patch::trimmed;

/// Minimum length for a newly chosen password.
pub const MIN_PASSWORD_LEN: usize = 8;

/// bcrypt ignores input past 72 bytes; longer passwords are refused.
pub const MAX_PASSWORD_BYTES: usize = 72;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[serde(default)]
    #[validate(
        length(min = 1, message = "Password is required"),
        custom(function = "within_login_limit")
    )]
    pub password: String,
}

/// Upper bound on a submitted login password, in characters.
pub const MAX_LOGIN_PASSWORD_LEN: usize = 200;

fn within_login_limit(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() > MAX_LOGIN_PASSWORD_LEN {
        let mut error = ValidationError::new("length");
        error.message = Some(
            format!("Password must be at most {MAX_LOGIN_PASSWORD_LEN} characters").into(),
        );
        return Err(error);
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[serde(default)]
    pub current_password: String,
    #[serde(default)]
    pub new_password: String,
}

impl Validate for ChangePasswordRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut c = Checker::new();
        if self.current_password.is_empty() {
            c.fail("currentPassword", "required", "Current password is required");
        }
        check_new_password(&mut c, "newPassword", &self.new_password);
        if !self.new_password.is_empty() && self.new_password == self.current_password {
            c.fail(
                "newPassword",
                "unchanged",
                "New password must differ from the current password",
            );
        }
        c.finish()
    }
}

/// Rules for any password being set, shared with the operator CLI.
pub fn check_new_password(c: &mut Checker, field: &'static str, password: &str) {
    if password.chars().count() < MIN_PASSWORD_LEN {
        c.fail(
            field,
            "length",
            format!("Password must be at least {MIN_PASSWORD_LEN} characters"),
        );
    } else if password.len() > MAX_PASSWORD_BYTES {
        c.fail(
            field,
            "length",
            format!("Password must be at most {MAX_PASSWORD_BYTES} bytes"),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::field_issues;

    #[test]
    fn login_reports_both_fields() {
        let req: LoginRequest = serde_json::from_str(r#"{"email": "nope"}"#).unwrap();
        let issues = field_issues(&req.validate().unwrap_err());
        let fields: Vec<_> = issues.iter().map(|i| i.field.as_str()).collect();
        assert_eq!(fields, vec!["email", "password"]);
    }

    #[test]
    fn login_accepts_valid_body() {
        let req: LoginRequest =
            serde_json::from_str(r#"{"email": " admin@x.io ", "password": "pw", "extra": 1}"#)
                .unwrap();
        assert!(req.validate().is_ok());
        assert_eq!(req.email, "admin@x.io");
    }

    #[test]
    fn overlong_login_password_is_rejected() {
        let req = LoginRequest {
            email: "admin@x.io".into(),
            password: "p".repeat(MAX_LOGIN_PASSWORD_LEN + 1),
        };
        let issues = field_issues(&req.validate().unwrap_err());
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field, "password");
        assert_eq!(issues[0].message, "Password must be at most 200 characters");

        let req = LoginRequest {
            email: "admin@x.io".into(),
            password: "p".repeat(MAX_LOGIN_PASSWORD_LEN),
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn change_password_rules() {
        let req: ChangePasswordRequest =
            serde_json::from_str(r#"{"currentPassword": "", "newPassword": "short"}"#).unwrap();
        let issues = field_issues(&req.validate().unwrap_err());
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].field, "currentPassword");
        assert_eq!(issues[1].field, "newPassword");
    }

    #[test]
    fn change_password_must_differ() {
        let req = ChangePasswordRequest {
            current_password: "same-password".into(),
            new_password: "same-password".into(),
        };
        let issues = field_issues(&req.validate().unwrap_err());
        assert_eq!(issues[0].field, "newPassword");
    }

    #[test]
    fn overlong_password_rejected() {
        let mut c = Checker::new();
        check_new_password(&mut c, "password", &"x".repeat(MAX_PASSWORD_BYTES + 1));
        assert!(c.finish().is_err());
    }
}
