//! Authentication domain models.
//!
//! `Account` is the only account type that can be serialized. The password
//! hash lives in `AccountCredential`, which has no `Serialize` impl.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account role: matches the `account_role` Postgres enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "account_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
}

impl Role {
    /// Database and claim text representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a role string is not a known role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRole(pub String);

impl fmt::Display for UnknownRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown role '{}'", self.0)
    }
}

impl std::error::Error for UnknownRole {}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// Administrator account as exposed outside the credential store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// Account plus its password hash, for login and password change only.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AccountCredential {
    #[sqlx(flatten)]
    pub account: Account,
    pub password_hash: String,
}

/// JWT claims embedded in session tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject: account ID (standard JWT `sub` claim).
    pub sub: String,
    /// Account email.
    pub email: String,
    /// Account role as text; unknown values are rejected by the gate, not the verifier.
    pub role: String,
    /// Issued at (unix timestamp).
    pub iat: i64,
    /// Expiry (unix timestamp).
    pub exp: i64,
}

impl TokenClaims {
    /// Parsed role, if the claim names a known role.
    pub fn role(&self) -> Option<Role> {
        self.role.parse().ok()
    }
}

/// Public identity view returned by `/auth/login` and `/auth/me`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    pub email: String,
    pub role: String,
}

impl From<&Account> for SessionUser {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id.to_string(),
            email: account.email.clone(),
            role: account.role.to_string(),
        }
    }
}

impl From<&TokenClaims> for SessionUser {
    fn from(claims: &TokenClaims) -> Self {
        Self {
            id: claims.sub.clone(),
            email: claims.email.clone(),
            role: claims.role.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_account() -> Account {
        Account {
            id: Uuid::nil(),
            email: "admin@x.io".into(),
            role: Role::Admin,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn role_round_trips_through_text() {
        assert_eq!("admin".parse::<Role>(), Ok(Role::Admin));
        assert_eq!(Role::Admin.to_string(), "admin");
        assert_eq!(
            "editor".parse::<Role>(),
            Err(UnknownRole("editor".into()))
        );
    }

    #[test]
    fn account_json_has_no_password_field() {
        let json = serde_json::to_value(sample_account()).unwrap();
        let obj = json.as_object().unwrap();
        assert!(obj.keys().all(|k| !k.to_lowercase().contains("password")));
        assert_eq!(json["role"], "admin");
        assert!(json.get("createdAt").is_some());
    }

    #[test]
    fn session_user_from_claims_keeps_role_text() {
        let claims = TokenClaims {
            sub: "abc".into(),
            email: "a@b.io".into(),
            role: "editor".into(),
            iat: 0,
            exp: 1,
        };
        assert_eq!(claims.role(), None);
        let user = SessionUser::from(&claims);
        assert_eq!(user.role, "editor");
        assert_eq!(user.id, "abc");
    }
}
