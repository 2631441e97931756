//! Authorization gate.
//!
//! Runs before routing for every request. Protected routes need a valid
//! session cookie whose role claim matches the route's role; on success the
//! verified claims are attached to the request as [`AuthenticatedUser`].
//! Denials are reported per path family: JSON 401/403 for the API, a
//! redirect to the login page for the dashboard.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{Method, StatusCode, request::Parts},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use tracing::debug;
use uuid::Uuid;

use folio_core::auth::jwt::verify_session_token;
use folio_core::models::auth::TokenClaims;

use crate::AppState;
use crate::error::AppError;
use crate::routes::{PathFamily, RouteClass, classify};
use crate::services::cookies::SESSION_COOKIE;

/// Verified session claims, stored in request extensions by the gate.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub TokenClaims);

impl AuthenticatedUser {
    pub fn account_id(&self) -> Result<Uuid, AppError> {
        Uuid::parse_str(&self.0.sub).map_err(|_| AppError::Unauthorized("Unauthorized".into()))
    }
}

impl<S: Send + Sync> FromRequestParts<S> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("Unauthorized".into()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denial {
    /// No token, or the token failed verification.
    Unauthenticated,
    /// Valid token, wrong role.
    Forbidden,
}

#[derive(Debug)]
pub enum GateDecision {
    /// Public or unclassified; the gate does not interfere.
    PassThrough,
    /// OPTIONS on a protected route; answered without credentials.
    Preflight,
    Allow(TokenClaims),
    Deny { family: PathFamily, denial: Denial },
}

/// Decide what happens to a request. Pure: no I/O beyond logging.
pub fn evaluate(method: &Method, path: &str, token: Option<&str>, secret: &[u8]) -> GateDecision {
    let (family, required) = match classify(method, path) {
        RouteClass::Protected { family, role } => (family, role),
        RouteClass::Public | RouteClass::Unclassified => return GateDecision::PassThrough,
    };

    if method == Method::OPTIONS {
        return GateDecision::Preflight;
    }

    let Some(token) = token.filter(|t| !t.is_empty()) else {
        debug!(path, "no session cookie on protected route");
        return GateDecision::Deny {
            family,
            denial: Denial::Unauthenticated,
        };
    };

    let claims = match verify_session_token(token, secret) {
        Ok(claims) => claims,
        Err(kind) => {
            debug!(path, ?kind, "session token rejected");
            return GateDecision::Deny {
                family,
                denial: Denial::Unauthenticated,
            };
        }
    };

    if claims.role() != Some(required) {
        debug!(path, role = %claims.role, "role not permitted");
        return GateDecision::Deny {
            family,
            denial: Denial::Forbidden,
        };
    }

    GateDecision::Allow(claims)
}

/// Axum middleware wrapping the whole router.
pub async fn authorize(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    let jar = CookieJar::from_headers(request.headers());
    let token = jar.get(SESSION_COOKIE).map(|c| c.value().to_string());

    let decision = evaluate(
        request.method(),
        request.uri().path(),
        token.as_deref(),
        state.config.jwt_secret.as_bytes(),
    );

    match decision {
        GateDecision::PassThrough => next.run(request).await,
        GateDecision::Preflight => StatusCode::NO_CONTENT.into_response(),
        GateDecision::Allow(claims) => {
            request.extensions_mut().insert(AuthenticatedUser(claims));
            next.run(request).await
        }
        GateDecision::Deny {
            family: PathFamily::Api,
            denial: Denial::Unauthenticated,
        } => AppError::Unauthorized("Unauthorized".into()).into_response(),
        GateDecision::Deny {
            family: PathFamily::Api,
            denial: Denial::Forbidden,
        } => AppError::Forbidden("Forbidden".into()).into_response(),
        GateDecision::Deny {
            family: PathFamily::Dashboard,
            ..
        } => {
            let original = request
                .uri()
                .path_and_query()
                .map(|pq| pq.as_str())
                .unwrap_or("/");
            Redirect::temporary(&login_redirect(&state.config.login_path, original))
                .into_response()
        }
    }
}

/// `login_path?from=<original>`, with the original path percent-encoded.
pub fn login_redirect(login_path: &str, original: &str) -> String {
    let from: String = url::form_urlencoded::byte_serialize(original.as_bytes()).collect();
    let sep = if login_path.contains('?') { '&' } else { '?' };
    format!("{login_path}{sep}from={from}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use folio_core::auth::TokenError;
    use folio_core::auth::jwt::{issue_session_token, issue_session_token_at, sign_claims};
    use folio_core::models::auth::{Account, Role};

    const SECRET: &[u8] = b"gate-test-secret-0123456789abcdef";

    fn admin() -> Account {
        Account {
            id: Uuid::now_v7(),
            email: "admin@folio.test".into(),
            role: Role::Admin,
            created_at: Utc::now(),
        }
    }

    fn deny(decision: GateDecision) -> (PathFamily, Denial) {
        match decision {
            GateDecision::Deny { family, denial } => (family, denial),
            other => panic!("expected denial, got {other:?}"),
        }
    }

    #[test]
    fn public_routes_pass_without_token() {
        assert!(matches!(
            evaluate(&Method::GET, "/projects", None, SECRET),
            GateDecision::PassThrough
        ));
    }

    #[test]
    fn missing_token_is_unauthenticated() {
        assert_eq!(
            deny(evaluate(&Method::GET, "/admin/projects", None, SECRET)),
            (PathFamily::Api, Denial::Unauthenticated)
        );
        assert_eq!(
            deny(evaluate(&Method::GET, "/admin/projects", Some(""), SECRET)),
            (PathFamily::Api, Denial::Unauthenticated)
        );
    }

    #[test]
    fn preflight_needs_no_token() {
        assert!(matches!(
            evaluate(&Method::OPTIONS, "/admin/projects", None, SECRET),
            GateDecision::Preflight
        ));
    }

    #[test]
    fn valid_admin_token_is_allowed() {
        let token = issue_session_token(&admin(), SECRET).unwrap();
        match evaluate(&Method::DELETE, "/admin/projects/x", Some(&token), SECRET) {
            GateDecision::Allow(claims) => assert_eq!(claims.role, "admin"),
            other => panic!("expected allow, got {other:?}"),
        }
    }

    #[test]
    fn other_roles_are_forbidden() {
        let mut claims = TokenClaims {
            sub: Uuid::now_v7().to_string(),
            email: "editor@folio.test".into(),
            role: "editor".into(),
            iat: Utc::now().timestamp(),
            exp: (Utc::now() + Duration::days(1)).timestamp(),
        };
        let token = sign_claims(&claims, SECRET).unwrap();
        assert_eq!(
            deny(evaluate(&Method::GET, "/admin/projects", Some(&token), SECRET)),
            (PathFamily::Api, Denial::Forbidden)
        );

        claims.role = "ADMIN".into();
        let token = sign_claims(&claims, SECRET).unwrap();
        assert_eq!(
            deny(evaluate(&Method::GET, "/dashboard", Some(&token), SECRET)),
            (PathFamily::Dashboard, Denial::Forbidden)
        );
    }

    #[test]
    fn expired_and_foreign_tokens_are_unauthenticated() {
        let expired =
            issue_session_token_at(&admin(), Utc::now() - Duration::days(8), SECRET).unwrap();
        assert_eq!(
            verify_session_token(&expired, SECRET).unwrap_err(),
            TokenError::Expired
        );
        assert_eq!(
            deny(evaluate(&Method::GET, "/admin/about", Some(&expired), SECRET)),
            (PathFamily::Api, Denial::Unauthenticated)
        );

        let foreign = issue_session_token(&admin(), b"another-secret-0123456789abcdefgh").unwrap();
        assert_eq!(
            deny(evaluate(&Method::GET, "/dashboard", Some(&foreign), SECRET)),
            (PathFamily::Dashboard, Denial::Unauthenticated)
        );
    }

    #[test]
    fn login_redirect_encodes_original_path() {
        assert_eq!(
            login_redirect("/login", "/dashboard/projects?tab=2"),
            "/login?from=%2Fdashboard%2Fprojects%3Ftab%3D2"
        );
        assert_eq!(
            login_redirect("/login?lang=fr", "/dashboard"),
            "/login?lang=fr&from=%2Fdashboard"
        );
    }
}
