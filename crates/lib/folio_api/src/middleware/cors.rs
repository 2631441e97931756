//! Cross-origin filter.
//!
//! Origins are checked against an allow-list that depends on the
//! environment: production accepts only the configured origins, other
//! environments also accept the usual local dev servers. A matching origin
//! is echoed back with credentials allowed; anything else simply gets no
//! CORS headers. Requests are never rejected here.

use std::sync::Arc;
use std::time::Duration;

use axum::http::{HeaderName, HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::config::{ApiConfig, Environment};

/// Local front-end dev servers, accepted outside production only.
pub const DEVELOPMENT_ORIGINS: &[&str] = &[
    "http://localhost:3000",
    "http://127.0.0.1:3000",
    "http://localhost:4321",
    "http://localhost:5173",
    "http://127.0.0.1:5173",
];

const REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

#[derive(Debug, Clone)]
pub struct CorsPolicy {
    origins: Vec<String>,
}

impl CorsPolicy {
    pub fn new(environment: Environment, configured: &[String]) -> Self {
        let mut origins: Vec<String> = configured.iter().map(|o| o.to_ascii_lowercase()).collect();
        if environment != Environment::Production {
            origins.extend(DEVELOPMENT_ORIGINS.iter().map(|o| o.to_string()));
        }
        origins.sort();
        origins.dedup();
        Self { origins }
    }

    pub fn from_config(config: &ApiConfig) -> Self {
        Self::new(config.environment, &config.allowed_origins)
    }

    /// Whether `origin` is on the allow-list.
    pub fn allows(&self, origin: &str) -> bool {
        let origin = origin.trim_end_matches('/');
        self.origins.iter().any(|o| o.eq_ignore_ascii_case(origin))
    }

    /// Build the tower-http layer enforcing this policy.
    pub fn layer(self) -> CorsLayer {
        let policy = Arc::new(self);
        CorsLayer::new()
            .allow_origin(AllowOrigin::predicate(move |origin: &HeaderValue, _| {
                origin.to_str().is_ok_and(|o| policy.allows(o))
            }))
            .allow_credentials(true)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PATCH,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE, header::ACCEPT, REQUEST_ID])
            .expose_headers([REQUEST_ID])
            .max_age(Duration::from_secs(600))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn production_only_allows_configured_origins() {
        let policy = CorsPolicy::new(
            Environment::Production,
            &["https://folio.example".to_string()],
        );
        assert!(policy.allows("https://folio.example"));
        assert!(policy.allows("https://FOLIO.example"));
        assert!(!policy.allows("http://localhost:3000"));
        assert!(!policy.allows("https://evil.example"));
        assert!(!policy.allows("https://folio.example.evil.example"));
    }

    #[test]
    fn development_adds_local_origins() {
        let policy = CorsPolicy::new(Environment::Development, &[]);
        assert!(policy.allows("http://localhost:3000"));
        assert!(policy.allows("http://127.0.0.1:5173"));
        assert!(!policy.allows("http://localhost:9999"));
        assert!(!policy.allows("null"));
    }

    #[test]
    fn duplicates_are_collapsed() {
        let policy = CorsPolicy::new(
            Environment::Development,
            &["http://localhost:3000".to_string()],
        );
        let count = policy
            .origins
            .iter()
            .filter(|o| *o == "http://localhost:3000")
            .count();
        assert_eq!(count, 1);
    }
}
