//! Route paths and the static route classification table.
//!
//! Classification is decided from the path alone, before routing. Protected
//! prefixes are matched first against a normalized path so no public entry
//! can shadow them, and prefix matching is plain `starts_with`: anything
//! under `/admin...` or `/dashboard...` is protected even if no handler
//! exists for it.

use axum::http::Method;

use folio_core::models::auth::Role;

pub const GET_HEALTH: &str = "/health";

pub const POST_AUTH_LOGIN: &str = "/auth/login";
pub const POST_AUTH_LOGOUT: &str = "/auth/logout";
pub const GET_AUTH_ME: &str = "/auth/me";

pub const PROJECTS: &str = "/projects";
pub const PROJECT_BY_SLUG: &str = "/projects/{slug}";
pub const CERTIFICATIONS: &str = "/certifications";
pub const CERTIFICATION_BY_ID: &str = "/certifications/{id}";
pub const ABOUT: &str = "/about";
pub const POST_CONTACT: &str = "/contact";

pub const ADMIN_PROJECTS: &str = "/admin/projects";
pub const ADMIN_PROJECT_BY_ID: &str = "/admin/projects/{id}";
pub const ADMIN_CERTIFICATIONS: &str = "/admin/certifications";
pub const ADMIN_CERTIFICATION_BY_ID: &str = "/admin/certifications/{id}";
pub const ADMIN_ABOUT: &str = "/admin/about";
pub const ADMIN_MESSAGES: &str = "/admin/messages";
pub const ADMIN_MESSAGE_BY_ID: &str = "/admin/messages/{id}";
pub const ADMIN_ACCOUNT_PASSWORD: &str = "/admin/account/password";

pub const DASHBOARD: &str = "/dashboard";

/// How a protected route reports a denial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathFamily {
    /// JSON 401/403.
    Api,
    /// Redirect to the login page.
    Dashboard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    Public,
    Protected { family: PathFamily, role: Role },
    /// Not in the table; left to the router (usually a 404).
    Unclassified,
}

struct ProtectedPrefix {
    prefix: &'static str,
    family: PathFamily,
    role: Role,
}

const PROTECTED: &[ProtectedPrefix] = &[
    ProtectedPrefix {
        prefix: "/admin",
        family: PathFamily::Api,
        role: Role::Admin,
    },
    ProtectedPrefix {
        prefix: "/dashboard",
        family: PathFamily::Dashboard,
        role: Role::Admin,
    },
];

/// `*` matches exactly one path segment.
const PUBLIC: &[(&str, &[&str])] = &[
    (GET_HEALTH, &["GET"]),
    (POST_AUTH_LOGIN, &["POST"]),
    (POST_AUTH_LOGOUT, &["POST"]),
    (GET_AUTH_ME, &["GET"]),
    (PROJECTS, &["GET"]),
    ("/projects/*", &["GET"]),
    (CERTIFICATIONS, &["GET"]),
    ("/certifications/*", &["GET"]),
    (ABOUT, &["GET"]),
    (POST_CONTACT, &["POST"]),
];

/// Lowercase, collapse repeated slashes, drop a trailing slash.
pub fn normalize_path(path: &str) -> String {
    let mut out = String::with_capacity(path.len() + 1);
    out.push('/');
    for segment in path.split('/').filter(|s| !s.is_empty()) {
        if out.len() > 1 {
            out.push('/');
        }
        out.push_str(&segment.to_lowercase());
    }
    out
}

/// Classify a request by method and raw path.
pub fn classify(method: &Method, path: &str) -> RouteClass {
    let path = normalize_path(path);

    if let Some(p) = PROTECTED.iter().find(|p| path.starts_with(p.prefix)) {
        return RouteClass::Protected {
            family: p.family,
            role: p.role,
        };
    }

    let public = PUBLIC
        .iter()
        .any(|(pattern, methods)| {
            methods.contains(&method.as_str()) && matches_pattern(pattern, &path)
        });
    if public {
        RouteClass::Public
    } else {
        RouteClass::Unclassified
    }
}

fn matches_pattern(pattern: &str, path: &str) -> bool {
    let mut pattern_segments = pattern.split('/');
    let mut path_segments = path.split('/');
    loop {
        match (pattern_segments.next(), path_segments.next()) {
            (None, None) => return true,
            (Some("*"), Some(seg)) if !seg.is_empty() => {}
            (Some(p), Some(seg)) if p == seg => {}
            _ => return false,
        }
    }
}
