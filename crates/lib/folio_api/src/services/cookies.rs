//! Session cookie construction.
//!
//! The session token only ever travels in the `folio_session` cookie:
//! HttpOnly, SameSite=Lax, path `/`, and Secure in production.

use axum_extra::extract::cookie::{Cookie, SameSite};
use time::Duration;

use folio_core::auth::jwt::SESSION_TTL_SECS;

/// Cookie name for the session token.
pub const SESSION_COOKIE: &str = "folio_session";

/// Build the session cookie for a freshly issued token.
pub fn session_cookie(token: &str, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token.to_string()))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(Duration::seconds(SESSION_TTL_SECS))
        .build()
}

/// Build an expired cookie that clears the session in the browser.
pub fn clear_session_cookie(secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, String::new()))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(Duration::ZERO)
        .build()
}
