//! Session request handlers: login, logout, and the current identity.

use axum::Json;
use axum::extract::State;
use axum_extra::extract::CookieJar;
use tracing::{debug, info};

use folio_core::auth::jwt::verify_session_token;
use folio_core::models::auth::SessionUser;
use folio_core::validation::account::LoginRequest;

use crate::AppState;
use crate::error::AppResult;
use crate::extract::ValidatedJson;
use crate::models::{ApiResponse, SessionData};
use crate::services::auth;
use crate::services::cookies::{SESSION_COOKIE, clear_session_cookie, session_cookie};

/// `POST /auth/login`: authenticate with email + password.
///
/// The token is returned only in the `Set-Cookie` header.
pub async fn login_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(body): ValidatedJson<LoginRequest>,
) -> AppResult<(CookieJar, Json<ApiResponse<SessionData>>)> {
    let (account, token) = auth::login(
        &state.pool,
        &body.email,
        &body.password,
        state.config.jwt_secret.as_bytes(),
    )
    .await?;

    let jar = jar.add(session_cookie(&token, state.config.is_production()));
    let data = SessionData {
        user: Some(SessionUser::from(&account)),
    };
    Ok((jar, Json(ApiResponse::ok(data))))
}

/// `POST /auth/logout`: clear the session cookie.
///
/// Tokens are stateless, so a copied token stays valid until it expires.
pub async fn logout_handler(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<ApiResponse<SessionData>>) {
    info!("logout");
    let jar = jar.add(clear_session_cookie(state.config.is_production()));
    (jar, Json(ApiResponse::ok(SessionData { user: None })))
}

/// `GET /auth/me`: the signed-in identity, or `user: null`.
pub async fn me_handler(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Json<ApiResponse<SessionData>> {
    let user = jar.get(SESSION_COOKIE).and_then(|cookie| {
        verify_session_token(cookie.value(), state.config.jwt_secret.as_bytes())
            .inspect_err(|kind| debug!(?kind, "ignoring invalid session cookie"))
            .ok()
            .filter(|claims| claims.role().is_some())
            .map(|claims| SessionUser::from(&claims))
    });
    Json(ApiResponse::ok(SessionData { user }))
}
