//! # folio_api
//!
//! HTTP API library for Folio: public portfolio reads, the contact form,
//! session login, and the admin surface behind the authorization gate.

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use std::any::Any;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderValue, Request, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch, post};
use sqlx::PgPool;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::config::ApiConfig;
use crate::error::AppError;
use crate::handlers::{
    about, account, admin_about, admin_certifications, admin_messages, admin_projects, auth,
    certifications, contact, dashboard, health, projects,
};
use crate::middleware::cors::CorsPolicy;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL connection pool.
    pub pool: PgPool,
    /// API configuration.
    pub config: ApiConfig,
}

/// Run embedded database migrations.
///
/// Delegates to `folio_core::migrate::migrate()` which owns the migration files.
pub async fn migrate(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    folio_core::migrate::migrate(pool).await
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let cors = CorsPolicy::from_config(&state.config).layer();

    let public = Router::new()
        .route(routes::GET_HEALTH, get(health::health_handler))
        .route(routes::POST_AUTH_LOGIN, post(auth::login_handler))
        .route(routes::POST_AUTH_LOGOUT, post(auth::logout_handler))
        .route(routes::GET_AUTH_ME, get(auth::me_handler))
        .route(routes::PROJECTS, get(projects::list_projects_handler))
        .route(routes::PROJECT_BY_SLUG, get(projects::get_project_handler))
        .route(
            routes::CERTIFICATIONS,
            get(certifications::list_certifications_handler),
        )
        .route(
            routes::CERTIFICATION_BY_ID,
            get(certifications::get_certification_handler),
        )
        .route(routes::ABOUT, get(about::get_about_handler))
        .route(routes::POST_CONTACT, post(contact::submit_contact_handler));

    let admin = Router::new()
        .route(
            routes::ADMIN_PROJECTS,
            get(admin_projects::list_handler).post(admin_projects::create_handler),
        )
        .route(
            routes::ADMIN_PROJECT_BY_ID,
            get(admin_projects::get_handler)
                .patch(admin_projects::update_handler)
                .delete(admin_projects::delete_handler),
        )
        .route(
            routes::ADMIN_CERTIFICATIONS,
            get(admin_certifications::list_handler).post(admin_certifications::create_handler),
        )
        .route(
            routes::ADMIN_CERTIFICATION_BY_ID,
            get(admin_certifications::get_handler)
                .patch(admin_certifications::update_handler)
                .delete(admin_certifications::delete_handler),
        )
        .route(
            routes::ADMIN_ABOUT,
            get(admin_about::get_handler).patch(admin_about::update_handler),
        )
        .route(routes::ADMIN_MESSAGES, get(admin_messages::list_handler))
        .route(
            routes::ADMIN_MESSAGE_BY_ID,
            patch(admin_messages::update_handler).delete(admin_messages::delete_handler),
        )
        .route(
            routes::ADMIN_ACCOUNT_PASSWORD,
            patch(account::change_password_handler),
        );

    let dashboard = Router::new().route(
        routes::DASHBOARD,
        get(dashboard::dashboard_handler).layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        )),
    );

    // The gate is layered after the fallback so it also covers unrouted
    // paths under protected prefixes.
    let app = Router::new()
        .merge(public)
        .merge(admin)
        .merge(dashboard)
        .method_not_allowed_fallback(method_not_allowed)
        .fallback(not_found)
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::authorize,
        ));

    app.layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("-");
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id,
                )
            }))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(CatchPanicLayer::custom(handle_panic))
            .layer(cors),
    )
    .with_state(state)
}

async fn not_found() -> AppError {
    AppError::NotFound("Not found".into())
}

async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!(detail, "handler panicked");
    AppError::Internal(detail.to_string()).into_response()
}
