//! Cross-origin filter through the full router.

mod common;

use axum::body::Body;
use axum::http::{Request, header};
use folio_api::config::Environment;

use common::*;

fn me_from(origin: &str) -> Request<Body> {
    Request::builder()
        .uri("/auth/me")
        .header(header::ORIGIN, origin)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn foreign_origin_gets_no_allow_header() {
    let resp = send(app(), me_from("https://evil.example")).await;
    assert!(resp.status().is_success());
    assert!(
        resp.headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none()
    );
}

#[tokio::test]
async fn allowed_origin_is_echoed_with_credentials() {
    let resp = send(app(), me_from("https://folio.example")).await;
    assert_eq!(
        resp.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "https://folio.example"
    );
    assert_eq!(
        resp.headers()[header::ACCESS_CONTROL_ALLOW_CREDENTIALS],
        "true"
    );
}

#[tokio::test]
async fn production_drops_local_origins() {
    let prod = || app_with(config(Environment::Production));

    let resp = send(prod(), me_from("http://localhost:3000")).await;
    assert!(
        resp.headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none()
    );

    let resp = send(prod(), me_from("https://folio.example")).await;
    assert_eq!(
        resp.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "https://folio.example"
    );
}

#[tokio::test]
async fn public_preflight_uses_the_same_list() {
    let req = Request::builder()
        .method("OPTIONS")
        .uri("/contact")
        .header(header::ORIGIN, "https://evil.example")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();
    let resp = send(app(), req).await;
    assert!(
        resp.headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none()
    );
}

#[tokio::test]
async fn requests_without_origin_are_unaffected() {
    let req = Request::builder()
        .uri("/auth/me")
        .body(Body::empty())
        .unwrap();
    let resp = send(app(), req).await;
    assert!(resp.status().is_success());
    assert!(resp.headers().contains_key("x-request-id"));
}
