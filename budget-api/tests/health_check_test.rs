//! Health endpoint tests.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use budget_api::{AppState, create_router};
use budget_ingest::ParseOptions;
use tower::ServiceExt;

fn app() -> axum::Router {
    create_router(AppState::new(ParseOptions::standard().unwrap()))
}

#[tokio::test]
async fn health_check_returns_greeting() {
    let request = Request::builder().method("GET").uri("/health").body(Body::empty()).unwrap();

    let response = app().oneshot(request).await.expect("failed to make request");
    assert_eq!(response.status(), StatusCode::OK);

    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    let body = std::str::from_utf8(&body_bytes).unwrap();
    assert!(body.starts_with("Hello from budget-email"), "unexpected greeting: {body}");
}

#[tokio::test]
async fn webhook_route_rejects_get() {
    let request = Request::builder().method("GET").uri("/budget-email").body(Body::empty()).unwrap();

    let response = app().oneshot(request).await.expect("failed to make request");
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let request = Request::builder().method("GET").uri("/nope").body(Body::empty()).unwrap();

    let response = app().oneshot(request).await.expect("failed to make request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
