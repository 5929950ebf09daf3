//! Router behaviour that does not need a live database.

mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use tower::util::ServiceExt;

async fn get(path: &str) -> (StatusCode, axum::http::HeaderMap, serde_json::Value) {
    let response = common::unreachable_router()
        .await
        .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, headers, body)
}

#[tokio::test]
async fn list_technologies_storage_failure_returns_generic_500() {
    let (status, _, body) = get("/technologies").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        serde_json::json!({ "message": "Error fetching introductory technology data" })
    );
}

#[tokio::test]
async fn list_events_storage_failure_returns_generic_500() {
    let (status, _, body) = get("/events").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, serde_json::json!({ "message": "Error fetching events" }));
}

#[tokio::test]
async fn get_technology_storage_failure_returns_generic_500() {
    let (status, _, body) = get("/technologies/TD-1").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, serde_json::json!({ "message": "Error fetching technology data" }));
}

#[tokio::test]
async fn health_reports_unhealthy_without_database() {
    let (status, _, body) = get("/health").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "unhealthy");
    assert_eq!(body["service"], "showcase-service");
}

#[tokio::test]
async fn readiness_fails_without_database() {
    let (status, _, _) = get("/ready").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn unknown_route_is_404() {
    let (status, _, _) = get("/technologies/TD-1/extra").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn responses_carry_request_id_and_security_headers() {
    let (_, headers, _) = get("/events").await;

    assert!(headers.contains_key("x-request-id"));
    assert_eq!(headers["x-content-type-options"], "nosniff");
}

#[tokio::test]
async fn cors_allows_any_origin_by_default() {
    let response = common::unreachable_router()
        .await
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/technologies")
                .header("origin", "https://showcase.example")
                .header("access-control-request-method", "GET")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.headers()["access-control-allow-origin"], "*");
}
