//! API plumbing tests: health, readiness, headers.

use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use mediafn_api::{create_router, ApiConfig, AppState};
use mediafn_media::{DownloadConfig, VideoDownloader};
use mediafn_runway::{RunwayClient, RunwayConfig};

fn create_test_router() -> Router {
    let downloader = VideoDownloader::new(DownloadConfig {
        timeout: Duration::from_secs(5),
        max_bytes: 1024,
        allow_private_hosts: false,
    })
    .unwrap();
    let runway = RunwayClient::new(RunwayConfig::new("rw-key")).unwrap();

    create_router(
        AppState::new(ApiConfig::default(), downloader, None, Some(runway)),
        None,
    )
}

async fn get(uri: &str) -> axum::response::Response {
    create_test_router()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Test health endpoint.
#[tokio::test]
async fn test_health_endpoint() {
    let response = get("/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

/// Test readiness reports configured vendors.
#[tokio::test]
async fn test_ready_endpoint() {
    let response = get("/ready").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["status"], "ready");
    assert_eq!(body["twelve_labs"], false);
    assert_eq!(body["runway"], true);
}

/// Metrics are not routed without a recorder handle.
#[tokio::test]
async fn test_metrics_disabled() {
    let response = get("/metrics").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Test security headers.
#[tokio::test]
async fn test_security_headers() {
    let response = get("/health").await;
    let headers = response.headers();

    assert_eq!(headers.get("X-Content-Type-Options").unwrap(), "nosniff");
    assert_eq!(headers.get("X-Frame-Options").unwrap(), "DENY");
    assert!(headers.get("Strict-Transport-Security").is_some());
}

/// Test request id generation and propagation.
#[tokio::test]
async fn test_request_id() {
    let response = get("/health").await;
    let generated = response.headers().get("X-Request-ID").unwrap();
    assert_eq!(generated.len(), 36);

    let response = create_test_router()
        .oneshot(
            Request::builder()
                .uri("/health")
                .header("X-Request-ID", "req-123")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.headers().get("X-Request-ID").unwrap(), "req-123");
}

/// Test CORS preflight.
#[tokio::test]
async fn test_cors_headers() {
    let response = create_test_router()
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/generateRunwayVideo")
                .header("Origin", "http://localhost:3000")
                .header("Access-Control-Request-Method", "POST")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.status() == StatusCode::OK || response.status() == StatusCode::NO_CONTENT);
    assert!(response
        .headers()
        .get("access-control-allow-origin")
        .is_some());
}

/// Unknown routes are 404.
#[tokio::test]
async fn test_unknown_route() {
    let response = get("/doesNotExist").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
