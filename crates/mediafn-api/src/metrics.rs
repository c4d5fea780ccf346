//! Prometheus metrics for the API server.

use std::time::Instant;

use axum::body::Body;
use axum::extract::MatchedPath;
use axum::http::{Request, Response};
use axum::middleware::Next;
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

/// Initialize the Prometheus metrics recorder.
/// Returns a handle that can be used to render metrics.
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}

/// Metric names as constants for consistency.
pub mod names {
    // HTTP metrics
    pub const HTTP_REQUESTS_TOTAL: &str = "mediafn_http_requests_total";
    pub const HTTP_REQUEST_DURATION_SECONDS: &str = "mediafn_http_request_duration_seconds";
    pub const HTTP_REQUESTS_IN_FLIGHT: &str = "mediafn_http_requests_in_flight";

    // Download metrics
    pub const DOWNLOAD_DURATION_SECONDS: &str = "mediafn_download_duration_seconds";
    pub const DOWNLOAD_BYTES_TOTAL: &str = "mediafn_download_bytes_total";

    // Vendor task metrics
    pub const VENDOR_TASK_DURATION_SECONDS: &str = "mediafn_vendor_task_duration_seconds";
    pub const VENDOR_TASKS_TOTAL: &str = "mediafn_vendor_tasks_total";
    pub const VENDOR_POLLS_TOTAL: &str = "mediafn_vendor_polls_total";

    // Rate limiting metrics
    pub const RATE_LIMIT_HITS_TOTAL: &str = "mediafn_rate_limit_hits_total";
}

/// Record an HTTP request.
pub fn record_http_request(method: &str, route: &str, status: u16, duration_secs: f64) {
    let labels = [
        ("method", method.to_string()),
        ("route", route.to_string()),
        ("status", status.to_string()),
    ];

    counter!(names::HTTP_REQUESTS_TOTAL, &labels).increment(1);
    histogram!(names::HTTP_REQUEST_DURATION_SECONDS, &labels).record(duration_secs);
}

/// Record a finished video download.
pub fn record_download(bytes: u64, duration_secs: f64) {
    histogram!(names::DOWNLOAD_DURATION_SECONDS).record(duration_secs);
    counter!(names::DOWNLOAD_BYTES_TOTAL).increment(bytes);
}

/// Record how long a vendor task took to settle.
///
/// `outcome` is `ok` or `error`.
pub fn record_vendor_task(vendor: &str, operation: &str, outcome: &str, duration_secs: f64) {
    let labels = [
        ("vendor", vendor.to_string()),
        ("operation", operation.to_string()),
        ("outcome", outcome.to_string()),
    ];
    counter!(names::VENDOR_TASKS_TOTAL, &labels).increment(1);
    histogram!(names::VENDOR_TASK_DURATION_SECONDS, &labels).record(duration_secs);
}

/// Record status polls made while waiting on a vendor task.
pub fn record_vendor_polls(vendor: &str, polls: u64) {
    let labels = [("vendor", vendor.to_string())];
    counter!(names::VENDOR_POLLS_TOTAL, &labels).increment(polls);
}

/// Record rate limit hit.
pub fn record_rate_limit_hit(endpoint: &str) {
    let labels = [("endpoint", endpoint.to_string())];
    counter!(names::RATE_LIMIT_HITS_TOTAL, &labels).increment(1);
}

/// Route label for a request: the matched route template, or `unmatched`
/// so unknown paths cannot blow up label cardinality.
fn route_label(request: &Request<Body>) -> String {
    request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string())
}

/// Metrics middleware for HTTP requests.
pub async fn metrics_middleware(request: Request<Body>, next: Next) -> Response<Body> {
    let method = request.method().to_string();
    let route = route_label(&request);
    let start = Instant::now();

    gauge!(names::HTTP_REQUESTS_IN_FLIGHT).increment(1.0);

    let response = next.run(request).await;

    gauge!(names::HTTP_REQUESTS_IN_FLIGHT).decrement(1.0);

    let status = response.status().as_u16();
    let duration = start.elapsed().as_secs_f64();

    record_http_request(&method, &route, status, duration);

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_label_without_match() {
        let request = Request::builder()
            .uri("/random/path/123")
            .body(Body::empty())
            .unwrap();
        assert_eq!(route_label(&request), "unmatched");
    }
}
