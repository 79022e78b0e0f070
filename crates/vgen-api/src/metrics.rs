//! Prometheus metrics for the API server.

use axum::body::Body;
use axum::http::{Request, Response};
use axum::middleware::Next;
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use std::sync::LazyLock;
use std::time::Instant;

/// Initialize the Prometheus metrics recorder.
/// Returns a handle that can be used to render metrics.
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}

/// Metric names as constants for consistency.
pub mod names {
    // HTTP metrics
    pub const HTTP_REQUESTS_TOTAL: &str = "vgen_http_requests_total";
    pub const HTTP_REQUEST_DURATION_SECONDS: &str = "vgen_http_request_duration_seconds";
    pub const HTTP_REQUESTS_IN_FLIGHT: &str = "vgen_http_requests_in_flight";

    // Generation metrics
    pub const GENERATIONS_TOTAL: &str = "vgen_generations_total";
    pub const GENERATION_DURATION_SECONDS: &str = "vgen_generation_duration_seconds";
    pub const FALLBACKS_TOTAL: &str = "vgen_fallbacks_total";
    pub const PROVIDER_REQUESTS_TOTAL: &str = "vgen_provider_requests_total";
    pub const STREAM_EVENTS_TOTAL: &str = "vgen_stream_events_total";

    // Store metrics
    pub const STORED_VIDEOS: &str = "vgen_stored_videos";
}

/// Record an HTTP request.
pub fn record_http_request(method: &str, path: &str, status: u16, duration_secs: f64) {
    let labels = [
        ("method", method.to_string()),
        ("path", sanitize_path(path)),
        ("status", status.to_string()),
    ];

    counter!(names::HTTP_REQUESTS_TOTAL, &labels).increment(1);
    histogram!(names::HTTP_REQUEST_DURATION_SECONDS, &labels).record(duration_secs);
}

/// Record a finished generation run.
pub fn record_generation(outcome: &str, duration_secs: f64) {
    let labels = [("outcome", outcome.to_string())];
    counter!(names::GENERATIONS_TOTAL, &labels).increment(1);
    histogram!(names::GENERATION_DURATION_SECONDS, &labels).record(duration_secs);
}

/// Record a step that served fallback content.
pub fn record_fallback(step: &str, reason: &str) {
    let labels = [("step", step.to_string()), ("reason", reason.to_string())];
    counter!(names::FALLBACKS_TOTAL, &labels).increment(1);
}

/// Record a call to the text/image provider.
pub fn record_provider_request(kind: &str, success: bool) {
    let labels = [
        ("kind", kind.to_string()),
        ("result", if success { "ok" } else { "error" }.to_string()),
    ];
    counter!(names::PROVIDER_REQUESTS_TOTAL, &labels).increment(1);
}

/// Record a progress stream event sent to a client.
pub fn record_stream_event(event_type: &str) {
    let labels = [("type", event_type.to_string())];
    counter!(names::STREAM_EVENTS_TOTAL, &labels).increment(1);
}

/// Update stored videos gauge.
pub fn set_stored_videos(count: usize) {
    gauge!(names::STORED_VIDEOS).set(count as f64);
}

static VIDEO_ID_PATTERN: LazyLock<regex_lite::Regex> = LazyLock::new(|| {
    regex_lite::Regex::new(r"/videos/[^/]+").expect("valid regex")
});

/// Sanitize path for metrics labels so each route maps to one label.
fn sanitize_path(path: &str) -> String {
    VIDEO_ID_PATTERN
        .replace_all(path, "/videos/:video_id")
        .into_owned()
}

/// Metrics middleware for HTTP requests.
pub async fn metrics_middleware(request: Request<Body>, next: Next) -> Response<Body> {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    gauge!(names::HTTP_REQUESTS_IN_FLIGHT).increment(1.0);

    let response = next.run(request).await;

    gauge!(names::HTTP_REQUESTS_IN_FLIGHT).decrement(1.0);

    let status = response.status().as_u16();
    let duration = start.elapsed().as_secs_f64();

    record_http_request(&method, &path, status, duration);

    response
}
