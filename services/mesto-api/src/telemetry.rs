//! Prometheus metrics
//!
//! Counters for auth outcomes and like toggles are emitted from
//! `mesto-auth-core`; this module owns the exporter and the per-request
//! HTTP instrumentation.

use std::time::Instant;

use axum::extract::{MatchedPath, Request};
use axum::middleware::Next;
use axum::response::Response;
use metrics_exporter_prometheus::{BuildError, Matcher, PrometheusBuilder, PrometheusHandle};

/// Latency buckets in seconds; most requests should finish well under 200ms
const LATENCY_BUCKETS: &[f64] = &[0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.2, 0.5, 1.0, 2.5];

/// Exporter builder with the service's histogram buckets
pub fn recorder_builder() -> Result<PrometheusBuilder, BuildError> {
    PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("http_request_duration_seconds".to_string()),
            LATENCY_BUCKETS,
        )?
        .set_buckets_for_metric(
            Matcher::Full("mesto_login_duration_seconds".to_string()),
            LATENCY_BUCKETS,
        )
}

/// Install the global recorder and register metric descriptions
pub fn setup_metrics() -> anyhow::Result<PrometheusHandle> {
    let handle = recorder_builder()?.install_recorder()?;

    metrics::describe_counter!(
        "http_requests_total",
        "Total HTTP requests by method, route and status"
    );
    metrics::describe_histogram!(
        "http_request_duration_seconds",
        "HTTP request latency in seconds"
    );
    metrics::describe_counter!(
        "mesto_token_validations_total",
        "Bearer token checks by result (valid, missing, invalid, expired)"
    );
    metrics::describe_counter!(
        "mesto_logins_total",
        "Login attempts by result (success, failure, error)"
    );
    metrics::describe_histogram!(
        "mesto_login_duration_seconds",
        "Login latency in seconds, including password verification"
    );
    metrics::describe_counter!(
        "mesto_signups_total",
        "Signups by result (created, conflict)"
    );
    metrics::describe_counter!(
        "mesto_like_toggles_total",
        "Like toggles by action (like, unlike)"
    );

    Ok(handle)
}

/// Record count and latency for every routed request
///
/// Labels use the matched route template, never the raw path, so ids in
/// the URL do not blow up label cardinality.
pub async fn track_http_metrics(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());

    let response = next.run(request).await;
    let status = response.status().as_u16().to_string();

    metrics::counter!(
        "http_requests_total",
        "method" => method.clone(),
        "route" => route.clone(),
        "status" => status.clone()
    )
    .increment(1);
    metrics::histogram!(
        "http_request_duration_seconds",
        "method" => method,
        "route" => route,
        "status" => status
    )
    .record(start.elapsed().as_secs_f64());

    response
}
