//! Per-request metrics middleware.

use axum::{
    body::Body,
    extract::MatchedPath,
    http::Request,
    middleware::Next,
    response::Response,
};
use std::time::Instant;

use crate::http::request::request_id;
use crate::observability::metrics;

/// Record count and latency for every routed request.
pub async fn track_metrics(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());
    let method = request.method().to_string();
    let id = request_id(&request).to_string();

    let response = next.run(request).await;
    let status = response.status();

    if status.is_server_error() {
        tracing::warn!(request_id = %id, route = %route, status = %status, "Request failed");
    }
    metrics::record_request(&route, &method, status.as_u16(), start);

    response
}
