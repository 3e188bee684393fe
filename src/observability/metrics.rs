//! Metrics collection and exposition.
//!
//! # Metrics
//! - `dashboard_requests_total` (counter): requests by route, method, status
//! - `dashboard_request_duration_seconds` (histogram): latency by route
//! - `dashboard_sites_scanned_total` (counter): site files read
//! - `dashboard_site_parse_errors_total` (counter): files reported with the error marker
//! - `dashboard_probes_total` (counter): probes by outcome
//!
//! Recording is a no-op until an exporter is installed.

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Instant;

/// Install the Prometheus exporter with its own HTTP listener.
///
/// Must run inside a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_request(route: &str, method: &str, status: u16, start: Instant) {
    counter!(
        "dashboard_requests_total",
        "route" => route.to_string(),
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("dashboard_request_duration_seconds", "route" => route.to_string())
        .record(start.elapsed().as_secs_f64());
}

pub fn record_sites_scanned(total: usize, parse_errors: usize) {
    counter!("dashboard_sites_scanned_total").increment(total as u64);
    if parse_errors > 0 {
        counter!("dashboard_site_parse_errors_total").increment(parse_errors as u64);
    }
}

pub fn record_probe(outcome: &str) {
    counter!("dashboard_probes_total", "outcome" => outcome.to_string()).increment(1);
}
