//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_proxy_requests_total` (counter): proxied requests by status
//! - `gateway_proxy_duration_seconds` (histogram): time to upstream status
//! - `gateway_proxy_bytes_total` (counter): body bytes relayed to clients
//! - `gateway_health_checks_total` (counter): health evaluations by result

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape listener.
///
/// Must be called from within the Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

pub fn record_proxy_request(status: u16, started: Instant) {
    counter!("gateway_proxy_requests_total", "status" => status.to_string()).increment(1);
    histogram!("gateway_proxy_duration_seconds").record(started.elapsed().as_secs_f64());
}

pub fn record_proxy_bytes(bytes: u64) {
    counter!("gateway_proxy_bytes_total").increment(bytes);
}

pub fn record_health_check(result: &'static str) {
    counter!("gateway_health_checks_total", "result" => result).increment(1);
}
