//! Prometheus metrics for session verification.
//!
//! Counters are recorded unconditionally; they are only exported when a
//! Prometheus exporter has been installed with [`init_metrics`].
//!
//! # Metrics
//!
//! - `session_verifications_total{outcome}`: `ok`, `missing`, `expired`, `invalid`
//! - `admin_denials_total`: authenticated requests refused by the admin guard
//! - `sessions_issued_total`: tokens minted through `api::session::issue_token`

use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use sunrise::auth::AuthResult;

/// Initialize Prometheus metrics exporter.
///
/// Metrics will be available at `http://<addr>/metrics`.
///
/// # Arguments
///
/// - `addr`: Address to bind the metrics server to (e.g., `0.0.0.0:9090`)
pub fn init_metrics(addr: SocketAddr) -> Result<(), String> {
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| format!("Failed to install Prometheus exporter: {}", e))
}

/// Record the outcome of one verification.
pub fn session_verification<T>(result: &AuthResult<T>) {
    let outcome = match result {
        Ok(_) => "ok",
        Err(e) => e.outcome(),
    };
    metrics::counter!("session_verifications_total", "outcome" => outcome).increment(1);
}

/// Increment admin denials counter.
pub fn admin_denials_total() {
    metrics::counter!("admin_denials_total").increment(1);
}

/// Increment issued sessions counter.
pub fn sessions_issued_total() {
    metrics::counter!("sessions_issued_total").increment(1);
}
