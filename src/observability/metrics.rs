//! Metrics collection and exposition.
//!
//! # Metrics
//! - `downtime_probes_total` (counter): probes by `result` (success/failure)
//! - `downtime_target_up` (gauge): 1=up, 0=down
//! - `downtime_outages_total` (counter): outage windows opened
//! - `downtime_outage_duration_seconds` (histogram): length of closed outage windows
//!
//! # Design Decisions
//! - Recording is a no-op until an exporter is installed
//! - Exporter is opt-in via `observability.metrics_address`

use std::net::SocketAddr;
use std::time::Duration;

use ::metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus exporter serving on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

pub fn record_probe(success: bool) {
    let result = if success { "success" } else { "failure" };
    counter!("downtime_probes_total", "result" => result).increment(1);
}

pub fn record_target_up(up: bool) {
    gauge!("downtime_target_up").set(if up { 1.0 } else { 0.0 });
}

pub fn record_outage_started() {
    counter!("downtime_outages_total").increment(1);
}

pub fn record_outage_ended(down: Duration) {
    histogram!("downtime_outage_duration_seconds").record(down.as_secs_f64());
}
