//! Metrics collection and exposition.
//!
//! # Metrics
//! - `nid_lookups_total` (counter): lookups by operation and outcome
//! - `nid_lookup_duration_seconds` (histogram): lookup latency by operation
//! - `nid_dataset_records` (gauge): records in the most recent snapshot
//!
//! Recording is a no-op until `init_metrics` installs the Prometheus recorder.

use std::net::SocketAddr;
use std::time::Instant;
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record a completed lookup.
pub fn record_lookup(operation: &'static str, outcome: &'static str, start: Instant) {
    counter!("nid_lookups_total", "operation" => operation, "outcome" => outcome).increment(1);
    histogram!("nid_lookup_duration_seconds", "operation" => operation)
        .record(start.elapsed().as_secs_f64());
}

/// Record the size of the dataset handed to a request.
pub fn record_dataset_size(records: usize) {
    gauge!("nid_dataset_records").set(records as f64);
}
