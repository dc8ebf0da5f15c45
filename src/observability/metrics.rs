//! Metrics collection and exposition.
//!
//! # Metrics
//! - `hotconf_loads_total` (counter): load/reload attempts by outcome
//! - `hotconf_lookup_failures_total` (counter): fail-soft lookups that
//!   returned a zero value, by error kind
//! - `hotconf_tree_nodes` (gauge): node count of the published tree
//! - `hotconf_generation` (gauge): number of successful publishes
//!
//! Without an installed recorder every call is a no-op.

use std::net::SocketAddr;

use metrics::{counter, gauge};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter listening on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record the outcome of a load or reload attempt.
pub fn record_load(outcome: &'static str) {
    counter!("hotconf_loads_total", "outcome" => outcome).increment(1);
}

/// Record a published tree.
pub fn record_publish(generation: u64, node_count: usize) {
    gauge!("hotconf_generation").set(generation as f64);
    gauge!("hotconf_tree_nodes").set(node_count as f64);
}

/// Record a fail-soft lookup that fell back to a zero value.
pub fn record_lookup_failure(kind: &'static str) {
    counter!("hotconf_lookup_failures_total", "kind" => kind).increment(1);
}
