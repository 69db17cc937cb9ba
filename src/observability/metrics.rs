//! Metrics collection and exposition.
//!
//! # Metrics
//! - `podium_context_process_seconds` (histogram): time taken to run all
//!   context parsers in one sweep, labeled by component `name`
//! - `podium_context_device_cache_items` (gauge): device type cache occupancy
//!
//! # Design Decisions
//! - Recording goes through the `metrics` facade, so the sink is whatever
//!   recorder the process installs
//! - Histogram buckets tuned for sub-second parser sweeps

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, Matcher, PrometheusBuilder};

pub const CONTEXT_PROCESS_SECONDS: &str = "podium_context_process_seconds";
pub const DEVICE_CACHE_ITEMS: &str = "podium_context_device_cache_items";

const PROCESS_BUCKETS: &[f64] = &[0.001, 0.01, 0.1, 0.5, 1.0];

/// Install the Prometheus exporter listening on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .set_buckets_for_metric(Matcher::Full(CONTEXT_PROCESS_SECONDS.to_string()), PROCESS_BUCKETS)?
        .install()?;

    metrics::describe_histogram!(
        CONTEXT_PROCESS_SECONDS,
        metrics::Unit::Seconds,
        "Time taken to run all context parsers in the process method"
    );
    metrics::describe_gauge!(DEVICE_CACHE_ITEMS, "Entries in the device type capability cache");

    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Record one parser sweep for component `name`.
pub fn record_context_process(name: &str, start: Instant) {
    metrics::histogram!(CONTEXT_PROCESS_SECONDS, "name" => name.to_string())
        .record(start.elapsed().as_secs_f64());
}

/// Record the current device type cache size.
pub fn record_device_cache_size(items: usize) {
    metrics::gauge!(DEVICE_CACHE_ITEMS).set(items as f64);
}
