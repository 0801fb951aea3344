// Path: crates/telemetry/src/prometheus.rs
//! A concrete implementation of the metrics sinks using the Prometheus crate.

use crate::sinks::*;
use once_cell::sync::OnceCell;
use prometheus::{
    exponential_buckets, register_histogram, register_histogram_vec, register_int_counter,
    register_int_counter_vec, Encoder, Histogram, HistogramVec, IntCounter, IntCounterVec,
    TextEncoder,
};

// --- Metric Statics ---
// We use OnceCell to hold the metric collectors. They will be initialized
// exactly once by the `install` function.

static RPC_REQUESTS_TOTAL: OnceCell<IntCounterVec> = OnceCell::new();
static RPC_RETRIES_TOTAL: OnceCell<IntCounterVec> = OnceCell::new();
static RPC_FAILOVERS_TOTAL: OnceCell<IntCounter> = OnceCell::new();
static RPC_REQUEST_DURATION_SECONDS: OnceCell<HistogramVec> = OnceCell::new();
static LEADERBOARD_REFRESH_TOTAL: OnceCell<IntCounterVec> = OnceCell::new();
static LEADERBOARD_LOOKUPS_DROPPED_TOTAL: OnceCell<IntCounterVec> = OnceCell::new();
static LEADERBOARD_REFRESH_DURATION_SECONDS: OnceCell<Histogram> = OnceCell::new();
static ERRORS_TOTAL: OnceCell<IntCounterVec> = OnceCell::new();

#[derive(Debug, Clone, Copy)]
pub struct PrometheusSink;

/// Looks up a collector; a sink used before `install()` records nothing.
macro_rules! with_metric {
    ($metric:ident, |$m:ident| $body:expr) => {
        if let Some($m) = $metric.get() {
            $body;
        }
    };
}

impl RpcMetricsSink for PrometheusSink {
    fn observe_request_duration(&self, method: &str, duration_secs: f64) {
        with_metric!(RPC_REQUEST_DURATION_SECONDS, |m| m
            .with_label_values(&[method])
            .observe(duration_secs));
    }
    fn inc_requests_total(&self, method: &str, outcome: &'static str) {
        with_metric!(RPC_REQUESTS_TOTAL, |m| m
            .with_label_values(&[method, outcome])
            .inc());
    }
    fn inc_retries(&self, method: &str) {
        with_metric!(RPC_RETRIES_TOTAL, |m| m.with_label_values(&[method]).inc());
    }
    fn inc_failovers(&self) {
        with_metric!(RPC_FAILOVERS_TOTAL, |m| m.inc());
    }
}

impl LeaderboardMetricsSink for PrometheusSink {
    fn inc_refresh(&self, source: &'static str) {
        with_metric!(LEADERBOARD_REFRESH_TOTAL, |m| m
            .with_label_values(&[source])
            .inc());
    }
    fn inc_lookup_dropped(&self, reason: &'static str) {
        with_metric!(LEADERBOARD_LOOKUPS_DROPPED_TOTAL, |m| m
            .with_label_values(&[reason])
            .inc());
    }
    fn observe_refresh_duration(&self, duration_secs: f64) {
        with_metric!(LEADERBOARD_REFRESH_DURATION_SECONDS, |m| m
            .observe(duration_secs));
    }
}

impl ErrorMetricsSink for PrometheusSink {
    fn inc_error(&self, kind: &'static str, code: &'static str) {
        with_metric!(ERRORS_TOTAL, |m| m.with_label_values(&[kind, code]).inc());
    }
}

/// Initializes all Prometheus metrics collectors, installs the sink globally
/// and returns a static reference to it.
///
/// Calling it a second time is harmless: the registered collectors are kept.
pub fn install() -> Result<&'static dyn MetricsSink, prometheus::Error> {
    static INSTALLED: PrometheusSink = PrometheusSink;
    if RPC_REQUESTS_TOTAL.get().is_some() {
        return Ok(&INSTALLED);
    }
    let _ = RPC_REQUESTS_TOTAL.set(register_int_counter_vec!(
        "tea_rpc_requests_total",
        "Total JSON-RPC requests, by method and outcome.",
        &["method", "outcome"]
    )?);
    let _ = RPC_RETRIES_TOTAL.set(register_int_counter_vec!(
        "tea_rpc_retries_total",
        "Total JSON-RPC retries against the same endpoint.",
        &["method"]
    )?);
    let _ = RPC_FAILOVERS_TOTAL.set(register_int_counter!(
        "tea_rpc_failovers_total",
        "Total times a request moved on to the next endpoint."
    )?);
    let _ = RPC_REQUEST_DURATION_SECONDS.set(register_histogram_vec!(
        "tea_rpc_request_duration_seconds",
        "Latency of JSON-RPC requests.",
        &["method"],
        exponential_buckets(0.005, 2.0, 14)?
    )?);
    let _ = LEADERBOARD_REFRESH_TOTAL.set(register_int_counter_vec!(
        "tea_leaderboard_refresh_total",
        "Completed leaderboard refreshes, by the source that produced the data.",
        &["source"]
    )?);
    let _ = LEADERBOARD_LOOKUPS_DROPPED_TOTAL.set(register_int_counter_vec!(
        "tea_leaderboard_lookups_dropped_total",
        "Balance lookups dropped during aggregation, by reason.",
        &["reason"]
    )?);
    let _ = LEADERBOARD_REFRESH_DURATION_SECONDS.set(register_histogram!(
        "tea_leaderboard_refresh_duration_seconds",
        "Wall-clock duration of a leaderboard refresh.",
        exponential_buckets(0.05, 2.0, 12)?
    )?);
    let _ = ERRORS_TOTAL.set(register_int_counter_vec!(
        "tea_errors_total",
        "Total number of errors, categorized by kind and code.",
        &["kind", "code"]
    )?);

    let _ = SINK.set(&INSTALLED);
    Ok(&INSTALLED)
}

/// Renders every registered metric in the Prometheus text exposition format.
pub fn gather_text() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let mut buf = Vec::new();
    encoder.encode(&prometheus::gather(), &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn install_is_idempotent_and_exports() {
        let sink = install().unwrap();
        let again = install().unwrap();
        sink.inc_requests_total("eth_call", "ok");
        again.inc_failovers();
        sink.inc_refresh("contract");
        let text = gather_text().unwrap();
        assert!(text.contains("tea_rpc_requests_total"));
        assert!(text.contains("tea_rpc_failovers_total"));
        assert!(text.contains("tea_leaderboard_refresh_total"));
    }
}
