// Path: crates/telemetry/src/sinks.rs
//! Defines abstract traits for metrics reporting, decoupling client logic from the backend.

use once_cell::sync::OnceCell;

// --- Static Sink Access ---

/// A no-op sink for use in tests or when telemetry is disabled.
#[derive(Debug, Clone, Copy)]
pub struct NopSink;

/// A lazily-initialized static reference to the global `MetricsSink` implementation.
pub static SINK: OnceCell<&'static dyn MetricsSink> = OnceCell::new();
static NOP_SINK: NopSink = NopSink;

/// Returns a static reference to the configured RPC metrics sink.
/// If no sink has been initialized, it returns a no-op sink.
pub fn rpc_metrics() -> &'static dyn RpcMetricsSink {
    SINK.get().copied().unwrap_or(&NOP_SINK)
}

/// Returns a static reference to the configured leaderboard metrics sink.
/// If no sink has been initialized, it returns a no-op sink.
pub fn leaderboard_metrics() -> &'static dyn LeaderboardMetricsSink {
    SINK.get().copied().unwrap_or(&NOP_SINK)
}

/// Returns a static reference to the configured error metrics sink.
/// If no sink has been initialized, it returns a no-op sink.
pub fn error_metrics() -> &'static dyn ErrorMetricsSink {
    SINK.get().copied().unwrap_or(&NOP_SINK)
}

// --- Trait Definitions ---

/// A sink for metrics related to the JSON-RPC transport.
pub trait RpcMetricsSink: Send + Sync + std::fmt::Debug {
    /// Observes the latency of a JSON-RPC request, labeled by method.
    fn observe_request_duration(&self, method: &str, duration_secs: f64);
    /// Increments a counter for total requests, labeled by method and outcome.
    fn inc_requests_total(&self, method: &str, outcome: &'static str);
    /// Increments a counter for retries against the same endpoint.
    fn inc_retries(&self, method: &str);
    /// Increments a counter each time a request moves on to the next endpoint.
    fn inc_failovers(&self);
}
impl RpcMetricsSink for NopSink {
    fn observe_request_duration(&self, _method: &str, _duration_secs: f64) {}
    fn inc_requests_total(&self, _method: &str, _outcome: &'static str) {}
    fn inc_retries(&self, _method: &str) {}
    fn inc_failovers(&self) {}
}

/// A sink for metrics related to leaderboard aggregation.
pub trait LeaderboardMetricsSink: Send + Sync + std::fmt::Debug {
    /// Increments a counter for completed refreshes, labeled by the source that produced the data.
    fn inc_refresh(&self, source: &'static str);
    /// Increments a counter for balance lookups that were dropped, labeled by reason.
    fn inc_lookup_dropped(&self, reason: &'static str);
    /// Observes the wall-clock duration of a full refresh.
    fn observe_refresh_duration(&self, duration_secs: f64);
}
impl LeaderboardMetricsSink for NopSink {
    fn inc_refresh(&self, _source: &'static str) {}
    fn inc_lookup_dropped(&self, _reason: &'static str) {}
    fn observe_refresh_duration(&self, _duration_secs: f64) {}
}

/// A sink for recording structured error metrics.
pub trait ErrorMetricsSink: Send + Sync + std::fmt::Debug {
    /// Increments a counter for a specific error, categorized by its kind and code.
    fn inc_error(&self, kind: &'static str, code: &'static str);
}
impl ErrorMetricsSink for NopSink {
    fn inc_error(&self, _kind: &'static str, _code: &'static str) {}
}

/// A unified sink that implements all domain-specific traits, providing a single
/// point of implementation for metrics backends like Prometheus.
pub trait MetricsSink: RpcMetricsSink + LeaderboardMetricsSink + ErrorMetricsSink {}

// Blanket implementation to allow any type that implements all sub-traits
// to be used as a `MetricsSink`.
impl<T> MetricsSink for T where T: RpcMetricsSink + LeaderboardMetricsSink + ErrorMetricsSink {}
