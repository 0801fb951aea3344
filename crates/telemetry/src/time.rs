// Path: crates/telemetry/src/time.rs
use crate::sinks::RpcMetricsSink;
use std::time::Instant;

/// Records the lifetime of a request into the RPC latency histogram on drop.
pub struct Timer<'a> {
    sink: &'a dyn RpcMetricsSink,
    method: &'a str,
    start: Instant,
}

impl<'a> Timer<'a> {
    pub fn new(sink: &'a dyn RpcMetricsSink, method: &'a str) -> Self {
        Self {
            sink,
            method,
            start: Instant::now(),
        }
    }
}

impl Drop for Timer<'_> {
    fn drop(&mut self) {
        self.sink
            .observe_request_duration(self.method, self.start.elapsed().as_secs_f64());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Debug, Default)]
    struct Recorder(Mutex<Vec<String>>);

    impl RpcMetricsSink for Recorder {
        fn observe_request_duration(&self, method: &str, duration_secs: f64) {
            assert!(duration_secs >= 0.0);
            self.0.lock().unwrap().push(method.to_string());
        }
        fn inc_requests_total(&self, _method: &str, _outcome: &'static str) {}
        fn inc_retries(&self, _method: &str) {}
        fn inc_failovers(&self) {}
    }

    #[test]
    fn timer_observes_on_drop() {
        let rec = Recorder::default();
        {
            let _t = Timer::new(&rec, "eth_call");
            assert!(rec.0.lock().unwrap().is_empty());
        }
        assert_eq!(*rec.0.lock().unwrap(), vec!["eth_call".to_string()]);
    }
}
