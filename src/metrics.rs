//! Request counters and Prometheus text exposition.
//!
//! Two counters are exported:
//! - `<prefix>_requests_total`: one `AtomicU64`, incremented once per request
//!   received on `/op` before the body is read.
//! - `<prefix>_http_requests_total{endpoint, method}`: per-route breakdown,
//!   held by a `metrics-exporter-prometheus` recorder owned by this struct.
//!
//! The recorder is local rather than installed globally, so several services
//! (or tests) can live in one process without sharing counts.

use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle, PrometheusRecorder};

use crate::config::{ENDPOINT_HEALTH, ENDPOINT_OP};

pub struct OperatorMetrics {
    prefix: &'static str,
    requests_total: AtomicU64,
    route_counter_name: String,
    recorder: PrometheusRecorder,
    handle: PrometheusHandle,
}

impl OperatorMetrics {
    pub fn new(prefix: &'static str) -> Self {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();
        Self {
            prefix,
            requests_total: AtomicU64::new(0),
            route_counter_name: format!("{}_http_requests_total", prefix),
            recorder,
            handle,
        }
    }

    /// Count a request received on `/op`, whatever its method or body.
    pub fn record_op(&self, method: &str) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);
        self.record_route(ENDPOINT_OP, method);
    }

    pub fn record_health(&self, method: &str) {
        self.record_route(ENDPOINT_HEALTH, method);
    }

    pub fn requests_total(&self) -> u64 {
        self.requests_total.load(Ordering::Relaxed)
    }

    fn record_route(&self, endpoint: &'static str, method: &str) {
        let name = self.route_counter_name.clone();
        let method = method.to_string();
        metrics::with_local_recorder(&self.recorder, move || {
            metrics::counter!(name, "endpoint" => endpoint, "method" => method).increment(1);
        });
    }

    /// Render both counters in Prometheus text format.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let name = format!("{}_requests_total", self.prefix);
        // Infallible for String
        let _ = writeln!(out, "# HELP {} Total requests processed", name);
        let _ = writeln!(out, "# TYPE {} counter", name);
        let _ = writeln!(out, "{} {}", name, self.requests_total());
        out.push_str(&self.handle.render());
        out
    }
}

impl std::fmt::Debug for OperatorMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OperatorMetrics")
            .field("prefix", &self.prefix)
            .field("requests_total", &self.requests_total())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_zero() {
        let metrics = OperatorMetrics::new("charcount");
        assert_eq!(metrics.requests_total(), 0);
        assert!(metrics.render().contains("charcount_requests_total 0\n"));
    }

    #[test]
    fn test_op_increments_counter() {
        let metrics = OperatorMetrics::new("charcount");
        metrics.record_op("POST");
        metrics.record_op("POST");
        metrics.record_op("GET");
        assert_eq!(metrics.requests_total(), 3);

        let rendered = metrics.render();
        assert!(rendered.contains("# TYPE charcount_requests_total counter"));
        assert!(rendered.contains("charcount_requests_total 3\n"));
    }

    #[test]
    fn test_health_does_not_touch_op_counter() {
        let metrics = OperatorMetrics::new("palindrome");
        metrics.record_health("GET");
        assert_eq!(metrics.requests_total(), 0);
        assert!(metrics.render().contains("palindrome_http_requests_total"));
    }

    #[test]
    fn test_route_counter_labels() {
        let metrics = OperatorMetrics::new("entropy");
        metrics.record_op("POST");
        metrics.record_op("POST");

        let rendered = metrics.render();
        let line = rendered
            .lines()
            .find(|l| l.starts_with("entropy_http_requests_total{"))
            .expect("labeled counter line");
        assert!(line.contains(r#"endpoint="op""#));
        assert!(line.contains(r#"method="POST""#));
        assert!(line.ends_with(" 2"));
    }

    #[test]
    fn test_recorders_are_isolated() {
        let a = OperatorMetrics::new("a");
        let b = OperatorMetrics::new("b");
        a.record_op("POST");
        assert_eq!(b.requests_total(), 0);
        assert!(!b.render().contains("a_http_requests_total"));
    }

    #[test]
    fn test_concurrent_increments() {
        let metrics = std::sync::Arc::new(OperatorMetrics::new("charcount"));
        let threads: Vec<_> = (0..8)
            .map(|_| {
                let metrics = metrics.clone();
                std::thread::spawn(move || {
                    for _ in 0..250 {
                        metrics.record_op("POST");
                    }
                })
            })
            .collect();
        for t in threads {
            t.join().unwrap();
        }
        assert_eq!(metrics.requests_total(), 2000);
    }
}
