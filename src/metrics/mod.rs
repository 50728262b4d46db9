//! Metrics collection for observability

use prometheus::{
    CounterVec, Histogram, Opts, Registry,
    register_counter_vec_with_registry, register_histogram_with_registry,
};
use std::sync::Arc;
use once_cell::sync::Lazy;

/// Global metrics registry
pub static METRICS: Lazy<Arc<Metrics>> = Lazy::new(|| {
    Arc::new(Metrics::new().expect("Failed to initialize metrics"))
});

/// Metrics collector
pub struct Metrics {
    registry: Registry,

    // Grading service calls
    pub grading_requests: CounterVec,
    pub grading_request_duration: Histogram,

    // Session activity
    pub sample_loads: CounterVec,
    pub submissions_rejected: CounterVec,
}

impl Metrics {
    /// Create a new metrics collector
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let grading_requests = register_counter_vec_with_registry!(
            Opts::new("grading_requests_total", "Total grading requests by outcome"),
            &["status"],
            registry
        )?;

        let grading_request_duration = register_histogram_with_registry!(
            "grading_request_duration_seconds",
            "Grading request duration in seconds",
            registry
        )?;

        let sample_loads = register_counter_vec_with_registry!(
            Opts::new("sample_loads_total", "Total sample data loads"),
            &["status"],
            registry
        )?;

        let submissions_rejected = register_counter_vec_with_registry!(
            Opts::new("submissions_rejected_total", "Submissions rejected before dispatch"),
            &["reason"],
            registry
        )?;

        Ok(Self {
            registry,
            grading_requests,
            grading_request_duration,
            sample_loads,
            submissions_rejected,
        })
    }

    /// Get the metrics registry for exporting
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Record the outcome of a grading call
    pub fn record_grading(&self, status: &str, seconds: f64) {
        self.grading_requests.with_label_values(&[status]).inc();
        self.grading_request_duration.observe(seconds);
    }

    /// Record a sample data load
    pub fn record_sample_load(&self, success: bool) {
        let status = if success { "success" } else { "error" };
        self.sample_loads.with_label_values(&[status]).inc();
    }

    /// Record a submission that never reached the service
    pub fn record_rejected_submission(&self, reason: &str) {
        self.submissions_rejected.with_label_values(&[reason]).inc();
    }

    /// Export metrics in Prometheus text format
    pub fn export_prometheus(&self) -> String {
        use prometheus::Encoder;

        let encoder = prometheus::TextEncoder::new();
        let metric_families = self.registry.gather();

        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer).unwrap_or_default();

        String::from_utf8(buffer).unwrap_or_default()
    }
}
