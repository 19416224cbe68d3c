// Prometheus metrics registry and collectors

use lazy_static::lazy_static;
use prometheus::{
    register_counter_vec_with_registry, register_histogram_vec_with_registry, CounterVec, Encoder,
    HistogramVec, Opts, Registry, TextEncoder,
};

lazy_static! {
    /// Global Prometheus registry
    pub static ref REGISTRY: Registry = Registry::new();

    /// Total number of API requests
    pub static ref REQUESTS_TOTAL: CounterVec = register_counter_vec_with_registry!(
        Opts::new("requests_total", "Total number of API requests"),
        &["method", "endpoint", "status_code", "provider"],
        REGISTRY
    ).unwrap();

    /// Request duration histogram
    pub static ref REQUEST_DURATION: HistogramVec = register_histogram_vec_with_registry!(
        prometheus::HistogramOpts::new("request_duration_seconds", "Request duration in seconds")
            .buckets(vec![0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        &["method", "endpoint", "status_code"],
        REGISTRY
    ).unwrap();

    /// Total provider API calls
    pub static ref PROVIDER_API_CALLS: CounterVec = register_counter_vec_with_registry!(
        Opts::new("provider_api_calls_total", "Total inference provider API calls"),
        &["provider", "status_code"],
        REGISTRY
    ).unwrap();

    /// Provider API call duration
    pub static ref PROVIDER_API_DURATION: HistogramVec = register_histogram_vec_with_registry!(
        prometheus::HistogramOpts::new("provider_api_duration_seconds", "Inference provider call duration")
            .buckets(vec![0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0]),
        &["provider"],
        REGISTRY
    ).unwrap();

    /// Total tokens processed
    pub static ref TOKENS_TOTAL: CounterVec = register_counter_vec_with_registry!(
        Opts::new("tokens_total", "Total tokens processed"),
        &["provider", "type"], // type: input, output
        REGISTRY
    ).unwrap();

    /// Image download attempts
    pub static ref IMAGE_DOWNLOADS: CounterVec = register_counter_vec_with_registry!(
        Opts::new("image_downloads_total", "Total creative image download attempts"),
        &["outcome"], // outcome: ok, error
        REGISTRY
    ).unwrap();
}

/// Gather all metrics and return as Prometheus text format
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer).unwrap();
    String::from_utf8(buffer).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_registration() {
        // Touch one collector so the counter families materialize
        IMAGE_DOWNLOADS.with_label_values(&["ok"]).inc();
        REQUESTS_TOTAL
            .with_label_values(&["POST", "/v1/analyze/openai", "200", "openai"])
            .inc();

        let metrics = gather_metrics();
        assert!(metrics.contains("requests_total"));
        assert!(metrics.contains("image_downloads_total"));
    }
}
