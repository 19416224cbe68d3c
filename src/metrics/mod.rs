// Metrics module for Prometheus observability

mod registry;

pub use registry::{
    gather_metrics, IMAGE_DOWNLOADS, PROVIDER_API_CALLS, PROVIDER_API_DURATION, REQUESTS_TOTAL,
    REQUEST_DURATION, TOKENS_TOTAL,
};

/// Helper to record request metrics
pub fn record_request(
    method: &str,
    endpoint: &str,
    status_code: u16,
    provider: &str,
    duration_secs: f64,
) {
    REQUESTS_TOTAL
        .with_label_values(&[method, endpoint, &status_code.to_string(), provider])
        .inc();

    REQUEST_DURATION
        .with_label_values(&[method, endpoint, &status_code.to_string()])
        .observe(duration_secs);
}

/// Helper to record provider API call metrics. A status code of 0
/// marks a transport failure before any HTTP status was received.
pub fn record_provider_call(provider: &str, status_code: u16, duration_secs: f64) {
    PROVIDER_API_CALLS
        .with_label_values(&[provider, &status_code.to_string()])
        .inc();

    PROVIDER_API_DURATION
        .with_label_values(&[provider])
        .observe(duration_secs);
}

/// Helper to record token usage
pub fn record_tokens(provider: &str, input: u32, output: u32) {
    if input > 0 {
        TOKENS_TOTAL
            .with_label_values(&[provider, "input"])
            .inc_by(input as f64);
    }
    if output > 0 {
        TOKENS_TOTAL
            .with_label_values(&[provider, "output"])
            .inc_by(output as f64);
    }
}

/// Helper to record image download outcomes
pub fn record_image_download(outcome: &str) {
    IMAGE_DOWNLOADS.with_label_values(&[outcome]).inc();
}
