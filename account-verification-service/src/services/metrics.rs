use metrics::counter;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;

static METRICS_HANDLE: OnceLock<Option<PrometheusHandle>> = OnceLock::new();

/// Installs the global Prometheus recorder once per process. Later calls
/// (several test apps in one binary) reuse the first handle.
pub fn init_metrics() {
    METRICS_HANDLE.get_or_init(|| match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => Some(handle),
        Err(e) => {
            tracing::warn!(error = %e, "Prometheus recorder not installed");
            None
        }
    });
}

pub fn get_metrics() -> String {
    METRICS_HANDLE
        .get()
        .and_then(Option::as_ref)
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized\n".to_string())
}

/// One call to the provider for one bank code.
pub fn record_attempt(bank_code: &str, outcome: &'static str) {
    counter!(
        "account_resolution_attempts_total",
        "bank_code" => bank_code.to_string(),
        "outcome" => outcome
    )
    .increment(1);
}

/// Terminal outcome of one verification request.
pub fn record_verification(outcome: &'static str) {
    counter!("account_verifications_total", "outcome" => outcome).increment(1);
}
