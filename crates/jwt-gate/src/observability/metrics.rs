//! Metrics definitions for jwt-gate
//!
//! All metrics follow Prometheus naming conventions:
//! - `jwt_gate_` prefix
//! - `_total` suffix for counters
//! - `_seconds` suffix for duration histograms
//!
//! # Cardinality
//!
//! Labels are bounded to prevent cardinality explosion:
//! - `status`: 2 values (success, error)
//! - `error_category`: bounded by `AuthError::metric_label` (9 values)

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use std::time::Duration;

/// Initialize Prometheus metrics recorder and return the handle
/// for serving metrics via HTTP.
///
/// Must be called before any metrics are recorded. Validation is an
/// in-process HMAC plus one identity lookup, so buckets are sub-second.
///
/// # Errors
///
/// Returns error if Prometheus recorder fails to install (e.g., already installed).
pub fn init_metrics_recorder() -> Result<PrometheusHandle, String> {
    PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Prefix("jwt_gate_token_validation".to_string()),
            &[
                0.0005, 0.001, 0.0025, 0.005, 0.010, 0.025, 0.050, 0.100, 0.250, 0.500, 1.000,
            ],
        )
        .map_err(|e| format!("Failed to set token validation buckets: {e}"))?
        .install_recorder()
        .map_err(|e| format!("Failed to install Prometheus metrics recorder: {e}"))
}

/// Record token issuance outcome
///
/// Metric: `jwt_gate_token_issuance_total`
/// Labels: `status`
pub fn record_token_issuance(status: &str) {
    counter!("jwt_gate_token_issuance_total", "status" => status.to_string()).increment(1);
}

/// Record token validation result
///
/// Metric: `jwt_gate_token_validations_total`, `jwt_gate_token_validation_duration_seconds`
/// Labels: `status`, `error_category`
pub fn record_token_validation(status: &str, error_category: Option<&str>, duration: Duration) {
    let category = error_category.unwrap_or("none");

    histogram!("jwt_gate_token_validation_duration_seconds", "status" => status.to_string())
        .record(duration.as_secs_f64());

    counter!("jwt_gate_token_validations_total", "status" => status.to_string(), "error_category" => category.to_string())
        .increment(1);
}
