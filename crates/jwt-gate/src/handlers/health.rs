//! Liveness check.

/// Returns "OK" while the process is serving requests. Checks no dependencies.
pub async fn health_check() -> &'static str {
    "OK"
}
