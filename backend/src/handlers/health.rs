//! Health check handler

/// API health check
pub async fn health_check() -> &'static str {
    "OK"
}
