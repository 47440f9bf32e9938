//! Health check handlers

/// GET /health
pub async fn health() -> &'static str {
    "OK"
}
