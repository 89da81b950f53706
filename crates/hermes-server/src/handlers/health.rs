use axum::http::StatusCode;

/// Liveness check. Independent of the registered tools.
pub async fn health() -> (StatusCode, &'static str) {
    (StatusCode::OK, "OK")
}
