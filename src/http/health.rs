//! Liveness endpoint.

use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
}

/// Reports `{"status":"ok"}` whenever the server is accepting requests.
pub async fn health_handler() -> Json<HealthStatus> {
    Json(HealthStatus { status: "ok" })
}
