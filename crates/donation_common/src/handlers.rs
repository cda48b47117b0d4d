// --- File: crates/donation_common/src/handlers.rs ---
use axum::Json;
use chrono::{SecondsFormat, Utc};

use crate::models::HealthResponse;

/// Liveness probe. Does not touch the payment provider.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}
