// --- File: crates/donation_common/src/http.rs ---
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::error::{DonationError, HttpStatusCode};

// Include the client module
pub mod client;

/// Extension trait for DonationError to convert it to an Axum HTTP response.
pub trait IntoHttpResponse {
    /// Converts the error into an Axum HTTP response.
    fn into_http_response(self) -> Response;
}

impl IntoHttpResponse for DonationError {
    fn into_http_response(self) -> Response {
        let status_code =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // The message is handed to the caller as-is: `{ "error": "<message>" }`
        let body = Json(json!({ "error": self.to_string() }));

        (status_code, body).into_response()
    }
}

/// Implement IntoResponse for DonationError so handlers can return `Result<_, DonationError>`.
impl IntoResponse for DonationError {
    fn into_response(self) -> Response {
        self.into_http_response()
    }
}
