use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, HeaderMap},
    response::Json,
};
use donation_common::logging::log_result;
use donation_common::models::SessionSummary;
use donation_common::{validation_error, CheckoutService, DonationError};
use donation_config::AppConfig;
use std::sync::Arc;
use tracing::{info, warn};

use crate::error::StripeError;
use crate::logic::{
    build_checkout_config, CreateCheckoutSessionResponse, DonationRequest, RequestContext,
};

// --- State for Stripe Handlers ---
#[derive(Clone)]
pub struct StripeState {
    pub config: Arc<AppConfig>,
    pub checkout: Arc<dyn CheckoutService<Error = StripeError>>,
}

/// Host and Origin headers, ignoring values that are not valid strings.
pub fn request_context(headers: &HeaderMap) -> RequestContext {
    let header_value = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    };

    RequestContext {
        host: header_value(header::HOST),
        origin: header_value(header::ORIGIN),
    }
}

/// Creates a hosted checkout session for a one-time or monthly donation.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/create-checkout-session",
    request_body = DonationRequest,
    responses(
        (status = 200, description = "Checkout Session created", body = CreateCheckoutSessionResponse),
        (status = 400, description = "Missing or invalid amount"),
        (status = 500, description = "Stripe API error")
    ),
    tag = "Donations"
))]
pub async fn create_checkout_session_handler(
    State(state): State<Arc<StripeState>>,
    headers: HeaderMap,
    payload: Result<Json<DonationRequest>, JsonRejection>,
) -> Result<Json<CreateCheckoutSessionResponse>, DonationError> {
    let Json(donation) = payload.map_err(|rejection| validation_error(rejection.body_text()))?;

    let context = request_context(&headers);
    let checkout_config =
        build_checkout_config(&donation, &context, &state.config).map_err(|e| {
            warn!("Rejected donation request: {}", e);
            DonationError::from(e)
        })?;

    let session = log_result(
        state.checkout.create_session(&checkout_config).await,
        "Checkout session created",
        "Error creating checkout session",
    )?;
    info!("Redirecting donor to checkout session {}", session.id);

    Ok(Json(CreateCheckoutSessionResponse { url: session.url }))
}

/// Returns the confirmation-page view of a checkout session.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/session/{session_id}",
    params(("session_id" = String, Path, description = "Stripe Checkout Session id", example = "cs_test_a1...")),
    responses(
        (status = 200, description = "Session details", body = SessionSummary),
        (status = 500, description = "Stripe API error")
    ),
    tag = "Donations"
))]
pub async fn get_session_handler(
    State(state): State<Arc<StripeState>>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionSummary>, DonationError> {
    let summary = log_result(
        state.checkout.retrieve_session(&session_id).await,
        "Checkout session retrieved",
        "Error retrieving checkout session",
    )?;
    Ok(Json(summary))
}
