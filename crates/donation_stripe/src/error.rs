// --- File: crates/donation_stripe/src/error.rs ---
use donation_common::{internal_error, provider_error, validation_error, DonationError};
use thiserror::Error;

const SERVICE_NAME: &str = "Stripe";

/// Stripe-specific error types.
#[derive(Error, Debug)]
pub enum StripeError {
    /// The donation form data cannot be turned into a checkout session
    #[error("{0}")]
    Validation(String),

    /// Error occurred during a Stripe API request
    #[error("Stripe API request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// Error returned by the Stripe API
    #[error("Stripe API returned an error: {message} (Status: {status_code})")]
    ApiError { status_code: u16, message: String },

    /// Error parsing Stripe API response
    #[error("Failed to parse Stripe API response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Session was created but Stripe sent no hosted page URL
    #[error("Stripe response missing checkout URL")]
    MissingCheckoutUrl,

    /// Internal processing error
    #[error("Internal processing error: {0}")]
    InternalError(String),
}

/// Convert StripeError to DonationError.
///
/// Every failure of the provider call, whatever its cause, becomes a
/// `ProviderError`. For API errors the caller sees Stripe's own message.
impl From<StripeError> for DonationError {
    fn from(err: StripeError) -> Self {
        match err {
            StripeError::Validation(msg) => validation_error(msg),
            StripeError::ApiError { message, .. } => provider_error(SERVICE_NAME, message),
            StripeError::InternalError(msg) => internal_error(msg),
            other @ (StripeError::RequestError(_)
            | StripeError::ParseError(_)
            | StripeError::MissingCheckoutUrl) => provider_error(SERVICE_NAME, other),
        }
    }
}
