// --- File: crates/donation_stripe/src/doc.rs ---
#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::logic::{CreateCheckoutSessionResponse, DonationRequest};
use donation_common::models::SessionSummary;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::create_checkout_session_handler,
        crate::handlers::get_session_handler,
    ),
    components(
        schemas(DonationRequest, CreateCheckoutSessionResponse, SessionSummary)
    ),
    tags(
        (name = "Donations", description = "Stripe Checkout sessions for one-time and monthly donations")
    )
)]
pub struct StripeApiDoc;
