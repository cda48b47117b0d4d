// --- File: crates/donation_stripe/src/routes.rs ---

use crate::error::StripeError;
use crate::handlers::{create_checkout_session_handler, get_session_handler, StripeState};
use crate::service::StripeCheckoutService;
use axum::{
    routing::{get, post},
    Router,
};
use donation_common::CheckoutService;
use donation_config::AppConfig;
use std::sync::Arc;

/// Creates a router containing the donation checkout routes, backed by Stripe.
pub fn routes(config: Arc<AppConfig>) -> Router {
    let checkout = Arc::new(StripeCheckoutService::new(&config.stripe));
    routes_with_service(config, checkout)
}

/// Same routes on top of any checkout service implementation.
pub fn routes_with_service(
    config: Arc<AppConfig>,
    checkout: Arc<dyn CheckoutService<Error = StripeError>>,
) -> Router {
    let stripe_state = Arc::new(StripeState { config, checkout });

    Router::new()
        .route(
            "/create-checkout-session",
            post(create_checkout_session_handler),
        )
        .route("/session/{session_id}", get(get_session_handler))
        .with_state(stripe_state)
}
