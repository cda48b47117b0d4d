// --- File: crates/donation_stripe/src/lib.rs ---

pub mod logic;
#[cfg(test)]
mod logic_proptest;
pub mod handlers;
pub mod routes;
pub mod doc;
pub mod error;
pub mod service;

// Re-export for main backend
pub use routes::{routes, routes_with_service};
pub use logic::{build_checkout_config, CreateCheckoutSessionResponse, DonationRequest, RequestContext};
pub use handlers::StripeState;
pub use error::StripeError;
pub use service::StripeCheckoutService;
