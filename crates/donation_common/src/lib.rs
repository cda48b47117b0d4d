// --- File: crates/donation_common/src/lib.rs ---

pub mod models;    // Provider-agnostic checkout models
pub mod handlers;  // Shared HTTP handlers (health)
pub mod routes;    // Shared route definitions
pub mod error;     // Error handling
pub mod http;      // HTTP utilities
pub mod services;  // Service abstractions
pub mod logging;   // Logging utilities

// Re-export the routes function to be used by the main backend service
pub use routes::routes;

// Re-export error types and utilities for easier access
pub use error::{
    DonationError,
    HttpStatusCode,
    config_error,
    validation_error,
    provider_error,
    internal_error,
};

pub use http::{IntoHttpResponse, client::HTTP_CLIENT};

pub use services::{BoxFuture, CheckoutService};
