// --- File: crates/donation_common/src/services.rs ---
//! Service abstractions for external services.
//!
//! Handlers depend on these traits rather than on a concrete provider client,
//! so tests can swap in an in-memory implementation.

use std::future::Future;
use std::pin::Pin;

use crate::models::{CheckoutConfig, CreatedSession, SessionSummary};

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// A hosted checkout provider: creates sessions and reads them back.
pub trait CheckoutService: Send + Sync {
    /// Error type returned by checkout service operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Create a hosted checkout session from a fully built config.
    fn create_session<'a>(
        &'a self,
        config: &'a CheckoutConfig,
    ) -> BoxFuture<'a, CreatedSession, Self::Error>;

    /// Retrieve a session by id and project the fields shown after payment.
    fn retrieve_session<'a>(
        &'a self,
        session_id: &'a str,
    ) -> BoxFuture<'a, SessionSummary, Self::Error>;
}
