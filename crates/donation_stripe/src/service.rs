use donation_common::models::{CheckoutConfig, CreatedSession, SessionSummary};
use donation_common::services::{BoxFuture, CheckoutService};
use donation_common::HTTP_CLIENT;
use donation_config::StripeConfig;
use reqwest::Client;

use crate::error::StripeError;
use crate::logic::{create_checkout_session, get_checkout_session_details};

/// Stripe Checkout implementation of [`CheckoutService`].
pub struct StripeCheckoutService {
    client: Client,
    stripe_config: StripeConfig,
}

impl StripeCheckoutService {
    /// Create a new Stripe checkout service on the shared HTTP client.
    pub fn new(stripe_config: &StripeConfig) -> Self {
        Self {
            client: HTTP_CLIENT.clone(),
            stripe_config: stripe_config.clone(),
        }
    }
}

impl CheckoutService for StripeCheckoutService {
    type Error = StripeError;

    fn create_session<'a>(
        &'a self,
        config: &'a CheckoutConfig,
    ) -> BoxFuture<'a, CreatedSession, Self::Error> {
        Box::pin(create_checkout_session(&self.client, &self.stripe_config, config))
    }

    fn retrieve_session<'a>(
        &'a self,
        session_id: &'a str,
    ) -> BoxFuture<'a, SessionSummary, Self::Error> {
        Box::pin(async move {
            let session =
                get_checkout_session_details(&self.client, &self.stripe_config, session_id).await?;
            Ok(SessionSummary::from(session))
        })
    }
}
