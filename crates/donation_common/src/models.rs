// --- File: crates/donation_common/src/models.rs ---

// Provider-agnostic description of a hosted checkout session, plus the small
// views of provider sessions that this backend hands back to the browser.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Token the provider replaces with the real session id when redirecting to
/// the success page. Must reach the provider verbatim.
pub const CHECKOUT_SESSION_ID_PLACEHOLDER: &str = "{CHECKOUT_SESSION_ID}";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutMode {
    /// One-time charge.
    Payment,
    /// Recurring charge.
    Subscription,
}

impl CheckoutMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutMode::Payment => "payment",
            CheckoutMode::Subscription => "subscription",
        }
    }
}

/// Changes the wording of the hosted page's submit button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitType {
    Donate,
}

impl SubmitType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmitType::Donate => "donate",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingAddressCollection {
    Auto,
}

impl BillingAddressCollection {
    pub fn as_str(&self) -> &'static str {
        match self {
            BillingAddressCollection::Auto => "auto",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecurringInterval {
    Month,
}

impl RecurringInterval {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecurringInterval::Month => "month",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductData {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceData {
    /// Lowercase ISO currency code, e.g. "usd".
    pub currency: String,
    pub product_data: ProductData,
    /// Amount in minor currency units (cents).
    pub unit_amount: i64,
    /// Present only for subscriptions.
    pub recurring: Option<RecurringInterval>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub price_data: PriceData,
    pub quantity: u32,
}

/// Everything needed to create one hosted checkout session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutConfig {
    pub payment_method_types: Vec<String>,
    pub customer_email: Option<String>,
    pub billing_address_collection: BillingAddressCollection,
    pub phone_number_collection_enabled: bool,
    pub success_url: String,
    pub cancel_url: String,
    // Ordered so the encoded request is deterministic
    pub metadata: BTreeMap<String, String>,
    pub mode: CheckoutMode,
    pub line_items: Vec<LineItem>,
    pub submit_type: Option<SubmitType>,
}

/// A session the provider has just created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedSession {
    pub id: String,
    /// Hosted checkout page to redirect the donor to.
    pub url: String,
}

/// The four fields of a provider session shown on the confirmation page.
/// Absent values serialize as `null`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SessionSummary {
    #[cfg_attr(feature = "openapi", schema(example = "donor@example.org"))]
    pub customer_email: Option<String>,
    #[cfg_attr(feature = "openapi", schema(example = "Ada Lovelace"))]
    pub customer_name: Option<String>,
    #[cfg_attr(feature = "openapi", schema(example = 2550))]
    pub amount_total: Option<i64>,
    #[cfg_attr(feature = "openapi", schema(example = "payment"))]
    pub mode: Option<String>,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    /// RFC 3339 UTC timestamp with millisecond precision.
    pub timestamp: String,
}
