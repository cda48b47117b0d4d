// --- File: crates/donation_stripe/src/logic.rs ---
use donation_common::models::{
    BillingAddressCollection, CheckoutConfig, CheckoutMode, CreatedSession, LineItem, PriceData,
    ProductData, RecurringInterval, SessionSummary, SubmitType, CHECKOUT_SESSION_ID_PLACEHOLDER,
};
use donation_config::{AppConfig, StripeConfig};
use reqwest::{Client, Url};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{error, info, warn};

use crate::error::StripeError;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

pub const CURRENCY: &str = "usd";
pub const ONE_TIME_PRODUCT_NAME: &str = "Donation to Fair Observer";
pub const MONTHLY_PRODUCT_NAME: &str = "Monthly Donation to Fair Observer";
pub const DONATION_DESCRIPTION: &str = "Fair Observer is a 501(c)(3) non-profit news organization. Our mission is to educate global citizens of today and tomorrow. We are solely supported by donations. Thank you for your support.";

/// Requests arriving on a host containing this marker redirect to the `.xyz` site.
pub const XYZ_HOST_MARKER: &str = ".xyz";

/// Smallest accepted donation, in cents.
pub const MIN_UNIT_AMOUNT: i64 = 1;
/// Stripe's upper bound for a USD `unit_amount` (999,999.99).
pub const MAX_UNIT_AMOUNT: i64 = 99_999_999;

// --- Data Structures ---

/// Body posted by the donation form.
///
/// `amount` stays untyped until validation so that a missing or non-numeric
/// value yields a validation error rather than a body rejection. Numeric
/// strings ("25.50") are accepted alongside JSON numbers. The text fields never
/// reject a body: scalars are stringified and arrays or objects read as absent.
#[derive(Deserialize, Debug, Default, Clone)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct DonationRequest {
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(value_type = f64, example = 25.5))]
    pub amount: Option<Value>,
    /// "monthly" for a recurring donation; anything else is one-time.
    #[serde(default, deserialize_with = "lenient_string")]
    #[cfg_attr(feature = "openapi", schema(example = "monthly"))]
    pub frequency: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    #[cfg_attr(feature = "openapi", schema(example = "donor@example.org"))]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    #[cfg_attr(feature = "openapi", schema(example = "Ada"))]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    #[cfg_attr(feature = "openapi", schema(example = "Lovelace"))]
    pub last_name: Option<String>,
}

/// Reads an optional text field the way a loosely typed form would send it.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frequency {
    OneTime,
    Monthly,
}

impl Frequency {
    /// Only the exact literal "monthly" selects a subscription.
    pub fn from_field(value: Option<&str>) -> Self {
        match value {
            Some("monthly") => Frequency::Monthly,
            _ => Frequency::OneTime,
        }
    }
}

/// The parts of the inbound HTTP request that influence redirect URLs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    pub host: Option<String>,
    pub origin: Option<String>,
}

/// Response to the donation form.
#[derive(Serialize, Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CreateCheckoutSessionResponse {
    #[cfg_attr(
        feature = "openapi",
        schema(example = "https://checkout.stripe.com/c/pay/cs_test_a1...")
    )]
    pub url: String,
}

// --- Checkout Request Builder ---

/// Reads the raw `amount` field as a number of major currency units.
pub fn parse_amount(raw: Option<&Value>) -> Result<f64, StripeError> {
    match raw {
        None | Some(Value::Null) => Err(StripeError::Validation("amount is required".to_string())),
        Some(Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| StripeError::Validation("amount must be a number".to_string())),
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| StripeError::Validation("amount must be a number".to_string())),
        Some(_) => Err(StripeError::Validation("amount must be a number".to_string())),
    }
}

/// Converts major units to minor units, rounding to the nearest cent.
///
/// Rejects non-finite and negative amounts, and amounts that round to less
/// than one cent or more than Stripe accepts.
pub fn to_minor_units(amount: f64) -> Result<i64, StripeError> {
    if !amount.is_finite() {
        return Err(StripeError::Validation(
            "amount must be a finite number".to_string(),
        ));
    }
    if amount < 0.0 {
        return Err(StripeError::Validation(
            "amount must not be negative".to_string(),
        ));
    }

    let minor = (amount * 100.0).round();
    if minor < MIN_UNIT_AMOUNT as f64 {
        return Err(StripeError::Validation(
            "amount must be at least 0.01".to_string(),
        ));
    }
    if minor > MAX_UNIT_AMOUNT as f64 {
        return Err(StripeError::Validation(
            "amount must not exceed 999999.99".to_string(),
        ));
    }

    Ok(minor as i64)
}

/// Chooses the origin that Stripe redirects back to.
///
/// In production the `.xyz` site is picked by substring match on the Host
/// header. Elsewhere the browser's Origin header is trusted, falling back to
/// localhost on the configured port.
pub fn redirect_base_url(context: &RequestContext, config: &AppConfig) -> String {
    let base = if config.is_production() {
        let host = context.host.as_deref().unwrap_or("");
        if host.contains(XYZ_HOST_MARKER) {
            config.redirect.xyz_url.clone()
        } else {
            config.redirect.primary_url.clone()
        }
    } else {
        context
            .origin
            .as_deref()
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("http://localhost:{}", config.server.port))
    };

    base.trim_end_matches('/').to_string()
}

/// Builds the provider-agnostic checkout config for one donation.
///
/// Pure: no I/O, and the only failure is an invalid amount.
pub fn build_checkout_config(
    request: &DonationRequest,
    context: &RequestContext,
    config: &AppConfig,
) -> Result<CheckoutConfig, StripeError> {
    let unit_amount = to_minor_units(parse_amount(request.amount.as_ref())?)?;

    let first_name = request.first_name.clone().unwrap_or_default();
    let last_name = request.last_name.clone().unwrap_or_default();
    let full_name = format!("{} {}", first_name, last_name).trim().to_string();

    let base_url = redirect_base_url(context, config);
    let success_url = format!(
        "{}/success.html?session_id={}",
        base_url, CHECKOUT_SESSION_ID_PLACEHOLDER
    );
    let cancel_url = format!("{}/cancel.html", base_url);

    let customer_email = request
        .email
        .as_deref()
        .map(str::trim)
        .filter(|email| !email.is_empty())
        .map(str::to_string);

    let mut metadata = BTreeMap::new();
    metadata.insert("donor_name".to_string(), full_name);
    metadata.insert("donor_first_name".to_string(), first_name);
    metadata.insert("donor_last_name".to_string(), last_name);

    let (mode, product_name, recurring, submit_type) =
        match Frequency::from_field(request.frequency.as_deref()) {
            Frequency::Monthly => (
                CheckoutMode::Subscription,
                MONTHLY_PRODUCT_NAME,
                Some(RecurringInterval::Month),
                None,
            ),
            Frequency::OneTime => (
                CheckoutMode::Payment,
                ONE_TIME_PRODUCT_NAME,
                None,
                Some(SubmitType::Donate),
            ),
        };

    Ok(CheckoutConfig {
        payment_method_types: vec!["card".to_string()],
        customer_email,
        billing_address_collection: BillingAddressCollection::Auto,
        phone_number_collection_enabled: false,
        success_url,
        cancel_url,
        metadata,
        mode,
        line_items: vec![LineItem {
            price_data: PriceData {
                currency: CURRENCY.to_string(),
                product_data: ProductData {
                    name: product_name.to_string(),
                    description: Some(DONATION_DESCRIPTION.to_string()),
                },
                unit_amount,
                recurring,
            },
            quantity: 1,
        }],
        submit_type,
    })
}

// --- Stripe wire format ---

/// Flattens a checkout config into Stripe's bracketed form parameters.
pub fn encode_checkout_form(config: &CheckoutConfig) -> Vec<(String, String)> {
    let mut form_body: Vec<(String, String)> = Vec::new();

    for (i, method) in config.payment_method_types.iter().enumerate() {
        form_body.push((format!("payment_method_types[{}]", i), method.clone()));
    }
    if let Some(email) = &config.customer_email {
        form_body.push(("customer_email".to_string(), email.clone()));
    }
    form_body.push((
        "billing_address_collection".to_string(),
        config.billing_address_collection.as_str().to_string(),
    ));
    form_body.push((
        "phone_number_collection[enabled]".to_string(),
        config.phone_number_collection_enabled.to_string(),
    ));
    form_body.push(("success_url".to_string(), config.success_url.clone()));
    form_body.push(("cancel_url".to_string(), config.cancel_url.clone()));
    form_body.push(("mode".to_string(), config.mode.as_str().to_string()));
    if let Some(submit_type) = config.submit_type {
        form_body.push(("submit_type".to_string(), submit_type.as_str().to_string()));
    }
    for (key, value) in &config.metadata {
        form_body.push((format!("metadata[{}]", key), value.clone()));
    }

    for (i, item) in config.line_items.iter().enumerate() {
        let prefix = format!("line_items[{}]", i);
        let price = &item.price_data;
        form_body.push((
            format!("{}[price_data][currency]", prefix),
            price.currency.clone(),
        ));
        form_body.push((
            format!("{}[price_data][product_data][name]", prefix),
            price.product_data.name.clone(),
        ));
        if let Some(description) = &price.product_data.description {
            form_body.push((
                format!("{}[price_data][product_data][description]", prefix),
                description.clone(),
            ));
        }
        form_body.push((
            format!("{}[price_data][unit_amount]", prefix),
            price.unit_amount.to_string(),
        ));
        if let Some(interval) = price.recurring {
            form_body.push((
                format!("{}[price_data][recurring][interval]", prefix),
                interval.as_str().to_string(),
            ));
        }
        form_body.push((format!("{}[quantity]", prefix), item.quantity.to_string()));
    }

    form_body
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct StripeCustomerDetails {
    pub email: Option<String>,
    pub name: Option<String>,
}

/// The subset of a Stripe Checkout Session object this backend reads.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct StripeCheckoutSessionData {
    pub id: String,
    pub url: Option<String>,
    pub amount_total: Option<i64>,
    pub customer_details: Option<StripeCustomerDetails>,
    pub mode: Option<String>,
    pub payment_status: Option<String>, // e.g., "paid", "unpaid", "no_payment_required"
    pub status: Option<String>,         // e.g., "open", "complete", "expired"
}

impl From<StripeCheckoutSessionData> for SessionSummary {
    fn from(session: StripeCheckoutSessionData) -> Self {
        let details = session.customer_details.unwrap_or_default();
        SessionSummary {
            customer_email: details.email,
            customer_name: details.name,
            amount_total: session.amount_total,
            mode: session.mode,
        }
    }
}

/// Pulls `error.message` out of a Stripe error body, or returns the body as-is.
fn stripe_error_message(body_text: String) -> String {
    match serde_json::from_str::<Value>(&body_text) {
        Ok(json_body) => json_body
            .get("error")
            .and_then(|e| e.get("message"))
            .and_then(|m| m.as_str())
            .map(str::to_string)
            .unwrap_or(body_text),
        Err(_) => body_text,
    }
}

fn sessions_url(stripe_config: &StripeConfig) -> String {
    format!(
        "{}/checkout/sessions",
        stripe_config.api_base.trim_end_matches('/')
    )
}

// --- Stripe API calls ---

/// Creates a Stripe Checkout Session.
pub async fn create_checkout_session(
    client: &Client,
    stripe_config: &StripeConfig,
    checkout: &CheckoutConfig,
) -> Result<CreatedSession, StripeError> {
    let api_url = sessions_url(stripe_config);
    info!(
        "[Stripe Logic] Creating {} Checkout Session for {} {}",
        checkout.mode.as_str(),
        checkout
            .line_items
            .first()
            .map(|item| item.price_data.unit_amount)
            .unwrap_or_default(),
        CURRENCY
    );

    let response = client
        .post(&api_url)
        .basic_auth(&stripe_config.secret_key, None::<&str>)
        .form(&encode_checkout_form(checkout))
        .send()
        .await?;

    let status = response.status();
    let body_text = response.text().await?;

    info!("[Stripe Logic] Stripe API response status: {}", status);

    if !status.is_success() {
        let message = stripe_error_message(body_text);
        error!(
            "[Stripe Logic] Stripe API request failed with HTTP status: {}. Message: {}",
            status, message
        );
        return Err(StripeError::ApiError {
            status_code: status.as_u16(),
            message,
        });
    }

    let session: StripeCheckoutSessionData = serde_json::from_str(&body_text)?;
    match session.url {
        Some(url) => {
            info!("[Stripe Logic] Checkout Session {} created", session.id);
            Ok(CreatedSession {
                id: session.id,
                url,
            })
        }
        None => {
            warn!(
                "[Stripe Logic] Stripe response missing checkout session URL for {}",
                session.id
            );
            Err(StripeError::MissingCheckoutUrl)
        }
    }
}

/// Retrieves a Stripe Checkout Session by id.
pub async fn get_checkout_session_details(
    client: &Client,
    stripe_config: &StripeConfig,
    session_id: &str,
) -> Result<StripeCheckoutSessionData, StripeError> {
    info!(
        "[Stripe Logic] Retrieving Checkout Session details for ID: {}",
        session_id
    );

    let mut api_url = Url::parse(&sessions_url(stripe_config))
        .map_err(|e| StripeError::InternalError(format!("Invalid Stripe API base URL: {}", e)))?;
    // Pushed as one segment so the id is percent-encoded and cannot alter the path
    api_url
        .path_segments_mut()
        .map_err(|_| StripeError::InternalError("Stripe API base URL cannot be a base".to_string()))?
        .push(session_id);

    let response = client
        .get(api_url)
        .basic_auth(&stripe_config.secret_key, None::<&str>)
        .send()
        .await?;

    let status = response.status();
    let body_text = response.text().await?;

    if !status.is_success() {
        let message = stripe_error_message(body_text);
        error!(
            "[Stripe Logic] Failed to retrieve session {}: {} - {}",
            session_id, status, message
        );
        return Err(StripeError::ApiError {
            status_code: status.as_u16(),
            message,
        });
    }

    let session: StripeCheckoutSessionData = serde_json::from_str(&body_text)?;
    if session.payment_status.as_deref() != Some("paid")
        && session.status.as_deref() != Some("complete")
    {
        info!(
            "[Stripe Logic] Checkout session {} status is {:?}, payment_status is {:?}",
            session_id, session.status, session.payment_status
        );
    }
    Ok(session)
}

#[cfg(test)]
mod tests {
    use super::*;
    use donation_config::{RedirectConfig, RunEnvironment, ServerConfig};
    use serde_json::json;
    use std::collections::HashMap;

    fn config(environment: RunEnvironment) -> AppConfig {
        AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 3000,
            },
            environment,
            static_dir: "public".to_string(),
            stripe: StripeConfig {
                secret_key: "sk_test_123".to_string(),
                api_base: "https://api.stripe.com/v1".to_string(),
            },
            redirect: RedirectConfig {
                primary_url: "https://donate.fairobserver.com".to_string(),
                xyz_url: "https://donate.fairobserver.xyz".to_string(),
            },
        }
    }

    fn donation(amount: Value, frequency: Option<&str>) -> DonationRequest {
        DonationRequest {
            amount: Some(amount),
            frequency: frequency.map(str::to_string),
            email: Some("donor@example.org".to_string()),
            first_name: Some("Ada".to_string()),
            last_name: Some("Lovelace".to_string()),
        }
    }

    fn context(host: Option<&str>, origin: Option<&str>) -> RequestContext {
        RequestContext {
            host: host.map(str::to_string),
            origin: origin.map(str::to_string),
        }
    }

    #[test]
    fn one_time_donation_uses_payment_mode_with_donate_hint() {
        let checkout = build_checkout_config(
            &donation(json!(25.5), None),
            &context(None, None),
            &config(RunEnvironment::Development),
        )
        .unwrap();

        assert_eq!(checkout.mode, CheckoutMode::Payment);
        assert_eq!(checkout.submit_type, Some(SubmitType::Donate));
        assert_eq!(checkout.line_items.len(), 1);
        let item = &checkout.line_items[0];
        assert_eq!(item.quantity, 1);
        assert_eq!(item.price_data.unit_amount, 2550);
        assert_eq!(item.price_data.currency, "usd");
        assert_eq!(item.price_data.recurring, None);
        assert_eq!(item.price_data.product_data.name, ONE_TIME_PRODUCT_NAME);
        assert_eq!(
            item.price_data.product_data.description.as_deref(),
            Some(DONATION_DESCRIPTION)
        );
    }

    #[test]
    fn monthly_donation_uses_subscription_mode() {
        let checkout = build_checkout_config(
            &donation(json!(10), Some("monthly")),
            &context(None, None),
            &config(RunEnvironment::Development),
        )
        .unwrap();

        assert_eq!(checkout.mode, CheckoutMode::Subscription);
        assert_eq!(checkout.submit_type, None);
        let price = &checkout.line_items[0].price_data;
        assert_eq!(price.unit_amount, 1000);
        assert_eq!(price.recurring, Some(RecurringInterval::Month));
        assert_eq!(price.product_data.name, MONTHLY_PRODUCT_NAME);
    }

    #[test]
    fn any_other_frequency_is_one_time() {
        for frequency in ["Monthly", "yearly", "one-time", ""] {
            let checkout = build_checkout_config(
                &donation(json!(5), Some(frequency)),
                &context(None, None),
                &config(RunEnvironment::Development),
            )
            .unwrap();
            assert_eq!(checkout.mode, CheckoutMode::Payment, "frequency {:?}", frequency);
            assert_eq!(checkout.submit_type, Some(SubmitType::Donate));
        }
    }

    #[test]
    fn non_string_text_fields_do_not_reject_the_body() {
        let request: DonationRequest = serde_json::from_value(json!({
            "amount": 5,
            "frequency": ["monthly"],
            "firstName": 7,
            "lastName": null,
            "email": { "address": "donor@example.org" }
        }))
        .unwrap();

        assert_eq!(request.frequency, None);
        assert_eq!(request.first_name.as_deref(), Some("7"));
        assert_eq!(request.last_name, None);
        assert_eq!(request.email, None);

        let checkout = build_checkout_config(
            &request,
            &context(None, None),
            &config(RunEnvironment::Development),
        )
        .unwrap();
        assert_eq!(checkout.mode, CheckoutMode::Payment);
        assert_eq!(checkout.metadata["donor_name"], "7");
    }

    #[test]
    fn common_fields_are_fixed() {
        let checkout = build_checkout_config(
            &donation(json!(1), None),
            &context(None, None),
            &config(RunEnvironment::Development),
        )
        .unwrap();

        assert_eq!(checkout.payment_method_types, vec!["card".to_string()]);
        assert_eq!(checkout.billing_address_collection, BillingAddressCollection::Auto);
        assert!(!checkout.phone_number_collection_enabled);
        assert_eq!(checkout.customer_email.as_deref(), Some("donor@example.org"));
    }

    #[test]
    fn amounts_round_to_the_nearest_cent() {
        assert_eq!(to_minor_units(25.5).unwrap(), 2550);
        assert_eq!(to_minor_units(10.0).unwrap(), 1000);
        assert_eq!(to_minor_units(19.99).unwrap(), 1999);
        assert_eq!(to_minor_units(0.29).unwrap(), 29);
        assert_eq!(to_minor_units(12.345).unwrap(), 1235);
        assert_eq!(to_minor_units(0.005).unwrap(), 1);
        assert_eq!(to_minor_units(999_999.99).unwrap(), MAX_UNIT_AMOUNT);
    }

    #[test]
    fn invalid_amounts_are_rejected() {
        for amount in [f64::NAN, f64::INFINITY, -1.0, 0.0, 0.004, 1_000_000.0] {
            assert!(
                matches!(to_minor_units(amount), Err(StripeError::Validation(_))),
                "amount {} should be rejected",
                amount
            );
        }
    }

    #[test]
    fn amount_field_accepts_numbers_and_numeric_strings() {
        assert_eq!(parse_amount(Some(&json!(25.5))).unwrap(), 25.5);
        assert_eq!(parse_amount(Some(&json!(" 40 "))).unwrap(), 40.0);
        assert_eq!(parse_amount(Some(&json!(7))).unwrap(), 7.0);
    }

    #[test]
    fn missing_or_non_numeric_amount_is_a_validation_error() {
        for raw in [None, Some(json!(null)), Some(json!("abc")), Some(json!(true)), Some(json!([5]))] {
            let request = DonationRequest {
                amount: raw.clone(),
                ..donation(json!(0), None)
            };
            let result = build_checkout_config(
                &request,
                &context(None, None),
                &config(RunEnvironment::Development),
            );
            assert!(
                matches!(result, Err(StripeError::Validation(_))),
                "amount {:?} should be rejected",
                raw
            );
        }
    }

    #[test]
    fn production_xyz_host_redirects_to_xyz_domain() {
        let checkout = build_checkout_config(
            &donation(json!(5), None),
            &context(Some("donate.fairobserver.xyz"), Some("https://attacker.example")),
            &config(RunEnvironment::Production),
        )
        .unwrap();

        assert_eq!(
            checkout.success_url,
            "https://donate.fairobserver.xyz/success.html?session_id={CHECKOUT_SESSION_ID}"
        );
        assert_eq!(checkout.cancel_url, "https://donate.fairobserver.xyz/cancel.html");
    }

    #[test]
    fn production_other_host_redirects_to_com_domain() {
        for host in [Some("donate.fairobserver.com"), Some("localhost:3000"), None] {
            let base = redirect_base_url(&context(host, None), &config(RunEnvironment::Production));
            assert_eq!(base, "https://donate.fairobserver.com", "host {:?}", host);
        }
    }

    #[test]
    fn xyz_match_is_a_substring_match() {
        let base = redirect_base_url(
            &context(Some("preview.xyzzy.example"), None),
            &config(RunEnvironment::Production),
        );
        assert_eq!(base, "https://donate.fairobserver.xyz");
    }

    #[test]
    fn development_prefers_origin_header() {
        let checkout = build_checkout_config(
            &donation(json!(5), None),
            &context(Some("ignored.xyz"), Some("http://127.0.0.1:5173")),
            &config(RunEnvironment::Development),
        )
        .unwrap();

        assert_eq!(
            checkout.success_url,
            "http://127.0.0.1:5173/success.html?session_id={CHECKOUT_SESSION_ID}"
        );
        assert_eq!(checkout.cancel_url, "http://127.0.0.1:5173/cancel.html");
    }

    #[test]
    fn development_without_origin_falls_back_to_localhost_port() {
        let mut app_config = config(RunEnvironment::Development);
        app_config.server.port = 8123;

        assert_eq!(
            redirect_base_url(&context(None, None), &app_config),
            "http://localhost:8123"
        );
        assert_eq!(
            redirect_base_url(&context(None, Some("")), &app_config),
            "http://localhost:8123"
        );
    }

    #[test]
    fn donor_name_metadata_is_trimmed() {
        let mut request = donation(json!(5), None);
        request.last_name = Some(String::new());
        let checkout = build_checkout_config(
            &request,
            &context(None, None),
            &config(RunEnvironment::Development),
        )
        .unwrap();

        assert_eq!(checkout.metadata["donor_name"], "Ada");
        assert_eq!(checkout.metadata["donor_first_name"], "Ada");
        assert_eq!(checkout.metadata["donor_last_name"], "");

        request.first_name = None;
        request.last_name = Some("Lovelace".to_string());
        let checkout = build_checkout_config(
            &request,
            &context(None, None),
            &config(RunEnvironment::Development),
        )
        .unwrap();
        assert_eq!(checkout.metadata["donor_name"], "Lovelace");
    }

    #[test]
    fn blank_email_is_omitted() {
        let mut request = donation(json!(5), None);
        request.email = Some("  ".to_string());
        let checkout = build_checkout_config(
            &request,
            &context(None, None),
            &config(RunEnvironment::Development),
        )
        .unwrap();
        assert_eq!(checkout.customer_email, None);
        assert!(!encode_checkout_form(&checkout)
            .iter()
            .any(|(key, _)| key == "customer_email"));
    }

    #[test]
    fn form_encoding_matches_stripe_parameter_names() {
        let checkout = build_checkout_config(
            &donation(json!(10), Some("monthly")),
            &context(None, Some("http://localhost:3000")),
            &config(RunEnvironment::Development),
        )
        .unwrap();
        let form: HashMap<String, String> = encode_checkout_form(&checkout).into_iter().collect();

        assert_eq!(form["payment_method_types[0]"], "card");
        assert_eq!(form["customer_email"], "donor@example.org");
        assert_eq!(form["billing_address_collection"], "auto");
        assert_eq!(form["phone_number_collection[enabled]"], "false");
        assert_eq!(
            form["success_url"],
            "http://localhost:3000/success.html?session_id={CHECKOUT_SESSION_ID}"
        );
        assert_eq!(form["cancel_url"], "http://localhost:3000/cancel.html");
        assert_eq!(form["mode"], "subscription");
        assert_eq!(form["metadata[donor_name]"], "Ada Lovelace");
        assert_eq!(form["metadata[donor_first_name]"], "Ada");
        assert_eq!(form["metadata[donor_last_name]"], "Lovelace");
        assert_eq!(form["line_items[0][price_data][currency]"], "usd");
        assert_eq!(
            form["line_items[0][price_data][product_data][name]"],
            MONTHLY_PRODUCT_NAME
        );
        assert_eq!(form["line_items[0][price_data][unit_amount]"], "1000");
        assert_eq!(form["line_items[0][price_data][recurring][interval]"], "month");
        assert_eq!(form["line_items[0][quantity]"], "1");
        assert!(!form.contains_key("submit_type"));
    }

    #[test]
    fn one_time_form_carries_submit_type() {
        let checkout = build_checkout_config(
            &donation(json!(25.5), None),
            &context(None, None),
            &config(RunEnvironment::Development),
        )
        .unwrap();
        let form: HashMap<String, String> = encode_checkout_form(&checkout).into_iter().collect();

        assert_eq!(form["mode"], "payment");
        assert_eq!(form["submit_type"], "donate");
        assert_eq!(form["line_items[0][price_data][unit_amount]"], "2550");
        assert!(!form.contains_key("line_items[0][price_data][recurring][interval]"));
    }

    #[test]
    fn session_summary_tolerates_missing_customer_details() {
        let session: StripeCheckoutSessionData = serde_json::from_value(json!({
            "id": "cs_test_123",
            "object": "checkout.session",
            "amount_total": 2550,
            "customer_details": null,
            "mode": "payment",
            "status": "complete"
        }))
        .unwrap();

        let summary = SessionSummary::from(session);
        assert_eq!(summary.customer_email, None);
        assert_eq!(summary.customer_name, None);
        assert_eq!(summary.amount_total, Some(2550));
        assert_eq!(summary.mode.as_deref(), Some("payment"));

        let rendered = serde_json::to_value(&summary).unwrap();
        assert_eq!(rendered["customer_email"], Value::Null);
        assert_eq!(rendered["customer_name"], Value::Null);
    }

    #[test]
    fn stripe_error_message_prefers_the_nested_message() {
        assert_eq!(
            stripe_error_message(
                json!({"error": {"message": "Invalid API Key provided", "type": "invalid_request_error"}})
                    .to_string()
            ),
            "Invalid API Key provided"
        );
        assert_eq!(stripe_error_message("Bad Gateway".to_string()), "Bad Gateway");
    }
}
