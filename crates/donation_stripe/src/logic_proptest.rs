#[cfg(test)]
mod tests {
    use crate::logic::{build_checkout_config, DonationRequest, RequestContext};
    use donation_common::models::{CheckoutMode, SubmitType};
    use donation_config::{
        AppConfig, RedirectConfig, RunEnvironment, ServerConfig, StripeConfig,
    };
    use proptest::prelude::*;
    use serde_json::json;

    fn create_mock_config(environment: RunEnvironment) -> AppConfig {
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

    fn request(amount: f64, frequency: Option<String>, first: &str, last: &str) -> DonationRequest {
        DonationRequest {
            amount: Some(json!(amount)),
            frequency,
            email: None,
            first_name: Some(first.to_string()),
            last_name: Some(last.to_string()),
        }
    }

    proptest! {
        // Unit amount is the rounded cent value and redirects keep their fixed suffixes
        #[test]
        fn test_unit_amount_is_rounded_cents(
            amount in 0.01f64..=999_999.99f64,
            monthly in any::<bool>(),
            production in any::<bool>(),
            host in "[a-z.]{0,20}",
        ) {
            let environment = if production {
                RunEnvironment::Production
            } else {
                RunEnvironment::Development
            };
            let frequency = monthly.then(|| "monthly".to_string());
            let context = RequestContext { host: Some(host), origin: None };

            let checkout = build_checkout_config(
                &request(amount, frequency, "Ada", "Lovelace"),
                &context,
                &create_mock_config(environment),
            )
            .unwrap();

            prop_assert_eq!(
                checkout.line_items[0].price_data.unit_amount,
                (amount * 100.0).round() as i64
            );
            prop_assert!(
                checkout.success_url.ends_with("/success.html?session_id={CHECKOUT_SESSION_ID}"),
                "success url: {}", checkout.success_url
            );
            prop_assert!(
                checkout.cancel_url.ends_with("/cancel.html"),
                "cancel url: {}", checkout.cancel_url
            );
        }

        // Anything but the exact literal "monthly" is a one-time donation
        #[test]
        fn test_other_frequencies_are_one_time(frequency in "\\PC{0,12}") {
            prop_assume!(frequency != "monthly");

            let checkout = build_checkout_config(
                &request(5.0, Some(frequency), "Ada", "Lovelace"),
                &RequestContext::default(),
                &create_mock_config(RunEnvironment::Development),
            )
            .unwrap();

            prop_assert_eq!(checkout.mode, CheckoutMode::Payment);
            prop_assert_eq!(checkout.submit_type, Some(SubmitType::Donate));
            prop_assert_eq!(checkout.line_items[0].price_data.recurring, None);
        }

        // The display name is first and last name joined by one space, trimmed
        #[test]
        fn test_donor_name_is_joined_and_trimmed(first in "\\PC{0,16}", last in "\\PC{0,16}") {
            let checkout = build_checkout_config(
                &request(5.0, None, &first, &last),
                &RequestContext::default(),
                &create_mock_config(RunEnvironment::Development),
            )
            .unwrap();

            let expected = format!("{} {}", first, last).trim().to_string();
            prop_assert_eq!(&checkout.metadata["donor_name"], &expected);
            prop_assert_eq!(&checkout.metadata["donor_first_name"], &first);
            prop_assert_eq!(&checkout.metadata["donor_last_name"], &last);
        }
    }
}
