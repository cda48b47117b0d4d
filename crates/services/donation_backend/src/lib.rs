// --- File: services/donation_backend/src/lib.rs ---
use axum::Router;
use donation_common::CheckoutService;
use donation_config::AppConfig;
use donation_stripe::{StripeCheckoutService, StripeError};
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Builds the full application router backed by the real Stripe API.
pub fn build_app(config: Arc<AppConfig>) -> Router {
    let checkout = Arc::new(StripeCheckoutService::new(&config.stripe));
    build_app_with_checkout(config, checkout)
}

/// Builds the application router on top of the given checkout service.
///
/// API routes take precedence; every other path is served from
/// `config.static_dir` (the donation form and the success/cancel pages).
pub fn build_app_with_checkout(
    config: Arc<AppConfig>,
    checkout: Arc<dyn CheckoutService<Error = StripeError>>,
) -> Router {
    #[allow(unused_mut)] // mutated only with the openapi feature
    let mut app = Router::new()
        .merge(donation_common::routes())
        .merge(donation_stripe::routes_with_service(config.clone(), checkout));

    #[cfg(feature = "openapi")]
    {
        use donation_stripe::doc::StripeApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "Donation API",
                version = "0.1.0",
                description = "Stripe Checkout donation service",
                license(name = "MIT", url = "https://opensource.org/licenses/MIT")
            ),
            tags((name = "Donations", description = "Checkout session endpoints")),
        )]
        struct ApiDoc;

        let mut openapi_doc = ApiDoc::openapi();
        openapi_doc.merge(StripeApiDoc::openapi());
        tracing::info!("Adding Swagger UI at /docs");

        let swagger_ui = SwaggerUi::new("/docs").url("/docs/openapi.json", openapi_doc);
        app = app.merge(swagger_ui);
    }

    app.fallback_service(ServeDir::new(&config.static_dir))
        .layer(TraceLayer::new_for_http())
}
