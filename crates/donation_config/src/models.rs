// --- File: crates/donation_config/src/models.rs ---

use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_STATIC_DIR: &str = "public";
pub const DEFAULT_STRIPE_API_BASE: &str = "https://api.stripe.com/v1";
pub const DEFAULT_PRIMARY_URL: &str = "https://donate.fairobserver.com";
pub const DEFAULT_XYZ_URL: &str = "https://donate.fairobserver.xyz";

// --- General Server Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Deployment mode. Only `production` changes behavior (redirect domains);
/// every other value is treated as development.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(from = "String", into = "String")]
pub enum RunEnvironment {
    #[default]
    Development,
    Production,
}

impl From<String> for RunEnvironment {
    fn from(value: String) -> Self {
        if value.trim().eq_ignore_ascii_case("production") {
            RunEnvironment::Production
        } else {
            RunEnvironment::Development
        }
    }
}

impl From<RunEnvironment> for String {
    fn from(value: RunEnvironment) -> Self {
        value.as_str().to_string()
    }
}

impl RunEnvironment {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunEnvironment::Development => "development",
            RunEnvironment::Production => "production",
        }
    }
}

impl fmt::Display for RunEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// --- Stripe Config ---
// The secret key comes from STRIPE_SECRET_KEY (or DONATION__STRIPE__SECRET_KEY)
// and is never serialized back out.
#[derive(Deserialize, Serialize, Clone)]
pub struct StripeConfig {
    #[serde(default, skip_serializing)]
    pub secret_key: String,
    /// Base URL of the Stripe REST API, overridable for tests and proxies.
    pub api_base: String,
}

impl fmt::Debug for StripeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StripeConfig")
            .field("secret_key", &"***")
            .field("api_base", &self.api_base)
            .finish()
    }
}

// --- Redirect Config ---
/// Public origins used for checkout redirects when running in production.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RedirectConfig {
    /// Used unless the request arrived on a `.xyz` host.
    pub primary_url: String,
    pub xyz_url: String,
}

// --- Unified App Configuration ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    #[serde(default)]
    pub environment: RunEnvironment,
    /// Directory served for every path that is not an API route.
    pub static_dir: String,
    pub stripe: StripeConfig,
    pub redirect: RedirectConfig,
}

impl AppConfig {
    pub fn is_production(&self) -> bool {
        self.environment == RunEnvironment::Production
    }
}
