use config::{Config, ConfigError, Environment, File, Map};
use once_cell::sync::OnceCell;
use std::env;
use tracing::debug;

pub mod models;
pub use models::*;

/// Prefix for structured overrides, e.g. `DONATION__SERVER__PORT=8080`.
pub const ENV_PREFIX: &str = "DONATION";

/// Loads the application configuration from `.env`, optional config files and
/// the process environment.
///
/// Fails when the Stripe secret key is missing; callers must not start serving
/// traffic in that case.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();
    load_config_from_env(env::vars().collect())
}

/// Same as [`load_config`] but reads environment variables from `vars` instead
/// of the process environment.
///
/// Precedence, lowest first: built-in defaults, `config/default.*`,
/// `config/{RUN_ENV}.*`, `DONATION__*` variables, then the plain
/// `STRIPE_SECRET_KEY`, `PORT` and `NODE_ENV`/`RUN_ENV` variables.
pub fn load_config_from_env(vars: Map<String, String>) -> Result<AppConfig, ConfigError> {
    let run_env = vars
        .get("RUN_ENV")
        .cloned()
        .unwrap_or_else(|| "development".to_string());
    let config_dir = vars
        .get("CONFIG_DIR")
        .cloned()
        .unwrap_or_else(|| "config".to_string());
    let environment = vars.get("NODE_ENV").or_else(|| vars.get("RUN_ENV")).cloned();

    let default_path = format!("{}/default", config_dir);
    let env_path = format!("{}/{}", config_dir, run_env);
    debug!("Config files: {} then {}", default_path, env_path);

    let builder = Config::builder()
        .set_default("server.host", DEFAULT_HOST)?
        .set_default("server.port", i64::from(DEFAULT_PORT))?
        .set_default("environment", RunEnvironment::default().as_str())?
        .set_default("static_dir", DEFAULT_STATIC_DIR)?
        .set_default("stripe.api_base", DEFAULT_STRIPE_API_BASE)?
        .set_default("redirect.primary_url", DEFAULT_PRIMARY_URL)?
        .set_default("redirect.xyz_url", DEFAULT_XYZ_URL)?
        .add_source(File::with_name(&default_path).required(false))
        .add_source(File::with_name(&env_path).required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .source(Some(vars.clone())),
        )
        .set_override_option("stripe.secret_key", vars.get("STRIPE_SECRET_KEY").cloned())?
        .set_override_option("server.port", vars.get("PORT").cloned())?
        .set_override_option("environment", environment)?;

    let config: AppConfig = builder.build()?.try_deserialize()?;

    if config.stripe.secret_key.trim().is_empty() {
        return Err(ConfigError::Message(
            "STRIPE_SECRET_KEY environment variable is required".to_string(),
        ));
    }

    Ok(config)
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Loads the dotenv file into the process environment, at most once.
///
/// The file defaults to `.env` and can be redirected with `DOTENV_OVERRIDE`.
/// A missing file is not an error. Returns the path that was used.
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path = env::var("DOTENV_OVERRIDE").unwrap_or_else(|_| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });

    dotenv_path
}
