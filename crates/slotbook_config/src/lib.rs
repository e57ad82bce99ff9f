use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use std::env;
use tracing::debug;
pub mod models;
pub use models::*;

/// Prefix for configuration environment variables, e.g. `SLOTBOOK__API__BASE_URL`.
pub const DEFAULT_PREFIX: &str = "SLOTBOOK";

/// Loads the application configuration.
///
/// Sources are layered, later ones winning:
/// 1. built-in defaults (see [`models`])
/// 2. `config/default.{toml,yaml,json}` (optional)
/// 3. `config/{RUN_ENV}.{toml,yaml,json}` (optional, `RUN_ENV` defaults to "debug")
/// 4. `SLOTBOOK__*` environment variables (prefix overridable through `PREFIX`)
///
/// Call this once at startup and pass the result down; nothing in the workspace
/// reads configuration from globals.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());
    let prefix = env::var("PREFIX").unwrap_or_else(|_| DEFAULT_PREFIX.to_string());

    load_config_from("config", &run_env, &prefix)
}

/// Loads configuration from an explicit directory, run environment and env-var prefix.
pub fn load_config_from(dir: &str, run_env: &str, prefix: &str) -> Result<AppConfig, ConfigError> {
    let default_path = format!("{dir}/default");
    let env_path = format!("{dir}/{run_env}");

    let builder = Config::builder()
        .add_source(File::with_name(&default_path).required(false))
        .add_source(File::with_name(&env_path).required(false))
        .add_source(
            Environment::with_prefix(prefix)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

    let config: AppConfig = builder.build()?.try_deserialize()?;
    debug!(
        "Loaded config: base_url={} timeout={}s time_zone={}",
        config.api.base_url, config.api.timeout_secs, config.display.time_zone
    );
    Ok(config)
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Ensures that the dotenv file is loaded into the environment variables.
///
/// The file defaults to `.env`; `DOTENV_OVERRIDE` points it elsewhere. Loading
/// happens at most once per process. Returns the path that was used.
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path = env::var("DOTENV_OVERRIDE").unwrap_or_else(|_| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });

    dotenv_path
}
