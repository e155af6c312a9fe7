//! Configuration management for the approval coordinator server.
//!
//! Configuration is loaded from the embedded base configuration file and then overridden by
//! environment variables prefixed with `APPROVALS_`.

use core::num::NonZeroUsize;

use config::{ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

/// Loads the application configuration from base config and environment variables.
///
/// Environment variables use double underscores `__` to denote nested keys.
/// For example, `APPROVALS_APP__LISTEN` corresponds to `app.listen`.
///
/// # Errors
///
/// If the configuration could not be loaded or parsed
pub fn get_configuration() -> Result<Config, ConfigError> {
    config::Config::builder()
        .add_source(File::from_str(include_str!("base_config.ron"), FileFormat::Ron))
        .add_source(
            Environment::with_prefix(Config::CONFIG_ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("app.cors_allowed_origins")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()
}

/// Root configuration structure containing all application settings.
#[derive(Deserialize)]
pub struct Config {
    /// Application-specific configuration
    pub app: AppConfig,

    /// Database configuration
    pub db: DbConfig,

    /// Blockchain configuration
    pub chain: ChainConfig,
}

/// Application-specific configuration settings.
#[derive(Deserialize)]
pub struct AppConfig {
    /// The address to listen on (e.g., "0.0.0.0:59060")
    pub listen: String,

    /// CORS allowed origins (e.g., ["http://localhost:3000", "https://example.com"])
    /// Use ["*"] to allow all origins
    pub cors_allowed_origins: Vec<String>,
}

/// Database configuration settings.
#[derive(Deserialize)]
pub struct DbConfig {
    /// The database connection URL
    pub db_url: String,

    /// Maximum number of database connections in the pool
    pub max_conn: NonZeroUsize,
}

/// Blockchain configuration settings.
#[derive(Deserialize)]
pub struct ChainConfig {
    /// The network label recorded on every blockchain proof (e.g., "sepolia")
    pub network: String,
}

impl Config {
    const CONFIG_ENV_PREFIX: &str = "APPROVALS";
}
