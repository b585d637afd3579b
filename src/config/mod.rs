//! Application configuration module
//!
//! Configuration is layered with the `config` crate, later sources winning:
//!
//! 1. `config/default.{toml,yaml,json}` (optional)
//! 2. `config/<APP_ENV>.{toml,yaml,json}` (optional, `APP_ENV` defaults to `development`)
//! 3. Environment variables prefixed `LESSON_HUB`, nested with `__`
//! 4. `PORT`, as set by most container platforms
//!
//! A `.env` file is loaded first with `dotenvy` when present.
//!
//! # Example
//!
//! ```no_run
//! use lesson_hub::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod auth;
mod database;
mod error;
mod payment;
mod server;

pub use auth::AuthConfig;
pub use database::{CollectionNames, DatabaseConfig};
pub use error::{ConfigError, ValidationError};
pub use payment::PaymentConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;
use std::path::Path;

use crate::adapters::http::RouterSettings;

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// MongoDB connection and collection names
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Firebase token verification
    #[serde(default)]
    pub auth: AuthConfig,

    /// Stripe checkout
    #[serde(default)]
    pub payment: PaymentConfig,
}

impl AppConfig {
    /// Load configuration from `./config` and the environment
    ///
    /// # Environment Variable Format
    ///
    /// - `LESSON_HUB__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `LESSON_HUB__DATABASE__URI=...` -> `database.uri = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new("config"))
    }

    /// Same as [`AppConfig::load`] with the config file directory given.
    pub fn load_from(dir: &Path) -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::from(dir.join("default")).required(false))
            .add_source(config::File::from(dir.join(&app_env)).required(false))
            .add_source(
                config::Environment::with_prefix("LESSON_HUB")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("server.port", std::env::var("PORT").ok())?
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate every section, reporting all problems at once
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` listing each failed section check.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let errors: Vec<ValidationError> = [
            self.server.validate(),
            self.database.validate(),
            self.auth.validate(&self.server.environment),
            self.payment.validate(),
        ]
        .into_iter()
        .filter_map(Result::err)
        .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid(errors))
        }
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }

    pub fn router_settings(&self) -> RouterSettings {
        RouterSettings {
            cors_origins: self.server.cors_origins.as_slice().to_vec(),
            request_timeout: self.server.request_timeout(),
        }
    }
}
