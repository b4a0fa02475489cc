//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `ECPAY_CHECKOUT` prefix and nested values are separated by `__`.
//!
//! # Example
//!
//! ```no_run
//! use ecpay_checkout::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! println!("listening on {:?}", config.server.socket_addr());
//! ```

mod error;
mod payment;
mod server;
mod store;

pub use error::{ConfigError, ValidationError};
pub use payment::PaymentConfig;
pub use server::{Environment, ServerConfig};
pub use store::{StoreBackend, StoreConfig};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment, logging)
    #[serde(default)]
    pub server: ServerConfig,

    /// Merchant credentials and gateway mode
    pub payment: PaymentConfig,

    /// Correlation store backend
    #[serde(default)]
    pub store: StoreConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `ECPAY_CHECKOUT` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    /// 5. Validates the result
    ///
    /// # Environment Variable Format
    ///
    /// - `ECPAY_CHECKOUT__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `ECPAY_CHECKOUT__PAYMENT__MERCHANT_ID=...` -> `payment.merchant_id = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Load` if values cannot be parsed into expected
    /// types or the payment section is absent, and `ConfigError::Invalid`
    /// if a loaded value fails [`AppConfig::validate`].
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config: Self = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("ECPAY_CHECKOUT")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.payment.validate(&self.server.environment)?;
        self.store.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::checkout::{CustomField, GatewayMode};
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn set_minimal_env() {
        env::set_var("ECPAY_CHECKOUT__PAYMENT__MERCHANT_ID", "3002607");
        env::set_var("ECPAY_CHECKOUT__PAYMENT__HASH_KEY", "pwFHCqoQZGmho4w6");
        env::set_var("ECPAY_CHECKOUT__PAYMENT__HASH_IV", "EkRm7iFT261dpevs");
    }

    fn clear_env() {
        for key in [
            "ECPAY_CHECKOUT__PAYMENT__MERCHANT_ID",
            "ECPAY_CHECKOUT__PAYMENT__HASH_KEY",
            "ECPAY_CHECKOUT__PAYMENT__HASH_IV",
            "ECPAY_CHECKOUT__PAYMENT__MODE",
            "ECPAY_CHECKOUT__PAYMENT__CORRELATION_FIELD",
            "ECPAY_CHECKOUT__SERVER__PORT",
            "ECPAY_CHECKOUT__SERVER__ENVIRONMENT",
            "ECPAY_CHECKOUT__SERVER__LOG_FORMAT",
            "ECPAY_CHECKOUT__STORE__BACKEND",
            "ECPAY_CHECKOUT__STORE__REDIS_URL",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.payment.merchant_id, "3002607");
        assert_eq!(config.payment.mode, GatewayMode::Test);
        assert_eq!(config.payment.correlation_field, CustomField::One);
        assert_eq!(config.store.backend, StoreBackend::Memory);
    }

    #[test]
    fn test_missing_credentials_fail_to_load() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("ECPAY_CHECKOUT__PAYMENT__HASH_KEY", "");
        let result = AppConfig::load();
        clear_env();

        assert!(matches!(
            result,
            Err(ConfigError::Invalid(ValidationError::MissingRequired("PAYMENT__HASH_KEY")))
        ));
    }

    #[test]
    fn test_server_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.environment, Environment::Development);
    }

    #[test]
    fn test_gateway_and_store_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("ECPAY_CHECKOUT__PAYMENT__MODE", "live");
        env::set_var("ECPAY_CHECKOUT__PAYMENT__CORRELATION_FIELD", "CustomField3");
        env::set_var("ECPAY_CHECKOUT__STORE__BACKEND", "redis");
        env::set_var("ECPAY_CHECKOUT__STORE__REDIS_URL", "redis://localhost:6379");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.payment.mode, GatewayMode::Live);
        assert_eq!(config.payment.correlation_field, CustomField::Three);
        assert_eq!(config.store.backend, StoreBackend::Redis);
        assert_eq!(config.store.redis_url.as_deref(), Some("redis://localhost:6379"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_production_with_test_mode_is_rejected() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("ECPAY_CHECKOUT__SERVER__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        assert!(matches!(
            result,
            Err(ConfigError::Invalid(ValidationError::TestModeInProduction))
        ));
    }

    #[test]
    fn test_custom_server_port() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("ECPAY_CHECKOUT__SERVER__PORT", "3000");
        let result = AppConfig::load();
        clear_env();

        assert_eq!(result.unwrap().server.port, 3000);
    }
}
