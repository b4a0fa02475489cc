//! Configuration error types

use thiserror::Error;

/// Raised by [`AppConfig::load`](super::AppConfig::load).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid configuration: {0}")]
    Invalid(#[from] ValidationError),
}

/// A loaded value that cannot be used to start the server.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("ECPAY_CHECKOUT__{0} is required")]
    MissingRequired(&'static str),

    #[error("cannot bind to {0}")]
    InvalidBindAddress(String),

    #[error("port must be non-zero")]
    InvalidPort,

    #[error("request timeout of {0}s is outside 1..=300")]
    InvalidTimeout(u64),

    #[error("redis URL must use the redis:// or rediss:// scheme")]
    InvalidRedisUrl,

    #[error("gateway test mode is not allowed in production")]
    TestModeInProduction,
}
