//! Payment gateway configuration

use serde::Deserialize;
use std::fmt;

use crate::domain::checkout::{
    CallbackVerifier, CheckMacSigner, CustomField, GatewayMode, OrderBuilder,
};

use super::error::ValidationError;
use super::server::Environment;

/// Merchant credentials and gateway settings
#[derive(Clone, Default, Deserialize)]
pub struct PaymentConfig {
    /// Merchant identifier issued by the gateway
    #[serde(default)]
    pub merchant_id: String,

    /// Signing key
    #[serde(default)]
    pub hash_key: String,

    /// Signing initialization value
    #[serde(default)]
    pub hash_iv: String,

    /// Stage or live gateway
    #[serde(default)]
    pub mode: GatewayMode,

    /// Custom field carrying the correlation key
    #[serde(default)]
    pub correlation_field: CustomField,
}

impl PaymentConfig {
    /// Build a signer from the configured secrets
    pub fn signer(&self) -> CheckMacSigner {
        CheckMacSigner::new(self.hash_key.clone(), self.hash_iv.clone())
    }

    pub fn order_builder(&self) -> OrderBuilder {
        OrderBuilder::new(self.merchant_id.clone(), self.signer(), self.mode)
    }

    pub fn callback_verifier(&self) -> CallbackVerifier {
        CallbackVerifier::new(self.signer(), self.correlation_field)
    }

    /// Validate payment configuration
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.merchant_id.trim().is_empty() {
            return Err(ValidationError::MissingRequired("PAYMENT__MERCHANT_ID"));
        }
        if self.hash_key.is_empty() {
            return Err(ValidationError::MissingRequired("PAYMENT__HASH_KEY"));
        }
        if self.hash_iv.is_empty() {
            return Err(ValidationError::MissingRequired("PAYMENT__HASH_IV"));
        }
        if *environment == Environment::Production && self.mode.is_test() {
            return Err(ValidationError::TestModeInProduction);
        }
        Ok(())
    }
}

impl fmt::Debug for PaymentConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaymentConfig")
            .field("merchant_id", &self.merchant_id)
            .field("hash_key", &"[REDACTED]")
            .field("hash_iv", &"[REDACTED]")
            .field("mode", &self.mode)
            .field("correlation_field", &self.correlation_field)
            .finish()
    }
}
