//! Merchant trade number.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Length of generated trade numbers.
pub const TRADE_NO_LENGTH: usize = 20;

/// Opaque per-order token submitted as `MerchantTradeNo` and echoed back
/// by the gateway.
///
/// Caller-supplied values pass through verbatim; only generated values
/// are guaranteed to be [`TRADE_NO_LENGTH`] alphanumeric characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TradeNo(String);

impl TradeNo {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for TradeNo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for TradeNo {
    fn from(value: String) -> Self {
        Self(value)
    }
}
