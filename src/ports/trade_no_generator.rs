//! TradeNoGenerator port - Source of fresh merchant trade numbers.

use crate::domain::checkout::TradeNo;

/// Port for generating unique-per-order trade numbers.
///
/// Implementations return `TRADE_NO_LENGTH` alphanumeric characters.
/// Collisions are not defended against.
pub trait TradeNoGenerator: Send + Sync {
    fn generate(&self) -> TradeNo;
}
