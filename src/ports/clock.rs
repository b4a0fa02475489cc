//! Clock port - Source of the merchant-local trade date.

use chrono::NaiveDateTime;

/// Port for reading the current wall-clock time.
///
/// `MerchantTradeDate` is local time without an offset, so the port
/// returns a naive timestamp.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}
