//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Checkout Ports
//!
//! - `CorrelationStore` - Pending checksums keyed by correlation key
//! - `Clock` - Merchant-local wall clock for `MerchantTradeDate`
//! - `TradeNoGenerator` - Fresh 20-character trade numbers

mod clock;
mod correlation_store;
mod trade_no_generator;

pub use clock::Clock;
pub use correlation_store::{CorrelationStore, StoreError};
pub use trade_no_generator::TradeNoGenerator;
