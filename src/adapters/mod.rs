//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `correlation` - Correlation store implementations (in-memory, Redis)
//! - `system` - Wall clock and trade-number generators
//! - `http` - Axum endpoints

pub mod correlation;
pub mod http;
pub mod system;

pub use correlation::{InMemoryCorrelationStore, RedisCorrelationStore};
pub use system::{FixedClock, RandomTradeNoGenerator, SeededTradeNoGenerator, SystemClock};
