//! Correlation store adapters.
//!
//! Implementations of the CorrelationStore port for different backends.
//!
//! ## Available Adapters
//!
//! - `InMemoryCorrelationStore` - Process-local map for tests and single-server use
//! - `RedisCorrelationStore` - Redis-backed for multi-server deployments
//!
//! ## Usage
//!
//! ```ignore
//! use ecpay_checkout::adapters::correlation::{InMemoryCorrelationStore, RedisCorrelationStore};
//!
//! // For testing
//! let store = InMemoryCorrelationStore::new();
//!
//! // For production
//! let store = RedisCorrelationStore::new(conn, 86_400);
//! ```

mod in_memory;
mod redis;

pub use in_memory::InMemoryCorrelationStore;
pub use self::redis::RedisCorrelationStore;
