//! System adapters - wall clock and random trade numbers.
//!
//! Each port has a production adapter and a deterministic one for tests.

mod clock;
mod trade_no;

pub use clock::{FixedClock, SystemClock};
pub use trade_no::{RandomTradeNoGenerator, SeededTradeNoGenerator};
