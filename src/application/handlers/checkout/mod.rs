//! Checkout handlers.
//!
//! ## Commands
//! - Creating a signed order and its redirect form
//! - Verifying a gateway payment-result callback

mod create_order;
mod handle_payment_callback;

pub use create_order::{CreateOrderCommand, CreateOrderHandler, CreateOrderResult};
pub use handle_payment_callback::{HandlePaymentCallbackCommand, HandlePaymentCallbackHandler};
