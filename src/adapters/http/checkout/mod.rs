//! HTTP adapter for checkout endpoints.
//!
//! - `GET /ecpay_redirect` - Create an order and redirect the payer to the gateway
//! - `POST /ecpay_callback` - Verify the gateway's payment-result callback
//! - `GET /health` - Liveness probe

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::{CreateOrderQuery, ErrorResponse};
pub use handlers::{CheckoutApiError, CheckoutAppState};
pub use routes::{checkout_router, checkout_routes};
