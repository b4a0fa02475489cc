//! Axum router configuration for checkout endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{create_order_redirect, health, payment_callback, CheckoutAppState};

/// Create the checkout router.
///
/// # Routes
/// - `GET /ecpay_redirect` - Signed order as an auto-submitting form
/// - `POST /ecpay_callback` - Gateway payment-result callback
/// - `GET /health` - Liveness probe
pub fn checkout_routes() -> Router<CheckoutAppState> {
    Router::new()
        .route("/ecpay_redirect", get(create_order_redirect))
        .route("/ecpay_callback", post(payment_callback))
        .route("/health", get(health))
}

/// Create the checkout router with its state attached.
///
/// # Example
///
/// ```ignore
/// let app = checkout_router(state).layer(TraceLayer::new_for_http());
/// axum::serve(listener, app).await?;
/// ```
pub fn checkout_router(state: CheckoutAppState) -> Router {
    checkout_routes().with_state(state)
}
