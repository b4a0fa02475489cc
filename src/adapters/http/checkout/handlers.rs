//! HTTP handlers for checkout endpoints.
//!
//! These handlers connect Axum routes to application layer command handlers.

use std::sync::Arc;

use axum::extract::rejection::{FormRejection, QueryRejection};
use axum::extract::{Form, Json, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use crate::application::handlers::checkout::{
    CreateOrderCommand, CreateOrderHandler, HandlePaymentCallbackCommand,
    HandlePaymentCallbackHandler,
};
use crate::domain::checkout::{
    CallbackVerifier, CheckoutError, CustomField, OrderBuilder, OrderRequest, WireFields, ACK_ERROR,
};
use crate::ports::{Clock, CorrelationStore, TradeNoGenerator};

use super::dto::{CreateOrderQuery, ErrorResponse};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies.
///
/// Cloned per request; handlers are created on demand from it.
#[derive(Clone)]
pub struct CheckoutAppState {
    pub order_builder: OrderBuilder,
    pub verifier: CallbackVerifier,
    pub correlation_store: Arc<dyn CorrelationStore>,
    pub clock: Arc<dyn Clock>,
    pub trade_no_generator: Arc<dyn TradeNoGenerator>,
}

impl CheckoutAppState {
    pub fn correlation_field(&self) -> CustomField {
        self.verifier.correlation_field()
    }

    pub fn create_order_handler(&self) -> CreateOrderHandler {
        CreateOrderHandler::new(
            self.order_builder.clone(),
            self.correlation_field(),
            self.correlation_store.clone(),
            self.clock.clone(),
            self.trade_no_generator.clone(),
        )
    }

    pub fn payment_callback_handler(&self) -> HandlePaymentCallbackHandler {
        HandlePaymentCallbackHandler::new(self.verifier.clone(), self.correlation_store.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// GET /ecpay_redirect - Build a signed order and return its auto-submit form
pub async fn create_order_redirect(
    State(state): State<CheckoutAppState>,
    query: Result<Query<CreateOrderQuery>, QueryRejection>,
) -> Result<Html<String>, CheckoutApiError> {
    let Query(query) = query
        .map_err(|rejection| CheckoutError::invalid_input("query", rejection.body_text()))?;
    let request = OrderRequest::try_from(query)?;
    let result = state
        .create_order_handler()
        .handle(CreateOrderCommand { request })
        .await?;

    Ok(Html(result.html))
}

/// POST /ecpay_callback - Verify a gateway payment-result callback
///
/// Always answers with the gateway's plain-text acknowledgement, including
/// for bodies that are not form-encoded.
pub async fn payment_callback(
    State(state): State<CheckoutAppState>,
    form: Result<Form<Vec<(String, String)>>, FormRejection>,
) -> Response {
    let pairs = match form {
        Ok(Form(pairs)) => pairs,
        Err(rejection) => {
            tracing::warn!(
                status = %rejection.status(),
                "Unreadable payment callback body: {}",
                rejection.body_text()
            );
            return (StatusCode::BAD_REQUEST, ACK_ERROR).into_response();
        }
    };
    let fields: WireFields = pairs.into_iter().collect();
    let cmd = HandlePaymentCallbackCommand { fields };

    match state.payment_callback_handler().handle(cmd).await {
        Ok(verdict) => (verdict.status_code(), verdict.acknowledgement()).into_response(),
        Err(err) => (err.status_code(), ACK_ERROR).into_response(),
    }
}

/// GET /health - Liveness probe
pub async fn health() -> &'static str {
    "ok"
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts checkout errors to JSON responses.
#[derive(Debug)]
pub struct CheckoutApiError(CheckoutError);

impl From<CheckoutError> for CheckoutApiError {
    fn from(err: CheckoutError) -> Self {
        Self(err)
    }
}

impl IntoResponse for CheckoutApiError {
    fn into_response(self) -> Response {
        let status = self.0.status_code();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("Order creation failed: {}", self.0);
        } else {
            tracing::debug!("Order rejected: {}", self.0);
        }
        (status, Json(ErrorResponse::from(&self.0))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_input_becomes_bad_request() {
        let response =
            CheckoutApiError::from(CheckoutError::invalid_input("ItemName", "is required"))
                .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn store_failure_becomes_internal_error() {
        let response =
            CheckoutApiError::from(CheckoutError::StoreUnavailable("down".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn health_reports_ok() {
        assert_eq!(health().await, "ok");
    }
}
