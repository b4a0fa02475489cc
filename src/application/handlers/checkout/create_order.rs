//! CreateOrderHandler - Command handler for issuing signed checkout orders.

use std::sync::Arc;

use crate::domain::checkout::{
    CheckMacValue, CheckoutError, CorrelationKey, CustomField, OrderBuilder, OrderRequest,
    SignedOrder, TradeNo,
};
use crate::ports::{Clock, CorrelationStore, TradeNoGenerator};

/// Command to create an order and its redirect form.
#[derive(Debug, Clone)]
pub struct CreateOrderCommand {
    pub request: OrderRequest,
}

/// Result of successful order creation.
#[derive(Debug, Clone)]
pub struct CreateOrderResult {
    pub trade_no: TradeNo,
    pub check_mac_value: CheckMacValue,
    pub correlation_key: CorrelationKey,
    /// Auto-submitting HTML form posting to the gateway.
    pub html: String,
    pub order: SignedOrder,
}

/// Handler for creating signed orders.
///
/// Every order must carry a correlation key in the configured custom
/// field; its checksum is recorded as pending under that key.
pub struct CreateOrderHandler {
    builder: OrderBuilder,
    correlation_field: CustomField,
    store: Arc<dyn CorrelationStore>,
    clock: Arc<dyn Clock>,
    trade_nos: Arc<dyn TradeNoGenerator>,
}

impl CreateOrderHandler {
    pub fn new(
        builder: OrderBuilder,
        correlation_field: CustomField,
        store: Arc<dyn CorrelationStore>,
        clock: Arc<dyn Clock>,
        trade_nos: Arc<dyn TradeNoGenerator>,
    ) -> Self {
        Self {
            builder,
            correlation_field,
            store,
            clock,
            trade_nos,
        }
    }

    pub async fn handle(&self, cmd: CreateOrderCommand) -> Result<CreateOrderResult, CheckoutError> {
        // 1. Correlation key must be present before anything is signed
        let field = self.correlation_field.field_name();
        let correlation_key = cmd
            .request
            .options
            .custom_field(self.correlation_field)
            .ok_or_else(|| CheckoutError::invalid_input(field, "is required"))
            .and_then(|value| {
                CorrelationKey::new(value)
                    .map_err(|_| CheckoutError::invalid_input(field, "must not be blank"))
            })?;

        // 2. Build and sign
        let order = self
            .builder
            .build(cmd.request, self.clock.now(), || self.trade_nos.generate())?;

        // 3. Record the issued checksum
        self.store
            .put(&correlation_key, &order.check_mac_value)
            .await
            .map_err(|e| CheckoutError::StoreUnavailable(e.to_string()))?;

        tracing::info!(
            trade_no = %order.order.merchant_trade_no,
            correlation_key = %correlation_key,
            amount = order.order.total_amount,
            "Created checkout order"
        );

        Ok(CreateOrderResult {
            trade_no: order.order.merchant_trade_no.clone(),
            check_mac_value: order.check_mac_value.clone(),
            correlation_key,
            html: order.render_form(),
            order,
        })
    }
}
