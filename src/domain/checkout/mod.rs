//! Hosted-checkout domain module.
//!
//! Builds signed AIO orders for the gateway's hosted payment page and
//! verifies the payment-result callbacks that follow.
//!
//! # Module Structure
//!
//! - `fields` - Ordered wire field set
//! - `check_mac` - CheckMacValue signer
//! - `order` - Order request, builder and signed order
//! - `form` - Auto-submitting redirect form
//! - `correlation` - Correlation key and lifecycle state
//! - `callback` - Callback verifier and verdict

mod callback;
mod check_mac;
mod correlation;
mod errors;
mod fields;
mod form;
mod gateway;
mod order;
mod trade_no;

pub use callback::{
    AuthenticatedCallback, CallbackVerdict, CallbackVerifier, PaymentResult, ACK_ERROR, ACK_OK,
    RTN_CODE_PAID,
};
pub use check_mac::{CheckMacSigner, CheckMacValue, CHECK_MAC_FIELD};
pub use correlation::{CorrelationKey, CorrelationState};
pub use errors::{CheckoutError, RejectReason};
pub use fields::{FieldValue, WireFields};
pub use form::render_auto_submit_form;
pub use gateway::{GatewayMode, LIVE_AIO_CHECKOUT_URL, STAGE_AIO_CHECKOUT_URL};
pub use order::{
    AioOrder, ChoosePayment, CustomField, Language, NeedExtraPaidInfo, OrderBuilder,
    OrderOptions, OrderRequest, SignedOrder, ENCRYPT_TYPE_SHA256, PAYMENT_TYPE_AIO,
    TRADE_DATE_FORMAT,
};
pub use trade_no::{TradeNo, TRADE_NO_LENGTH};
