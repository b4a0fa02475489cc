//! Data Transfer Objects for checkout endpoints.
//!
//! Query and form parameters use the gateway's own field names.

use serde::{Deserialize, Serialize};

use crate::domain::checkout::{
    CheckoutError, ChoosePayment, Language, NeedExtraPaidInfo, OrderOptions, OrderRequest, TradeNo,
};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Query parameters for `GET /ecpay_redirect`.
///
/// Missing required values deserialize as empty strings and are rejected
/// by the order builder.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreateOrderQuery {
    #[serde(rename = "TotalAmount")]
    pub total_amount: String,
    #[serde(rename = "TradeDesc")]
    pub trade_desc: String,
    #[serde(rename = "ItemName")]
    pub item_name: String,
    #[serde(rename = "ReturnURL")]
    pub return_url: String,
    #[serde(rename = "ChoosePayment")]
    pub choose_payment: Option<String>,
    #[serde(rename = "MerchantTradeNo")]
    pub merchant_trade_no: Option<String>,
    #[serde(rename = "StoreID")]
    pub store_id: Option<String>,
    #[serde(rename = "ClientBackURL")]
    pub client_back_url: Option<String>,
    #[serde(rename = "ItemURL")]
    pub item_url: Option<String>,
    #[serde(rename = "Remark")]
    pub remark: Option<String>,
    #[serde(rename = "ChooseSubPayment")]
    pub choose_sub_payment: Option<String>,
    #[serde(rename = "OrderResultURL")]
    pub order_result_url: Option<String>,
    #[serde(rename = "NeedExtraPaidInfo")]
    pub need_extra_paid_info: Option<String>,
    #[serde(rename = "IgnorePayment")]
    pub ignore_payment: Option<String>,
    #[serde(rename = "PlatformID")]
    pub platform_id: Option<String>,
    #[serde(rename = "CustomField1")]
    pub custom_field_1: Option<String>,
    #[serde(rename = "CustomField2")]
    pub custom_field_2: Option<String>,
    #[serde(rename = "CustomField3")]
    pub custom_field_3: Option<String>,
    #[serde(rename = "CustomField4")]
    pub custom_field_4: Option<String>,
    #[serde(rename = "Language")]
    pub language: Option<String>,
}

/// Treats empty query values as absent.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl TryFrom<CreateOrderQuery> for OrderRequest {
    type Error = CheckoutError;

    fn try_from(q: CreateOrderQuery) -> Result<Self, Self::Error> {
        let choose_payment = match present(q.choose_payment) {
            Some(raw) => raw.parse::<ChoosePayment>()?,
            None => ChoosePayment::default(),
        };
        let need_extra_paid_info = match present(q.need_extra_paid_info) {
            Some(raw) => raw.parse::<NeedExtraPaidInfo>()?,
            None => NeedExtraPaidInfo::default(),
        };
        let language = present(q.language)
            .map(|raw| raw.parse::<Language>())
            .transpose()?;

        let options = OrderOptions {
            store_id: q.store_id,
            client_back_url: q.client_back_url,
            item_url: q.item_url,
            remark: q.remark,
            choose_sub_payment: q.choose_sub_payment,
            order_result_url: q.order_result_url,
            need_extra_paid_info,
            ignore_payment: q.ignore_payment,
            platform_id: q.platform_id,
            custom_field_1: q.custom_field_1,
            custom_field_2: q.custom_field_2,
            custom_field_3: q.custom_field_3,
            custom_field_4: q.custom_field_4,
            language,
        };

        let mut request = OrderRequest::new(q.total_amount, q.trade_desc, q.item_name, q.return_url)
            .with_choose_payment(choose_payment)
            .with_options(options);
        if let Some(trade_no) = present(q.merchant_trade_no) {
            request = request.with_trade_no(TradeNo::new(trade_no));
        }
        Ok(request)
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Standard error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl From<&CheckoutError> for ErrorResponse {
    fn from(err: &CheckoutError) -> Self {
        Self::new(err.code(), err.to_string())
    }
}
