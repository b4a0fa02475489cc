//! AIO checkout order: typed request, validated order and signed result.
//!
//! [`OrderRequest`] is what callers supply. [`OrderBuilder::build`] validates
//! it into an [`AioOrder`], flattens that into [`WireFields`] (every optional
//! field present, empty when absent) and signs it.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::Deserialize;

use super::check_mac::{CheckMacSigner, CheckMacValue, CHECK_MAC_FIELD};
use super::errors::CheckoutError;
use super::fields::WireFields;
use super::form::render_auto_submit_form;
use super::gateway::GatewayMode;
use super::trade_no::TradeNo;

/// Wire format of `MerchantTradeDate`.
pub const TRADE_DATE_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Constant `PaymentType` for AIO checkout.
pub const PAYMENT_TYPE_AIO: &str = "aio";

/// Constant `EncryptType` selecting SHA-256 checksums.
pub const ENCRYPT_TYPE_SHA256: u64 = 1;

// ════════════════════════════════════════════════════════════════════════════════
// Enumerated fields
// ════════════════════════════════════════════════════════════════════════════════

/// Default payment method offered on the gateway page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChoosePayment {
    #[default]
    All,
    Twqr,
    Credit,
    WebAtm,
    Atm,
    Cvs,
    Barcode,
    ApplePay,
}

impl ChoosePayment {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChoosePayment::All => "ALL",
            ChoosePayment::Twqr => "TWQR",
            ChoosePayment::Credit => "Credit",
            ChoosePayment::WebAtm => "WebATM",
            ChoosePayment::Atm => "ATM",
            ChoosePayment::Cvs => "CVS",
            ChoosePayment::Barcode => "BARCODE",
            ChoosePayment::ApplePay => "ApplePay",
        }
    }
}

impl FromStr for ChoosePayment {
    type Err = CheckoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ALL" => Ok(ChoosePayment::All),
            "TWQR" => Ok(ChoosePayment::Twqr),
            "Credit" => Ok(ChoosePayment::Credit),
            "WebATM" => Ok(ChoosePayment::WebAtm),
            "ATM" => Ok(ChoosePayment::Atm),
            "CVS" => Ok(ChoosePayment::Cvs),
            "BARCODE" => Ok(ChoosePayment::Barcode),
            "ApplePay" => Ok(ChoosePayment::ApplePay),
            other => Err(CheckoutError::invalid_input(
                "ChoosePayment",
                format!("unsupported payment method '{}'", other),
            )),
        }
    }
}

impl fmt::Display for ChoosePayment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Gateway page language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Eng,
    Kor,
    Jpn,
    Chi,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Eng => "ENG",
            Language::Kor => "KOR",
            Language::Jpn => "JPN",
            Language::Chi => "CHI",
        }
    }
}

impl FromStr for Language {
    type Err = CheckoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ENG" => Ok(Language::Eng),
            "KOR" => Ok(Language::Kor),
            "JPN" => Ok(Language::Jpn),
            "CHI" => Ok(Language::Chi),
            other => Err(CheckoutError::invalid_input(
                "Language",
                format!("unsupported language '{}'", other),
            )),
        }
    }
}

/// Whether the callback should carry extra payment details.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NeedExtraPaidInfo {
    Yes,
    #[default]
    No,
}

impl NeedExtraPaidInfo {
    pub fn as_str(&self) -> &'static str {
        match self {
            NeedExtraPaidInfo::Yes => "Y",
            NeedExtraPaidInfo::No => "N",
        }
    }
}

impl FromStr for NeedExtraPaidInfo {
    type Err = CheckoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Y" => Ok(NeedExtraPaidInfo::Yes),
            "N" => Ok(NeedExtraPaidInfo::No),
            other => Err(CheckoutError::invalid_input(
                "NeedExtraPaidInfo",
                format!("expected Y or N, got '{}'", other),
            )),
        }
    }
}

/// One of the four merchant-defined fields echoed back by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum CustomField {
    #[default]
    #[serde(rename = "CustomField1")]
    One,
    #[serde(rename = "CustomField2")]
    Two,
    #[serde(rename = "CustomField3")]
    Three,
    #[serde(rename = "CustomField4")]
    Four,
}

impl CustomField {
    pub fn field_name(&self) -> &'static str {
        match self {
            CustomField::One => "CustomField1",
            CustomField::Two => "CustomField2",
            CustomField::Three => "CustomField3",
            CustomField::Four => "CustomField4",
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Caller input
// ════════════════════════════════════════════════════════════════════════════════

/// Optional order fields. Absent values are sent as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderOptions {
    pub store_id: Option<String>,
    pub client_back_url: Option<String>,
    pub item_url: Option<String>,
    pub remark: Option<String>,
    pub choose_sub_payment: Option<String>,
    pub order_result_url: Option<String>,
    pub need_extra_paid_info: NeedExtraPaidInfo,
    pub ignore_payment: Option<String>,
    pub platform_id: Option<String>,
    pub custom_field_1: Option<String>,
    pub custom_field_2: Option<String>,
    pub custom_field_3: Option<String>,
    pub custom_field_4: Option<String>,
    pub language: Option<Language>,
}

impl OrderOptions {
    pub fn custom_field(&self, field: CustomField) -> Option<&str> {
        match field {
            CustomField::One => self.custom_field_1.as_deref(),
            CustomField::Two => self.custom_field_2.as_deref(),
            CustomField::Three => self.custom_field_3.as_deref(),
            CustomField::Four => self.custom_field_4.as_deref(),
        }
    }

    pub fn set_custom_field(&mut self, field: CustomField, value: impl Into<String>) {
        let slot = match field {
            CustomField::One => &mut self.custom_field_1,
            CustomField::Two => &mut self.custom_field_2,
            CustomField::Three => &mut self.custom_field_3,
            CustomField::Four => &mut self.custom_field_4,
        };
        *slot = Some(value.into());
    }
}

/// Create-order input as supplied by the embedding application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRequest {
    /// Raw amount; must parse as a positive integer.
    pub total_amount: String,
    pub trade_desc: String,
    pub item_name: String,
    pub return_url: String,
    pub choose_payment: ChoosePayment,
    /// Generated when absent; used verbatim when present.
    pub merchant_trade_no: Option<TradeNo>,
    pub options: OrderOptions,
}

impl OrderRequest {
    pub fn new(
        total_amount: impl Into<String>,
        trade_desc: impl Into<String>,
        item_name: impl Into<String>,
        return_url: impl Into<String>,
    ) -> Self {
        Self {
            total_amount: total_amount.into(),
            trade_desc: trade_desc.into(),
            item_name: item_name.into(),
            return_url: return_url.into(),
            choose_payment: ChoosePayment::default(),
            merchant_trade_no: None,
            options: OrderOptions::default(),
        }
    }

    pub fn with_choose_payment(mut self, choose_payment: ChoosePayment) -> Self {
        self.choose_payment = choose_payment;
        self
    }

    pub fn with_trade_no(mut self, trade_no: TradeNo) -> Self {
        self.merchant_trade_no = Some(trade_no);
        self
    }

    pub fn with_custom_field(mut self, field: CustomField, value: impl Into<String>) -> Self {
        self.options.set_custom_field(field, value);
        self
    }

    pub fn with_options(mut self, options: OrderOptions) -> Self {
        self.options = options;
        self
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Validated order
// ════════════════════════════════════════════════════════════════════════════════

/// A validated AIO order, ready to flatten into wire fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AioOrder {
    pub merchant_id: String,
    pub merchant_trade_no: TradeNo,
    pub merchant_trade_date: NaiveDateTime,
    pub total_amount: u64,
    pub trade_desc: String,
    pub item_name: String,
    pub return_url: String,
    pub choose_payment: ChoosePayment,
    pub options: OrderOptions,
}

impl AioOrder {
    /// Flattens the order into the gateway's field set, in wire order.
    pub fn to_fields(&self) -> WireFields {
        let opt = |v: &Option<String>| v.clone().unwrap_or_default();
        let o = &self.options;

        let mut fields = WireFields::new();
        fields.insert("MerchantID", self.merchant_id.as_str());
        fields.insert("MerchantTradeNo", self.merchant_trade_no.as_str());
        fields.insert(
            "MerchantTradeDate",
            self.merchant_trade_date.format(TRADE_DATE_FORMAT).to_string(),
        );
        fields.insert("PaymentType", PAYMENT_TYPE_AIO);
        fields.insert("TotalAmount", self.total_amount);
        fields.insert("TradeDesc", self.trade_desc.as_str());
        fields.insert("ItemName", self.item_name.as_str());
        fields.insert("ReturnURL", self.return_url.as_str());
        fields.insert("ChoosePayment", self.choose_payment.as_str());
        fields.insert("EncryptType", ENCRYPT_TYPE_SHA256);
        fields.insert("StoreID", opt(&o.store_id));
        fields.insert("ClientBackURL", opt(&o.client_back_url));
        fields.insert("ItemURL", opt(&o.item_url));
        fields.insert("Remark", opt(&o.remark));
        fields.insert("ChooseSubPayment", opt(&o.choose_sub_payment));
        fields.insert("OrderResultURL", opt(&o.order_result_url));
        fields.insert("NeedExtraPaidInfo", o.need_extra_paid_info.as_str());
        fields.insert("IgnorePayment", opt(&o.ignore_payment));
        fields.insert("PlatformID", opt(&o.platform_id));
        fields.insert("CustomField1", opt(&o.custom_field_1));
        fields.insert("CustomField2", opt(&o.custom_field_2));
        fields.insert("CustomField3", opt(&o.custom_field_3));
        fields.insert("CustomField4", opt(&o.custom_field_4));
        fields.insert(
            "Language",
            o.language.map(|l| l.as_str()).unwrap_or_default(),
        );
        fields
    }
}

/// An order with its checksum attached, targeted at a gateway endpoint.
#[derive(Debug, Clone)]
pub struct SignedOrder {
    pub order: AioOrder,
    pub check_mac_value: CheckMacValue,
    /// Order fields plus `CheckMacValue`, in wire order.
    pub fields: WireFields,
    pub action_url: &'static str,
}

impl SignedOrder {
    /// Renders the auto-submitting redirect form.
    pub fn render_form(&self) -> String {
        render_auto_submit_form(&self.fields, self.action_url)
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Builder
// ════════════════════════════════════════════════════════════════════════════════

/// Assembles and signs AIO orders for one merchant.
#[derive(Debug, Clone)]
pub struct OrderBuilder {
    merchant_id: String,
    signer: CheckMacSigner,
    mode: GatewayMode,
}

impl OrderBuilder {
    pub fn new(merchant_id: impl Into<String>, signer: CheckMacSigner, mode: GatewayMode) -> Self {
        Self {
            merchant_id: merchant_id.into(),
            signer,
            mode,
        }
    }

    pub fn mode(&self) -> GatewayMode {
        self.mode
    }

    pub fn signer(&self) -> &CheckMacSigner {
        &self.signer
    }

    /// Validates, flattens and signs an order.
    ///
    /// `generate_trade_no` is only invoked when the request carries no
    /// trade number of its own.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if a required text field is blank or the amount is
    /// not a positive integer.
    pub fn build(
        &self,
        request: OrderRequest,
        trade_date: NaiveDateTime,
        generate_trade_no: impl FnOnce() -> TradeNo,
    ) -> Result<SignedOrder, CheckoutError> {
        let total_amount = parse_amount(&request.total_amount)?;
        require_text("TradeDesc", &request.trade_desc)?;
        require_text("ItemName", &request.item_name)?;
        require_text("ReturnURL", &request.return_url)?;

        let order = AioOrder {
            merchant_id: self.merchant_id.clone(),
            merchant_trade_no: request.merchant_trade_no.unwrap_or_else(generate_trade_no),
            merchant_trade_date: trade_date,
            total_amount,
            trade_desc: request.trade_desc,
            item_name: request.item_name,
            return_url: request.return_url,
            choose_payment: request.choose_payment,
            options: request.options,
        };

        let mut fields = order.to_fields();
        let check_mac_value = self.signer.sign(&fields);
        fields.insert(CHECK_MAC_FIELD, check_mac_value.as_str());

        Ok(SignedOrder {
            order,
            check_mac_value,
            fields,
            action_url: self.mode.aio_checkout_url(),
        })
    }
}

fn parse_amount(raw: &str) -> Result<u64, CheckoutError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CheckoutError::invalid_input("TotalAmount", "is required"));
    }
    match trimmed.parse::<u64>() {
        Ok(0) => Err(CheckoutError::invalid_input(
            "TotalAmount",
            "must be greater than zero",
        )),
        Ok(amount) => Ok(amount),
        Err(_) => Err(CheckoutError::invalid_input(
            "TotalAmount",
            format!("'{}' is not an integer amount", raw),
        )),
    }
}

fn require_text(field: &'static str, value: &str) -> Result<(), CheckoutError> {
    if value.trim().is_empty() {
        Err(CheckoutError::invalid_input(field, "is required"))
    } else {
        Ok(())
    }
}
