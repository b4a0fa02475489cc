//! Payment-result callback verification.
//!
//! A callback is accepted only if both checks hold:
//!
//! 1. The gateway's `CheckMacValue` is the checksum of the callback's own
//!    payload. This runs first and needs no correlation state.
//! 2. That checksum equals the one recorded for the callback's
//!    correlation key when the order was created.

use axum::http::StatusCode;

use super::check_mac::{CheckMacSigner, CheckMacValue, CHECK_MAC_FIELD};
use super::correlation::CorrelationKey;
use super::errors::{CheckoutError, RejectReason};
use super::fields::WireFields;
use super::order::CustomField;

/// Body the gateway expects when a callback is accepted.
pub const ACK_OK: &str = "1|OK";

/// Body the gateway expects when a callback is rejected.
pub const ACK_ERROR: &str = "0|Error";

/// `RtnCode` value signalling a successful payment.
pub const RTN_CODE_PAID: i64 = 1;

/// Payment-status fields parsed from an authenticated callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentResult {
    pub correlation_key: CorrelationKey,
    pub merchant_trade_no: Option<String>,
    pub rtn_code: Option<i64>,
    pub rtn_msg: Option<String>,
    /// Gateway-side trade number.
    pub trade_no: Option<String>,
    pub trade_amt: Option<u64>,
    pub payment_date: Option<String>,
    pub payment_type: Option<String>,
    pub simulate_paid: bool,
}

impl PaymentResult {
    fn from_fields(fields: &WireFields, correlation_key: CorrelationKey) -> Self {
        let text = |name: &str| fields.text(name).filter(|v| !v.is_empty());
        Self {
            correlation_key,
            merchant_trade_no: text("MerchantTradeNo"),
            rtn_code: text("RtnCode").and_then(|v| v.trim().parse().ok()),
            rtn_msg: text("RtnMsg"),
            trade_no: text("TradeNo"),
            trade_amt: text("TradeAmt").and_then(|v| v.trim().parse().ok()),
            payment_date: text("PaymentDate"),
            payment_type: text("PaymentType"),
            simulate_paid: text("SimulatePaid").as_deref() == Some("1"),
        }
    }

    /// True when the gateway reports the payment as completed.
    pub fn is_paid(&self) -> bool {
        self.rtn_code == Some(RTN_CODE_PAID)
    }
}

/// A callback whose checksum matched its own payload.
#[derive(Debug, Clone)]
pub struct AuthenticatedCallback {
    pub correlation_key: CorrelationKey,
    pub check_mac_value: CheckMacValue,
    pub result: PaymentResult,
}

/// Final outcome reported back to the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackVerdict {
    Accept(PaymentResult),
    Reject(RejectReason),
}

impl CallbackVerdict {
    /// Plain-text acknowledgement body, byte-for-byte as the gateway expects.
    pub fn acknowledgement(&self) -> &'static str {
        match self {
            CallbackVerdict::Accept(_) => ACK_OK,
            CallbackVerdict::Reject(_) => ACK_ERROR,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            CallbackVerdict::Accept(_) => StatusCode::OK,
            CallbackVerdict::Reject(_) => StatusCode::BAD_REQUEST,
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, CallbackVerdict::Accept(_))
    }
}

/// Checks callback checksums for one merchant.
#[derive(Debug, Clone)]
pub struct CallbackVerifier {
    signer: CheckMacSigner,
    correlation_field: CustomField,
}

impl CallbackVerifier {
    pub fn new(signer: CheckMacSigner, correlation_field: CustomField) -> Self {
        Self {
            signer,
            correlation_field,
        }
    }

    pub fn correlation_field(&self) -> CustomField {
        self.correlation_field
    }

    /// Strips `CheckMacValue`, re-signs the rest and compares.
    ///
    /// # Errors
    ///
    /// - `SignatureMismatch` if the checksum is absent or wrong
    /// - `UnknownCorrelation` if the correlation field is missing or blank
    pub fn authenticate(
        &self,
        mut received: WireFields,
    ) -> Result<AuthenticatedCallback, CheckoutError> {
        let claimed = received
            .remove(CHECK_MAC_FIELD)
            .map(|v| CheckMacValue::from_received(v.to_string()))
            .ok_or_else(|| CheckoutError::signature_mismatch("callback carries no CheckMacValue"))?;

        let recomputed = self.signer.sign(&received);
        if !recomputed.matches(&claimed) {
            return Err(CheckoutError::signature_mismatch(
                "CheckMacValue does not match callback payload",
            ));
        }

        let field = self.correlation_field.field_name();
        let correlation_key = received
            .text(field)
            .and_then(|v| CorrelationKey::new(v).ok())
            .ok_or_else(|| CheckoutError::UnknownCorrelation(format!("{} is missing", field)))?;

        let result = PaymentResult::from_fields(&received, correlation_key.clone());
        Ok(AuthenticatedCallback {
            correlation_key,
            check_mac_value: recomputed,
            result,
        })
    }

    /// Compares an authenticated callback against the recorded checksum.
    pub fn confirm(
        &self,
        callback: &AuthenticatedCallback,
        expected: &CheckMacValue,
    ) -> Result<(), CheckoutError> {
        if callback.check_mac_value.matches(expected) {
            Ok(())
        } else {
            Err(CheckoutError::signature_mismatch(format!(
                "CheckMacValue differs from the one issued for {}",
                callback.correlation_key
            )))
        }
    }

    /// Runs both checks with a synchronous lookup of the recorded checksum.
    pub fn verify<F>(&self, received: WireFields, expected_for: F) -> CallbackVerdict
    where
        F: FnOnce(&CorrelationKey) -> Option<CheckMacValue>,
    {
        let outcome = self.authenticate(received).and_then(|callback| {
            let expected = expected_for(&callback.correlation_key).ok_or_else(|| {
                CheckoutError::UnknownCorrelation(callback.correlation_key.to_string())
            })?;
            self.confirm(&callback, &expected)?;
            Ok(callback.result)
        });

        match outcome {
            Ok(result) => CallbackVerdict::Accept(result),
            Err(err) => CallbackVerdict::Reject(
                err.reject_reason()
                    .unwrap_or(RejectReason::SignatureMismatch),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signer() -> CheckMacSigner {
        CheckMacSigner::new("pwFHCqoQZGmho4w6", "EkRm7iFT261dpevs")
    }

    fn verifier() -> CallbackVerifier {
        CallbackVerifier::new(signer(), CustomField::One)
    }

    fn callback_fields() -> WireFields {
        [
            ("MerchantID", "3002607"),
            ("MerchantTradeNo", "aB3dE5gH7jK9mN1pQ3sT"),
            ("RtnCode", "1"),
            ("RtnMsg", "Succeeded"),
            ("TradeNo", "2403091234567890"),
            ("TradeAmt", "100"),
            ("PaymentDate", "2024/03/09 08:06:00"),
            ("PaymentType", "Credit_CreditCard"),
            ("SimulatePaid", "0"),
            ("CustomField1", "order-42"),
        ]
        .into_iter()
        .collect()
    }

    fn signed(mut fields: WireFields) -> (WireFields, CheckMacValue) {
        let mac = signer().sign(&fields);
        fields.insert(CHECK_MAC_FIELD, mac.as_str());
        (fields, mac)
    }

    // ══════════════════════════════════════════════════════════════
    // Authentication
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn authenticate_parses_payment_result() {
        let (fields, mac) = signed(callback_fields());

        let callback = verifier().authenticate(fields).unwrap();

        assert_eq!(callback.check_mac_value, mac);
        assert_eq!(callback.correlation_key.as_str(), "order-42");
        assert!(callback.result.is_paid());
        assert_eq!(callback.result.trade_amt, Some(100));
        assert_eq!(callback.result.merchant_trade_no.as_deref(), Some("aB3dE5gH7jK9mN1pQ3sT"));
        assert!(!callback.result.simulate_paid);
    }

    #[test]
    fn authenticate_rejects_missing_checksum() {
        let err = verifier().authenticate(callback_fields()).unwrap_err();
        assert_eq!(err.reject_reason(), Some(RejectReason::SignatureMismatch));
    }

    #[test]
    fn authenticate_rejects_tampered_value() {
        let (mut fields, _) = signed(callback_fields());
        fields.insert("TradeAmt", "1");

        let err = verifier().authenticate(fields).unwrap_err();
        assert_eq!(err.reject_reason(), Some(RejectReason::SignatureMismatch));
    }

    #[test]
    fn authenticate_rejects_tampered_correlation_key_as_signature_mismatch() {
        let (mut fields, _) = signed(callback_fields());
        fields.insert("CustomField1", "order-43");

        let err = verifier().authenticate(fields).unwrap_err();
        assert_eq!(err.reject_reason(), Some(RejectReason::SignatureMismatch));
    }

    #[test]
    fn authenticate_requires_correlation_field() {
        let mut fields = callback_fields();
        fields.remove("CustomField1");
        let (fields, _) = signed(fields);

        let err = verifier().authenticate(fields).unwrap_err();
        assert_eq!(err.reject_reason(), Some(RejectReason::UnknownCorrelation));
    }

    #[test]
    fn authenticate_uses_configured_correlation_field() {
        let mut fields = callback_fields();
        fields.insert("CustomField3", "cart-9");
        let (fields, _) = signed(fields);

        let callback = CallbackVerifier::new(signer(), CustomField::Three)
            .authenticate(fields)
            .unwrap();
        assert_eq!(callback.correlation_key.as_str(), "cart-9");
    }

    // ══════════════════════════════════════════════════════════════
    // Full verification
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn verify_accepts_when_both_checks_pass() {
        let (fields, mac) = signed(callback_fields());

        let verdict = verifier().verify(fields, |_| Some(mac.clone()));

        assert!(verdict.is_accepted());
        assert_eq!(verdict.acknowledgement(), "1|OK");
        assert_eq!(verdict.status_code(), StatusCode::OK);
    }

    #[test]
    fn verify_rejects_unknown_key() {
        let (fields, _) = signed(callback_fields());

        let verdict = verifier().verify(fields, |_| None);

        assert_eq!(verdict, CallbackVerdict::Reject(RejectReason::UnknownCorrelation));
        assert_eq!(verdict.acknowledgement(), "0|Error");
        assert_eq!(verdict.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn verify_rejects_resigned_payload_that_differs_from_recorded_checksum() {
        let (_, original) = signed(callback_fields());
        let mut altered = callback_fields();
        altered.insert("RtnCode", "10100058");
        let (altered, _) = signed(altered);

        let verdict = verifier().verify(altered, |_| Some(original.clone()));

        assert_eq!(verdict, CallbackVerdict::Reject(RejectReason::SignatureMismatch));
    }

    #[test]
    fn verify_skips_lookup_when_payload_is_tampered() {
        let (mut fields, _) = signed(callback_fields());
        fields.insert("RtnCode", "0");

        let verdict = verifier().verify(fields, |_| panic!("lookup must not run"));

        assert_eq!(verdict, CallbackVerdict::Reject(RejectReason::SignatureMismatch));
    }

    #[test]
    fn unpaid_result_is_still_accepted() {
        let mut fields = callback_fields();
        fields.insert("RtnCode", "10300066");
        let (fields, mac) = signed(fields);

        match verifier().verify(fields, |_| Some(mac.clone())) {
            CallbackVerdict::Accept(result) => assert!(!result.is_paid()),
            other => panic!("expected accept, got {:?}", other),
        }
    }
}
