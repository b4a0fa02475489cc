//! HandlePaymentCallbackHandler - Command handler for gateway payment results.
//!
//! Verification order:
//! 1. The gateway's checksum must match a fresh signature of the payload.
//!    Failing here never touches the store.
//! 2. The correlation key must have a pending entry.
//! 3. The recomputed checksum must equal the pending one.
//!
//! The entry is settled (and evicted) on 3, so a replay of the same
//! callback is rejected as an unknown correlation.

use std::sync::Arc;

use crate::domain::checkout::{
    CallbackVerdict, CallbackVerifier, CheckoutError, CorrelationState, RejectReason, WireFields,
};
use crate::ports::{CorrelationStore, StoreError};

/// Command carrying the callback's form fields as received.
#[derive(Debug, Clone)]
pub struct HandlePaymentCallbackCommand {
    pub fields: WireFields,
}

/// Handler for verifying payment-result callbacks.
pub struct HandlePaymentCallbackHandler {
    verifier: CallbackVerifier,
    store: Arc<dyn CorrelationStore>,
}

impl HandlePaymentCallbackHandler {
    pub fn new(verifier: CallbackVerifier, store: Arc<dyn CorrelationStore>) -> Self {
        Self { verifier, store }
    }

    /// Verifies the callback and settles its correlation entry.
    ///
    /// Protocol failures come back as `CallbackVerdict::Reject`; only a
    /// store failure is an `Err`.
    pub async fn handle(
        &self,
        cmd: HandlePaymentCallbackCommand,
    ) -> Result<CallbackVerdict, CheckoutError> {
        let callback = match self.verifier.authenticate(cmd.fields) {
            Ok(callback) => callback,
            Err(err) => return Ok(reject(&err)),
        };
        let key = &callback.correlation_key;

        let Some(expected) = self.store.get(key).await.map_err(store_unavailable)? else {
            let err = CheckoutError::UnknownCorrelation(key.to_string());
            return Ok(reject(&err));
        };

        if let Err(err) = self.verifier.confirm(&callback, &expected) {
            self.store
                .settle(key, &expected, CorrelationState::Rejected)
                .await
                .map_err(store_unavailable)?;
            return Ok(reject(&err));
        }

        let settled = self
            .store
            .settle(key, &expected, CorrelationState::Resolved)
            .await
            .map_err(store_unavailable)?;
        if !settled {
            // Another callback for this key settled it first.
            let err = CheckoutError::UnknownCorrelation(key.to_string());
            return Ok(reject(&err));
        }

        tracing::info!(
            correlation_key = %key,
            trade_no = callback.result.merchant_trade_no.as_deref().unwrap_or(""),
            rtn_code = ?callback.result.rtn_code,
            paid = callback.result.is_paid(),
            "Accepted payment callback"
        );

        Ok(CallbackVerdict::Accept(callback.result))
    }
}

fn reject(err: &CheckoutError) -> CallbackVerdict {
    let reason = err.reject_reason().unwrap_or(RejectReason::SignatureMismatch);
    match reason {
        RejectReason::SignatureMismatch => {
            tracing::warn!(reason = reason.as_str(), "Rejected payment callback: {}", err);
        }
        RejectReason::UnknownCorrelation => {
            tracing::info!(reason = reason.as_str(), "Rejected payment callback: {}", err);
        }
    }
    CallbackVerdict::Reject(reason)
}

fn store_unavailable(err: StoreError) -> CheckoutError {
    tracing::error!("Correlation store failed during callback: {}", err);
    CheckoutError::StoreUnavailable(err.to_string())
}
