//! Checkout error types.
//!
//! Every variant is a per-request outcome; none is fatal to the process
//! and nothing is retried locally.

use axum::http::StatusCode;
use thiserror::Error;

use crate::domain::foundation::ValidationError;

/// Why a payment callback was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Checksum disagrees with the payload or with the recorded expectation.
    SignatureMismatch,
    /// Correlation key was never recorded or is already settled.
    UnknownCorrelation,
}

impl RejectReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectReason::SignatureMismatch => "signature_mismatch",
            RejectReason::UnknownCorrelation => "unknown_correlation",
        }
    }
}

/// Errors raised while creating orders or verifying callbacks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    /// A required order field is missing or malformed.
    #[error("Invalid input for {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    /// The callback references a correlation key with no pending entry.
    #[error("Unknown correlation key: {0}")]
    UnknownCorrelation(String),

    /// A recomputed checksum does not match.
    #[error("Signature mismatch: {0}")]
    SignatureMismatch(String),

    /// The correlation store could not be reached.
    #[error("Correlation store unavailable: {0}")]
    StoreUnavailable(String),
}

impl CheckoutError {
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        CheckoutError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn signature_mismatch(reason: impl Into<String>) -> Self {
        CheckoutError::SignatureMismatch(reason.into())
    }

    /// Callback rejection reason, if this error is a verification outcome.
    pub fn reject_reason(&self) -> Option<RejectReason> {
        match self {
            CheckoutError::SignatureMismatch(_) => Some(RejectReason::SignatureMismatch),
            CheckoutError::UnknownCorrelation(_) => Some(RejectReason::UnknownCorrelation),
            CheckoutError::InvalidInput { .. } | CheckoutError::StoreUnavailable(_) => None,
        }
    }

    /// Maps the error to the HTTP status the collaborator should send.
    pub fn status_code(&self) -> StatusCode {
        match self {
            CheckoutError::InvalidInput { .. }
            | CheckoutError::UnknownCorrelation(_)
            | CheckoutError::SignatureMismatch(_) => StatusCode::BAD_REQUEST,
            CheckoutError::StoreUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable code for JSON error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            CheckoutError::InvalidInput { .. } => "INVALID_INPUT",
            CheckoutError::UnknownCorrelation(_) => "UNKNOWN_CORRELATION",
            CheckoutError::SignatureMismatch(_) => "SIGNATURE_MISMATCH",
            CheckoutError::StoreUnavailable(_) => "STORE_UNAVAILABLE",
        }
    }
}

impl From<ValidationError> for CheckoutError {
    fn from(err: ValidationError) -> Self {
        CheckoutError::invalid_input(err.field().to_string(), err.to_string())
    }
}
