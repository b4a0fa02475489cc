//! CorrelationStore port - Interface for pending-order checksums.
//!
//! Each created order records the checksum it was issued under, keyed by
//! its correlation key. The payment callback consults that record once
//! and settles it.
//!
//! ## Settlement
//!
//! `settle` is a compare-and-remove: it succeeds only if the entry is
//! still pending with the given checksum. A second callback for the same
//! key (a replay, or a concurrent duplicate) finds nothing to settle.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::checkout::{CheckMacValue, CorrelationKey, CorrelationState};

/// Errors raised by correlation store backends.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Backend could not be reached or returned an error
    #[error("Correlation store unavailable: {0}")]
    Unavailable(String),
}

/// Port for recording and settling pending correlation entries.
#[async_trait]
pub trait CorrelationStore: Send + Sync {
    /// Record the checksum issued for `key`.
    ///
    /// Overwrites any pending entry for the same key (last writer wins).
    async fn put(&self, key: &CorrelationKey, expected: &CheckMacValue) -> Result<(), StoreError>;

    /// Fetch the pending checksum for `key`, if any.
    async fn get(&self, key: &CorrelationKey) -> Result<Option<CheckMacValue>, StoreError>;

    /// Move a pending entry to a terminal state and evict it.
    ///
    /// Returns `false` if `key` is no longer pending with `expected`.
    async fn settle(
        &self,
        key: &CorrelationKey,
        expected: &CheckMacValue,
        outcome: CorrelationState,
    ) -> Result<bool, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_error_displays_cause() {
        let err = StoreError::Unavailable("connection refused".to_string());
        assert_eq!(
            err.to_string(),
            "Correlation store unavailable: connection refused"
        );
    }
}
