//! In-memory correlation store.
//!
//! Entries live for the lifetime of the process. Settled entries are
//! evicted, so the map holds only orders still awaiting a callback.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::checkout::{CheckMacValue, CorrelationKey, CorrelationState};
use crate::domain::foundation::StateMachine;
use crate::ports::{CorrelationStore, StoreError};

/// Correlation store backed by a single lock over a `HashMap`.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCorrelationStore {
    pending: Arc<RwLock<HashMap<CorrelationKey, CheckMacValue>>>,
}

impl InMemoryCorrelationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries still awaiting a callback.
    pub async fn pending_count(&self) -> usize {
        self.pending.read().await.len()
    }
}

#[async_trait]
impl CorrelationStore for InMemoryCorrelationStore {
    async fn put(&self, key: &CorrelationKey, expected: &CheckMacValue) -> Result<(), StoreError> {
        self.pending
            .write()
            .await
            .insert(key.clone(), expected.clone());
        Ok(())
    }

    async fn get(&self, key: &CorrelationKey) -> Result<Option<CheckMacValue>, StoreError> {
        Ok(self.pending.read().await.get(key).cloned())
    }

    async fn settle(
        &self,
        key: &CorrelationKey,
        expected: &CheckMacValue,
        outcome: CorrelationState,
    ) -> Result<bool, StoreError> {
        if !CorrelationState::Pending.can_transition_to(&outcome) {
            return Ok(false);
        }

        let mut pending = self.pending.write().await;
        match pending.get(key) {
            Some(current) if current.matches(expected) => {
                pending.remove(key);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
