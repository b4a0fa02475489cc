//! Correlation between an issued order and its eventual callback.

use std::fmt;

use crate::domain::foundation::{StateMachine, ValidationError};

/// Application-chosen key linking an order to its callback.
///
/// Carried in a designated custom field and echoed back by the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CorrelationKey(String);

impl CorrelationKey {
    /// Creates a key, rejecting blank values.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::empty_field("correlation_key"));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CorrelationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle of a correlation entry.
///
/// `Unset` is represented by the absence of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorrelationState {
    /// Order issued, awaiting its callback.
    Pending,
    /// Callback verified and accepted.
    Resolved,
    /// Callback failed verification against the recorded checksum.
    Rejected,
}

impl StateMachine for CorrelationState {
    fn can_transition_to(&self, target: &Self) -> bool {
        use CorrelationState::*;
        matches!((self, target), (Pending, Resolved) | (Pending, Rejected))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use CorrelationState::*;
        match self {
            Pending => vec![Resolved, Rejected],
            Resolved | Rejected => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_key_is_rejected() {
        assert!(CorrelationKey::new("").is_err());
        assert!(CorrelationKey::new("   ").is_err());
        assert_eq!(CorrelationKey::new("order-7").unwrap().as_str(), "order-7");
    }

    #[test]
    fn pending_settles_to_either_terminal_state() {
        let pending = CorrelationState::Pending;
        assert_eq!(
            pending.transition_to(CorrelationState::Resolved),
            Ok(CorrelationState::Resolved)
        );
        assert_eq!(
            pending.transition_to(CorrelationState::Rejected),
            Ok(CorrelationState::Rejected)
        );
    }

    #[test]
    fn settled_states_are_terminal() {
        assert!(CorrelationState::Resolved.is_terminal());
        assert!(CorrelationState::Rejected.is_terminal());
        assert!(CorrelationState::Resolved
            .transition_to(CorrelationState::Pending)
            .is_err());
    }
}
