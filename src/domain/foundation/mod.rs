//! Foundation module - Shared domain primitives.
//!
//! Contains the validation error type and the state machine trait used
//! by checkout value objects and correlation lifecycles.

mod errors;
mod state_machine;

pub use errors::ValidationError;
pub use state_machine::StateMachine;
