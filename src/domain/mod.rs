//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (validation errors, state machines)
//! - `checkout` - Order signing, redirect form and callback verification

pub mod checkout;
pub mod foundation;
