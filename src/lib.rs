//! ECPay Checkout - Hosted-payment gateway client
//!
//! This crate signs AIO checkout orders with the gateway's CheckMacValue
//! scheme, renders the auto-submitting redirect form, and verifies the
//! asynchronous payment-result callback against the checksum issued for
//! each order.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod logging;
pub mod ports;
