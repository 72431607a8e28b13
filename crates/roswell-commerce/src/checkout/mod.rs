//! Checkout module.
//!
//! Contains the order message builder and the messaging handoff.

mod message;

pub use message::{build_order_message, CheckoutHandoff, DEFAULT_DESTINATION};
