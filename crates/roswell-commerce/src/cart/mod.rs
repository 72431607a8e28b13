//! Shopping cart module.
//!
//! Contains the cart, its lines, and variant changes.

mod cart;

pub use cart::{Cart, CartLine, LineKey, VariantChange};
