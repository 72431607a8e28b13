//! Order message for the messaging handoff.
//!
//! Checkout does not take payment: the cart is rendered into a plain-text
//! order message and handed to a WhatsApp chat with the store.

use serde::{Deserialize, Serialize};

use crate::cart::{Cart, CartLine};
use crate::error::CommerceError;

/// Store phone number the order chat opens with (digits only).
pub const DEFAULT_DESTINATION: &str = "543584388196";

const GREETING: &str = "¡Hola! 👋\n\nQuiero hacer un pedido de los siguientes productos:\n\n";
const CLOSING: &str =
    "¿Están disponibles estos productos? ¿Cómo puedo proceder con el pedido?\n\n¡Gracias! 🙏";

/// Render the order message for a list of cart lines.
///
/// The output depends only on the lines and their order. No escaping or
/// URL encoding is applied.
pub fn build_order_message(lines: &[CartLine]) -> String {
    let mut message = String::from(GREETING);

    for line in lines {
        message.push_str(&format!("🛍️ *{}*\n", line.product.title));
        message.push_str(&format!("   📏 Talle: {}\n", line.size));
        message.push_str(&format!("   🎨 Color: {}\n", line.color));
        message.push_str(&format!("   📦 Cantidad: {}\n\n", line.quantity));
    }

    message.push_str(CLOSING);
    message
}

/// A rendered order ready to hand to the messaging channel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckoutHandoff {
    /// Phone number of the store chat.
    pub destination: String,
    /// Plain-text order message.
    pub message: String,
}

impl CheckoutHandoff {
    /// Render a cart for a destination. Empty carts are rejected.
    pub fn from_cart(cart: &Cart, destination: impl Into<String>) -> Result<Self, CommerceError> {
        if cart.is_empty() {
            return Err(CommerceError::EmptyCart);
        }

        Ok(Self {
            destination: destination.into(),
            message: build_order_message(cart.lines()),
        })
    }

    /// Chat link with the message prefilled.
    pub fn whatsapp_url(&self) -> String {
        format!(
            "https://wa.me/{}?text={}",
            self.destination,
            urlencoding::encode(&self.message)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Category, Product};
    use crate::ids::ProductId;
    use crate::money::Price;
    use chrono::Utc;

    fn buzo() -> Product {
        Product {
            id: ProductId::new("1"),
            title: "Buzo X".to_string(),
            description: "Buzo".to_string(),
            price: Price::from_units(89999),
            category: Category::Hoodies,
            sizes: vec!["L".into()],
            colors: vec!["Negro".into()],
            images: vec![],
            in_stock: true,
            featured: false,
            created_at: Utc::now(),
        }
    }

    fn cart() -> Cart {
        let mut cart = Cart::new();
        cart.add_line(buzo(), "L", "Negro", 1).unwrap();
        cart
    }

    #[test]
    fn test_message_format() {
        let message = build_order_message(cart().lines());
        assert_eq!(
            message,
            "¡Hola! 👋\n\nQuiero hacer un pedido de los siguientes productos:\n\n\
             🛍️ *Buzo X*\n   📏 Talle: L\n   🎨 Color: Negro\n   📦 Cantidad: 1\n\n\
             ¿Están disponibles estos productos? ¿Cómo puedo proceder con el pedido?\n\n\
             ¡Gracias! 🙏"
        );
    }

    #[test]
    fn test_message_is_deterministic() {
        let cart = cart();
        assert_eq!(
            build_order_message(cart.lines()),
            build_order_message(cart.lines())
        );
    }

    #[test]
    fn test_item_block_fields_appear_once() {
        let message = build_order_message(cart().lines());
        let block = message
            .strip_prefix(GREETING)
            .and_then(|m| m.strip_suffix(CLOSING))
            .unwrap();

        assert_eq!(block.matches("Buzo X").count(), 1);
        assert_eq!(block.matches("Talle: L").count(), 1);
        assert_eq!(block.matches("Negro").count(), 1);
        assert_eq!(block.matches("Cantidad: 1").count(), 1);
    }

    #[test]
    fn test_lines_follow_cart_order() {
        let mut cart = cart();
        let mut remera = buzo();
        remera.id = ProductId::new("2");
        remera.title = "Remera Y".to_string();
        cart.add_line(remera, "L", "Negro", 2).unwrap();

        let message = build_order_message(cart.lines());
        let buzo_at = message.find("Buzo X").unwrap();
        let remera_at = message.find("Remera Y").unwrap();
        assert!(buzo_at < remera_at);
    }

    #[test]
    fn test_empty_cart_is_rejected() {
        let result = CheckoutHandoff::from_cart(&Cart::new(), DEFAULT_DESTINATION);
        assert!(matches!(result, Err(CommerceError::EmptyCart)));
    }

    #[test]
    fn test_whatsapp_url_encodes_message() {
        let handoff = CheckoutHandoff::from_cart(&cart(), DEFAULT_DESTINATION).unwrap();
        let url = handoff.whatsapp_url();

        assert!(url.starts_with("https://wa.me/543584388196?text=%C2%A1Hola"));
        assert!(!url.contains(' '));
        assert!(!url.contains('\n'));

        let encoded = url.split_once("?text=").unwrap().1;
        assert_eq!(urlencoding::decode(encoded).unwrap(), handoff.message);
    }
}
