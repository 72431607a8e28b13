//! Cart and line types.

use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Price;

/// Identity of a cart line: product, size and color.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineKey {
    pub product_id: ProductId,
    pub size: String,
    pub color: String,
}

impl LineKey {
    pub fn new(
        product_id: impl Into<ProductId>,
        size: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            size: size.into(),
            color: color.into(),
        }
    }

    fn matches(&self, product_id: &ProductId, size: &str, color: &str) -> bool {
        &self.product_id == product_id && self.size == size && self.color == color
    }
}

/// A product in the cart with its chosen variant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    /// Product as it was when the line was added.
    pub product: Product,
    /// Chosen size.
    pub size: String,
    /// Chosen color.
    pub color: String,
    /// Quantity (always at least 1).
    pub quantity: i64,
}

impl CartLine {
    /// The identity triple of this line.
    pub fn key(&self) -> LineKey {
        LineKey::new(self.product.id.clone(), self.size.clone(), self.color.clone())
    }

    /// Snapshot price times quantity.
    pub fn line_total(&self) -> Result<Price, CommerceError> {
        self.product
            .price
            .checked_mul(self.quantity)
            .ok_or(CommerceError::Overflow)
    }

    fn is(&self, product_id: &ProductId, size: &str, color: &str) -> bool {
        &self.product.id == product_id && self.size == size && self.color == color
    }
}

/// Replacement variant for an existing line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariantChange {
    Size(String),
    Color(String),
}

/// A shopping cart.
///
/// Lines keep insertion order. There is at most one line per
/// (product, size, color); adding the same triple again increments it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "SavedCart")]
pub struct Cart {
    lines: Vec<CartLine>,
}

/// Cart as found in a saved file, before its lines are checked.
#[derive(Deserialize)]
struct SavedCart {
    #[serde(default)]
    lines: Vec<CartLine>,
}

impl TryFrom<SavedCart> for Cart {
    type Error = CommerceError;

    /// Lines without a positive quantity are dropped and repeated variants
    /// are merged.
    fn try_from(saved: SavedCart) -> Result<Self, Self::Error> {
        let mut cart = Cart::new();
        for line in saved.lines.into_iter().filter(|l| l.quantity > 0) {
            cart.merge_line(line.product, line.size, line.color, line.quantity)?;
        }
        Ok(cart)
    }
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a product variant to the cart.
    ///
    /// Returns an error if:
    /// - Quantity is not positive
    /// - The product does not offer the size or color
    /// - Merging would overflow the quantity
    pub fn add_line(
        &mut self,
        product: Product,
        size: impl Into<String>,
        color: impl Into<String>,
        quantity: i64,
    ) -> Result<(), CommerceError> {
        let size = size.into();
        let color = color.into();

        if quantity <= 0 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }
        if !product.offers_size(&size) || !product.offers_color(&color) {
            return Err(CommerceError::InvalidVariant {
                product_id: product.id.to_string(),
                size,
                color,
            });
        }

        self.merge_line(product, size, color, quantity)
    }

    /// Set a line's quantity.
    ///
    /// A quantity of zero or less removes the line. Unknown lines are left
    /// alone.
    pub fn update_quantity(
        &mut self,
        product_id: &ProductId,
        size: &str,
        color: &str,
        quantity: i64,
    ) {
        if quantity <= 0 {
            self.remove_line(product_id, size, color);
            return;
        }

        if let Some(line) = self.lines.iter_mut().find(|l| l.is(product_id, size, color)) {
            line.quantity = quantity;
        }
    }

    /// Remove a line. Returns whether one was removed.
    pub fn remove_line(&mut self, product_id: &ProductId, size: &str, color: &str) -> bool {
        let len_before = self.lines.len();
        self.lines.retain(|l| !l.is(product_id, size, color));
        self.lines.len() < len_before
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Move a line to another size or color, keeping its quantity.
    ///
    /// If a line already exists for the new variant the quantities are
    /// merged. The new variant must be offered by the line's product; it is
    /// checked before the old line is touched. Unknown lines are left alone.
    pub fn change_line_variant(
        &mut self,
        product_id: &ProductId,
        old_size: &str,
        old_color: &str,
        change: VariantChange,
    ) -> Result<(), CommerceError> {
        let Some(index) = self
            .lines
            .iter()
            .position(|l| l.is(product_id, old_size, old_color))
        else {
            return Ok(());
        };

        let (size, color) = match change {
            VariantChange::Size(size) => (size, old_color.to_string()),
            VariantChange::Color(color) => (old_size.to_string(), color),
        };

        let product = &self.lines[index].product;
        if !product.offers_size(&size) || !product.offers_color(&color) {
            return Err(CommerceError::InvalidVariant {
                product_id: product_id.to_string(),
                size,
                color,
            });
        }

        let key = LineKey::new(product_id.clone(), size.clone(), color.clone());
        if let Some(existing) = self.lines.iter().find(|l| key.matches(&l.product.id, &l.size, &l.color)) {
            if existing.quantity.checked_add(self.lines[index].quantity).is_none() {
                return Err(CommerceError::Overflow);
            }
        }

        let old = self.lines.remove(index);
        self.merge_line(old.product, size, color, old.quantity)
    }

    /// Sum of quantities across lines.
    pub fn total_item_count(&self) -> Result<i64, CommerceError> {
        self.lines.iter().try_fold(0i64, |count, line| {
            count
                .checked_add(line.quantity)
                .ok_or(CommerceError::Overflow)
        })
    }

    /// Sum of snapshot price times quantity.
    pub fn total_price(&self) -> Result<Price, CommerceError> {
        self.lines.iter().try_fold(Price::zero(), |total, line| {
            total
                .checked_add(&line.line_total()?)
                .ok_or(CommerceError::Overflow)
        })
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Find a line by its identity.
    pub fn get_line(&self, key: &LineKey) -> Option<&CartLine> {
        self.lines
            .iter()
            .find(|l| key.matches(&l.product.id, &l.size, &l.color))
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    fn merge_line(
        &mut self,
        product: Product,
        size: String,
        color: String,
        quantity: i64,
    ) -> Result<(), CommerceError> {
        if let Some(existing) = self
            .lines
            .iter_mut()
            .find(|l| l.is(&product.id, &size, &color))
        {
            existing.quantity = existing
                .quantity
                .checked_add(quantity)
                .ok_or(CommerceError::Overflow)?;
            return Ok(());
        }

        self.lines.push(CartLine {
            product,
            size,
            color,
            quantity,
        });
        Ok(())
    }
}
