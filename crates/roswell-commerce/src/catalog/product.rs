//! Product types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::{Category, ProductPatch};
use crate::gateway::ProductRecord;
use crate::ids::ProductId;
use crate::money::Price;

/// A product in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product title.
    pub title: String,
    /// Full description.
    pub description: String,
    /// Unit price.
    pub price: Price,
    /// Catalog category (always a known one).
    pub category: Category,
    /// Offered sizes, in display order.
    pub sizes: Vec<String>,
    /// Offered colors, in display order.
    pub colors: Vec<String>,
    /// Image references; the first one is the cover.
    pub images: Vec<String>,
    /// Availability flag. There is no stock count.
    pub in_stock: bool,
    /// Whether the product shows up in the featured section.
    pub featured: bool,
    /// Creation time, used for the default newest-first order.
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Build a product from a stored record, normalizing its category.
    pub fn from_record(record: ProductRecord) -> Self {
        Self {
            id: record.id,
            title: record.title,
            description: record.description,
            price: record.price,
            category: Category::normalize(&record.category),
            sizes: unique_labels(record.sizes),
            colors: unique_labels(record.colors),
            images: record.images,
            in_stock: record.in_stock,
            featured: record.featured,
            created_at: record.created_at,
        }
    }

    /// The cover image, if any.
    pub fn cover_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Check if a size is offered.
    pub fn offers_size(&self, size: &str) -> bool {
        self.sizes.iter().any(|s| s == size)
    }

    /// Check if a color is offered.
    pub fn offers_color(&self, color: &str) -> bool {
        self.colors.iter().any(|c| c == color)
    }

    /// Check if the product can be put in a cart.
    pub fn is_sellable(&self) -> bool {
        self.in_stock && !self.sizes.is_empty() && !self.colors.is_empty()
    }

    /// Merge the provided fields of a patch. Category is re-normalized.
    pub fn apply_patch(&mut self, patch: &ProductPatch) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(category) = &patch.category {
            self.category = Category::normalize(category);
        }
        if let Some(sizes) = &patch.sizes {
            self.sizes = unique_labels(sizes.clone());
        }
        if let Some(colors) = &patch.colors {
            self.colors = unique_labels(colors.clone());
        }
        if let Some(images) = &patch.images {
            self.images = images.clone();
        }
        if let Some(in_stock) = patch.in_stock {
            self.in_stock = in_stock;
        }
        if let Some(featured) = patch.featured {
            self.featured = featured;
        }
    }
}

/// Drop repeated labels, keeping the first occurrence.
pub(crate) fn unique_labels(labels: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(labels.len());
    for label in labels {
        if !out.contains(&label) {
            out.push(label);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(category: &str) -> ProductRecord {
        ProductRecord {
            id: ProductId::new("1"),
            title: "Buzo Oversized Urbano".to_string(),
            description: "Buzo de algodón premium".to_string(),
            price: Price::from_units(89999),
            category: category.to_string(),
            sizes: vec!["S".into(), "M".into(), "M".into()],
            colors: vec!["Negro".into(), "Blanco".into()],
            images: vec!["/buzo.jpg".into(), "/buzo-back.jpg".into()],
            in_stock: true,
            featured: true,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[test]
    fn test_from_record_normalizes() {
        let product = Product::from_record(record("jackets"));
        assert_eq!(product.category, Category::Tshirts);
        assert_eq!(product.sizes, vec!["S", "M"]);
        assert_eq!(product.cover_image(), Some("/buzo.jpg"));
    }

    #[test]
    fn test_variant_membership() {
        let product = Product::from_record(record("hoodies"));
        assert!(product.offers_size("M"));
        assert!(!product.offers_size("XXL"));
        assert!(product.offers_color("Negro"));
        assert!(!product.offers_color("negro"));
        assert!(product.is_sellable());
    }

    #[test]
    fn test_apply_patch_only_touches_provided_fields() {
        let mut product = Product::from_record(record("hoodies"));
        let patch = ProductPatch {
            price: Some(Price::from_units(79999)),
            category: Some("boots".to_string()),
            featured: Some(false),
            ..Default::default()
        };
        product.apply_patch(&patch);

        assert_eq!(product.price, Price::from_units(79999));
        assert_eq!(product.category, Category::Tshirts);
        assert!(!product.featured);
        assert_eq!(product.title, "Buzo Oversized Urbano");
        assert_eq!(product.images.len(), 2);
    }
}
