//! Wire shapes of the hosted `products` table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::{Product, ProductPatch};
use crate::ids::ProductId;
use crate::money::Price;

/// A stored product row.
///
/// `category` stays a raw string here: rows written by older storefront
/// versions may carry values that are no longer known.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductRecord {
    pub id: ProductId,
    pub title: String,
    pub description: String,
    pub price: Price,
    pub category: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub sizes: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub colors: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub images: Vec<String>,
    #[serde(default)]
    pub in_stock: bool,
    #[serde(default)]
    pub featured: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Insert shape. Missing id and timestamps are filled by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewProductRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ProductId>,
    pub title: String,
    pub description: String,
    pub price: Price,
    pub category: String,
    pub sizes: Vec<String>,
    pub colors: Vec<String>,
    pub images: Vec<String>,
    pub in_stock: bool,
    pub featured: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl NewProductRecord {
    /// Complete the insert with backend-assigned values.
    pub fn into_record(self, id: ProductId, now: DateTime<Utc>) -> ProductRecord {
        ProductRecord {
            id: self.id.unwrap_or(id),
            title: self.title,
            description: self.description,
            price: self.price,
            category: self.category,
            sizes: self.sizes,
            colors: self.colors,
            images: self.images,
            in_stock: self.in_stock,
            featured: self.featured,
            created_at: self.created_at.unwrap_or(now),
            updated_at: Some(now),
        }
    }
}

impl From<&Product> for NewProductRecord {
    fn from(product: &Product) -> Self {
        Self {
            id: None,
            title: product.title.clone(),
            description: product.description.clone(),
            price: product.price,
            category: product.category.as_str().to_string(),
            sizes: product.sizes.clone(),
            colors: product.colors.clone(),
            images: product.images.clone(),
            in_stock: product.in_stock,
            featured: product.featured,
            created_at: Some(product.created_at),
        }
    }
}

/// Update shape. Absent fields are left out of the request body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProductRecordPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Price>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sizes: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_stock: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    pub updated_at: DateTime<Utc>,
}

impl ProductRecordPatch {
    /// Build the remote patch for a validated product patch.
    ///
    /// The category is sent normalized so the table never stores a value the
    /// storefront would not recognize.
    pub fn from_patch(patch: &ProductPatch, now: DateTime<Utc>) -> Self {
        Self {
            title: patch.title.clone(),
            description: patch.description.clone(),
            price: patch.price,
            category: patch
                .category
                .as_deref()
                .map(|c| crate::catalog::Category::normalize(c).as_str().to_string()),
            sizes: patch.sizes.clone(),
            colors: patch.colors.clone(),
            images: patch.images.clone(),
            in_stock: patch.in_stock,
            featured: patch.featured,
            updated_at: now,
        }
    }

    /// Apply the patch to a stored row.
    pub fn apply_to(&self, record: &mut ProductRecord) {
        if let Some(title) = &self.title {
            record.title = title.clone();
        }
        if let Some(description) = &self.description {
            record.description = description.clone();
        }
        if let Some(price) = self.price {
            record.price = price;
        }
        if let Some(category) = &self.category {
            record.category = category.clone();
        }
        if let Some(sizes) = &self.sizes {
            record.sizes = sizes.clone();
        }
        if let Some(colors) = &self.colors {
            record.colors = colors.clone();
        }
        if let Some(images) = &self.images {
            record.images = images.clone();
        }
        if let Some(in_stock) = self.in_stock {
            record.in_stock = in_stock;
        }
        if let Some(featured) = self.featured {
            record.featured = featured;
        }
        record.updated_at = Some(self.updated_at);
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}
