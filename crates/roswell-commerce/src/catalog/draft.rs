//! Admin-side product drafts and partial updates.
//!
//! Both are validated before anything reaches the gateway; a rejected draft
//! reports every offending field at once.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::product::unique_labels;
use crate::catalog::{Category, Product};
use crate::error::{CommerceError, ValidationErrors};
use crate::ids::ProductId;
use crate::money::Price;

/// Maximum number of images per product.
pub const MAX_IMAGES: usize = 5;

/// A product about to be created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    /// Explicit id; assigned on insert when absent.
    #[serde(default)]
    pub id: Option<ProductId>,
    pub title: String,
    pub description: String,
    pub price: Price,
    /// Raw category value, normalized on insert.
    pub category: String,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default = "default_true")]
    pub in_stock: bool,
    #[serde(default)]
    pub featured: bool,
    /// Explicit creation time; now when absent.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

fn default_true() -> bool {
    true
}

impl ProductDraft {
    /// Start a draft with the required text fields.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        price: Price,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            title: title.into(),
            description: description.into(),
            price,
            category: category.into(),
            sizes: Vec::new(),
            colors: Vec::new(),
            images: Vec::new(),
            in_stock: true,
            featured: false,
            created_at: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<ProductId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_sizes<S: Into<String>>(mut self, sizes: impl IntoIterator<Item = S>) -> Self {
        self.sizes = sizes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_colors<S: Into<String>>(mut self, colors: impl IntoIterator<Item = S>) -> Self {
        self.colors = colors.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_images<S: Into<String>>(mut self, images: impl IntoIterator<Item = S>) -> Self {
        self.images = images.into_iter().map(Into::into).collect();
        self
    }

    pub fn featured(mut self, featured: bool) -> Self {
        self.featured = featured;
        self
    }

    pub fn in_stock(mut self, in_stock: bool) -> Self {
        self.in_stock = in_stock;
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Check every required field.
    pub fn validate(&self) -> Result<(), CommerceError> {
        let mut errors = ValidationErrors::new();

        if self.title.trim().is_empty() {
            errors.push("title", "title is required");
        }
        if self.description.trim().is_empty() {
            errors.push("description", "description is required");
        }
        if !self.price.is_positive() {
            errors.push("price", "price must be greater than 0");
        }
        if self.category.trim().is_empty() {
            errors.push("category", "a category must be selected");
        }
        check_images(&self.images, &mut errors);
        if self.sizes.is_empty() {
            errors.push("sizes", "at least one size is required");
        }
        if self.colors.is_empty() {
            errors.push("colors", "at least one color is required");
        }

        errors.into_result()
    }

    /// Turn the draft into a product, filling the id and creation time.
    pub fn into_product(self) -> Product {
        Product {
            id: self.id.unwrap_or_else(ProductId::generate),
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            price: self.price,
            category: Category::normalize(&self.category),
            sizes: unique_labels(self.sizes),
            colors: unique_labels(self.colors),
            images: self.images,
            in_stock: self.in_stock,
            featured: self.featured,
            created_at: self.created_at.unwrap_or_else(Utc::now),
        }
    }
}

/// A partial update. Only `Some` fields change.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Price>,
    /// Raw category value, re-normalized when applied.
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
}

impl ProductPatch {
    /// Check if the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self == &ProductPatch::default()
    }

    /// Check the provided fields. Absent fields are not validated.
    pub fn validate(&self) -> Result<(), CommerceError> {
        let mut errors = ValidationErrors::new();

        if matches!(&self.title, Some(t) if t.trim().is_empty()) {
            errors.push("title", "title cannot be empty");
        }
        if matches!(&self.description, Some(d) if d.trim().is_empty()) {
            errors.push("description", "description cannot be empty");
        }
        if matches!(&self.price, Some(p) if !p.is_positive()) {
            errors.push("price", "price must be greater than 0");
        }
        if matches!(&self.category, Some(c) if c.trim().is_empty()) {
            errors.push("category", "category cannot be empty");
        }
        if let Some(images) = &self.images {
            check_images(images, &mut errors);
        }
        if matches!(&self.sizes, Some(s) if s.is_empty()) {
            errors.push("sizes", "at least one size is required");
        }
        if matches!(&self.colors, Some(c) if c.is_empty()) {
            errors.push("colors", "at least one color is required");
        }

        errors.into_result()
    }
}

fn check_images(images: &[String], errors: &mut ValidationErrors) {
    if images.is_empty() {
        errors.push("images", "at least one image is required");
    } else if images.len() > MAX_IMAGES {
        errors.push("images", format!("at most {} images are allowed", MAX_IMAGES));
    }
}
