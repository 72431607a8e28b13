//! Product categories.
//!
//! The category list has changed across storefront versions (coats came and
//! went, shirts and shorts were added), so stored data can carry values that
//! are no longer known. Those are never rejected: they normalize to
//! [`Category::DEFAULT`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// A catalog category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Category {
    Hoodies,
    Tshirts,
    Pants,
    Coats,
    Shirts,
    Shorts,
    Accessories,
    Shoes,
}

impl Category {
    /// Category assigned to unknown values.
    pub const DEFAULT: Category = Category::Tshirts;

    /// Every known category, in storefront menu order.
    pub const ALL: [Category; 8] = [
        Category::Hoodies,
        Category::Tshirts,
        Category::Pants,
        Category::Coats,
        Category::Shirts,
        Category::Shorts,
        Category::Accessories,
        Category::Shoes,
    ];

    /// Stored value (e.g., "hoodies").
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Hoodies => "hoodies",
            Category::Tshirts => "tshirts",
            Category::Pants => "pants",
            Category::Coats => "coats",
            Category::Shirts => "shirts",
            Category::Shorts => "shorts",
            Category::Accessories => "accessories",
            Category::Shoes => "shoes",
        }
    }

    /// Parse an exact stored value. Case-sensitive.
    pub fn from_value(s: &str) -> Option<Self> {
        Category::ALL.into_iter().find(|c| c.as_str() == s)
    }

    /// Map any stored value onto a known category.
    pub fn normalize(s: &str) -> Self {
        Self::from_value(s).unwrap_or(Self::DEFAULT)
    }

    /// Whether a raw stored value is a known category.
    pub fn is_known(s: &str) -> bool {
        Self::from_value(s).is_some()
    }

    /// Label shown on the storefront.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Hoodies => "Buzos",
            Category::Tshirts => "Remeras",
            Category::Pants => "Pantalones",
            Category::Coats => "Abrigos",
            Category::Shirts => "Camisas",
            Category::Shorts => "Shorts",
            Category::Accessories => "Accesorios",
            Category::Shoes => "Calzado",
        }
    }

    /// Storefront route segment (e.g., "/buzos").
    pub fn slug(&self) -> &'static str {
        match self {
            Category::Hoodies => "buzos",
            Category::Tshirts => "remeras",
            Category::Pants => "pantalones",
            Category::Coats => "abrigos",
            Category::Shirts => "camisas",
            Category::Shorts => "shorts",
            Category::Accessories => "accesorios",
            Category::Shoes => "calzado",
        }
    }

    /// Look up a category by its route segment.
    pub fn from_slug(slug: &str) -> Option<Self> {
        Category::ALL.into_iter().find(|c| c.slug() == slug)
    }
}

impl Default for Category {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<String> for Category {
    fn from(s: String) -> Self {
        Category::normalize(&s)
    }
}

impl From<&str> for Category {
    fn from(s: &str) -> Self {
        Category::normalize(s)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
