//! Product filters and queries.

use serde::{Deserialize, Serialize};

use crate::catalog::{Category, Product};
use crate::search::results::{paginate, Page, DEFAULT_PER_PAGE};

/// A product filter.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "type", content = "value")]
pub enum Filter {
    /// Only products in a category.
    Category(Category),
    /// Only featured products.
    Featured,
    /// Only products marked in stock.
    InStock,
}

impl Filter {
    /// Check whether a product passes this filter.
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Filter::Category(category) => product.category == *category,
            Filter::Featured => product.featured,
            Filter::InStock => product.in_stock,
        }
    }
}

/// Filters plus a page request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductQuery {
    /// All filters must match.
    #[serde(default)]
    pub filters: Vec<Filter>,
    /// Requested page (1-indexed, clamped).
    #[serde(default = "first_page")]
    pub page: usize,
    /// Items per page.
    #[serde(default = "default_per_page")]
    pub per_page: usize,
}

fn first_page() -> usize {
    1
}

fn default_per_page() -> usize {
    DEFAULT_PER_PAGE
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductQuery {
    /// First page, default page size, no filters.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }

    /// Add a filter. The page resets to 1.
    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self.page = 1;
        self
    }

    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    pub fn with_per_page(mut self, per_page: usize) -> Self {
        self.per_page = per_page;
        self
    }

    /// Check whether a product passes every filter.
    pub fn matches(&self, product: &Product) -> bool {
        self.filters.iter().all(|f| f.matches(product))
    }

    /// Filter products (keeping their order) and return the requested page.
    pub fn run<'a>(&self, products: &'a [Product]) -> Page<&'a Product> {
        let matching: Vec<&Product> = products.iter().filter(|p| self.matches(p)).collect();
        paginate(&matching, self.page, self.per_page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::ProductId;
    use crate::money::Price;
    use chrono::Utc;

    fn product(id: usize, category: Category, featured: bool, in_stock: bool) -> Product {
        Product {
            id: ProductId::new(id.to_string()),
            title: format!("Producto {}", id),
            description: "Descripción".to_string(),
            price: Price::from_units(1000),
            category,
            sizes: vec!["M".into()],
            colors: vec!["Negro".into()],
            images: vec![],
            in_stock,
            featured,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_filter_matches() {
        let p = product(1, Category::Pants, true, false);
        assert!(Filter::Category(Category::Pants).matches(&p));
        assert!(!Filter::Category(Category::Shorts).matches(&p));
        assert!(Filter::Featured.matches(&p));
        assert!(!Filter::InStock.matches(&p));
    }

    #[test]
    fn test_query_combines_filters_and_pages() {
        let products: Vec<Product> = (0..12)
            .map(|i| product(i, Category::Hoodies, i % 2 == 0, true))
            .collect();

        let query = ProductQuery::new()
            .with_filter(Filter::Category(Category::Hoodies))
            .with_filter(Filter::Featured)
            .with_per_page(4)
            .with_page(2);
        let page = query.run(&products);

        let ids: Vec<&str> = page.items.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["8", "10"]);
        assert_eq!(page.pagination.total, 6);
        assert_eq!(page.pagination.total_pages, 2);
    }

    #[test]
    fn test_adding_filter_resets_page() {
        let query = ProductQuery::new().with_page(3).with_filter(Filter::InStock);
        assert_eq!(query.page, 1);
    }

    #[test]
    fn test_query_deserializes_with_defaults() {
        let query: ProductQuery =
            serde_json::from_str(r#"{"filters":[{"type":"category","value":"shirts"}]}"#)
                .unwrap();
        assert_eq!(query.page, 1);
        assert_eq!(query.per_page, DEFAULT_PER_PAGE);
        assert_eq!(query.filters, vec![Filter::Category(Category::Shirts)]);
    }
}
