//! Storefront domain types and logic for Roswell.
//!
//! This crate provides the client-side core of the storefront:
//!
//! - **Catalog**: Products, categories, drafts/patches and the [`CatalogStore`]
//! - **Cart**: Shopping cart keyed by product, size and color
//! - **Search**: Product filters and pagination
//! - **Checkout**: Order message builder and WhatsApp handoff
//! - **Gateway**: Async persistence contract for the hosted backend
//!
//! # Example
//!
//! ```rust,ignore
//! use roswell_commerce::prelude::*;
//!
//! let gateway = Arc::new(InMemoryGateway::new());
//! let mut store = CatalogStore::new(gateway);
//! store.refresh().await?;
//!
//! // Add the first featured product to the cart
//! let mut cart = Cart::new();
//! let product = store.filter_featured()[0].clone();
//! cart.add_line(product, "M", "Negro", 2)?;
//!
//! let handoff = CheckoutHandoff::from_cart(&cart, DEFAULT_DESTINATION)?;
//! println!("{}", handoff.whatsapp_url());
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod catalog;
pub mod cart;
pub mod checkout;
pub mod gateway;
pub mod search;

pub use error::CommerceError;
pub use ids::ProductId;
pub use money::Price;

pub use catalog::CatalogStore;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::{CommerceError, FieldError, ValidationErrors, WriteOperation};
    pub use crate::ids::ProductId;
    pub use crate::money::Price;

    // Catalog
    pub use crate::catalog::{
        CatalogStore, Category, CategoryMigration, Product, ProductDraft, ProductPatch,
    };

    // Cart
    pub use crate::cart::{Cart, CartLine, LineKey, VariantChange};

    // Checkout
    pub use crate::checkout::{build_order_message, CheckoutHandoff, DEFAULT_DESTINATION};

    // Gateway
    pub use crate::gateway::{
        GatewayError, InMemoryGateway, NewProductRecord, ProductGateway, ProductRecord,
        ProductRecordPatch,
    };

    // Search
    pub use crate::search::{paginate, Filter, Page, Pagination, ProductQuery};
}
