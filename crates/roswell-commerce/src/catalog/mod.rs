//! Product catalog module.
//!
//! Contains product and category types, admin drafts, the catalog store
//! and the legacy category migration.

mod category;
mod draft;
mod migration;
mod product;
mod store;

pub use category::Category;
pub use draft::{ProductDraft, ProductPatch, MAX_IMAGES};
pub use migration::{CategoryMigration, CategoryRewrite, MigrationReport};
pub use product::Product;
pub use store::{CatalogStore, IMAGE_EXTENSIONS};
