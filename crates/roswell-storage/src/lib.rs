//! File-backed persistence for the Roswell storefront.
//!
//! [`FileGateway`] implements the catalog's
//! [`ProductGateway`](roswell_commerce::gateway::ProductGateway) on top of a
//! local data directory, so the CLI and tests can run the full catalog
//! lifecycle without a hosted backend.
//!
//! # Example
//!
//! ```rust,ignore
//! use roswell_storage::{FileGateway, Layout};
//! use roswell_commerce::CatalogStore;
//!
//! let gateway = Arc::new(FileGateway::new(Layout::new("./data", "/images")));
//! let mut store = CatalogStore::new(gateway);
//! store.refresh().await?;
//! ```

mod error;
mod gateway;
mod layout;

pub use error::StorageError;
pub use gateway::FileGateway;
pub use layout::Layout;
