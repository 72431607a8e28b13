//! Persistence gateway contract.
//!
//! The storefront keeps no data of its own: products live in a hosted table
//! and images in an object bucket. [`ProductGateway`] is the seam the catalog
//! store talks through; [`InMemoryGateway`] implements it for tests and
//! demos, and other crates provide real backends.

mod memory;
mod record;

use async_trait::async_trait;

use crate::ids::ProductId;

pub use memory::{GatewayOperation, InMemoryGateway};
pub use record::{NewProductRecord, ProductRecord, ProductRecordPatch};

/// Result type for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Gateway operation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    /// Transport failure reaching the backend.
    #[error("Network error: {0}")]
    Network(String),

    /// The backend or object store rejected the operation.
    #[error("Storage error: {0}")]
    Storage(String),

    /// The addressed record does not exist.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// The backend returned a record that could not be decoded.
    #[error("Invalid record: {0}")]
    InvalidRecord(String),
}

impl From<serde_json::Error> for GatewayError {
    fn from(e: serde_json::Error) -> Self {
        GatewayError::InvalidRecord(e.to_string())
    }
}

/// Remote product table and image bucket.
///
/// Calls are independent: nothing orders two concurrent calls against each
/// other, and there is no cancellation or timeout at this layer.
#[async_trait]
pub trait ProductGateway: Send + Sync {
    /// All products, newest first.
    async fn list_products(&self) -> GatewayResult<Vec<ProductRecord>>;

    /// Insert a product. The backend assigns id and timestamps when absent.
    async fn insert_product(&self, record: NewProductRecord) -> GatewayResult<ProductRecord>;

    /// Apply a partial update to a product.
    async fn update_product(&self, id: &ProductId, patch: ProductRecordPatch)
        -> GatewayResult<()>;

    /// Delete a product record.
    async fn delete_product(&self, id: &ProductId) -> GatewayResult<()>;

    /// Store an image and return the reference to keep in `images`.
    async fn upload_image(&self, bytes: Vec<u8>, file_name: &str) -> GatewayResult<String>;

    /// Delete images by the references `upload_image` returned.
    async fn delete_images(&self, references: &[String]) -> GatewayResult<()>;
}
