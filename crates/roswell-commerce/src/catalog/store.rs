//! The catalog store.
//!
//! [`CatalogStore`] owns the in-memory product list the storefront renders
//! from, and keeps it in step with the remote table through a
//! [`ProductGateway`]. Writes are applied locally as well as remotely; when
//! the two may have diverged, [`CatalogStore::refresh`] reloads the whole
//! list.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, instrument, warn};

use crate::catalog::{Category, Product, ProductDraft, ProductPatch};
use crate::error::{CommerceError, WriteOperation};
use crate::gateway::{NewProductRecord, ProductGateway, ProductRecord, ProductRecordPatch};
use crate::ids::ProductId;

/// File extensions accepted by [`CatalogStore::upload_image`].
pub const IMAGE_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "webp", "gif", "avif"];

/// Client-side product catalog.
pub struct CatalogStore<G: ProductGateway> {
    gateway: Arc<G>,
    products: Vec<Product>,
    loading: bool,
    last_error: Option<String>,
}

impl<G: ProductGateway> CatalogStore<G> {
    /// Create an empty store on top of a gateway.
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            products: Vec::new(),
            loading: false,
            last_error: None,
        }
    }

    /// The gateway this store writes through.
    pub fn gateway(&self) -> &Arc<G> {
        &self.gateway
    }

    /// Products in store order (newest first).
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by id.
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Whether a reload is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Message of the last failed reload, cleared by a successful one.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Replace the whole product set with stored records.
    ///
    /// Categories are normalized and the list is sorted newest first. Records
    /// with equal creation times keep their relative order.
    pub fn hydrate(&mut self, records: Vec<ProductRecord>) {
        let mut products: Vec<Product> = records.into_iter().map(Product::from_record).collect();
        products.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        self.products = products;
        self.loading = false;
        self.last_error = None;
    }

    /// Reload every product from the gateway.
    ///
    /// On failure the last known list is kept and the error is recorded.
    #[instrument(skip(self))]
    pub async fn refresh(&mut self) -> Result<(), CommerceError> {
        self.loading = true;

        match self.gateway.list_products().await {
            Ok(records) => {
                debug!(count = records.len(), "Loaded products");
                self.hydrate(records);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Failed to load products");
                self.loading = false;
                self.last_error = Some(e.to_string());
                Err(CommerceError::Fetch(e))
            }
        }
    }

    /// Create a product.
    ///
    /// The product is inserted locally before the remote call and stays in
    /// place if that call fails. On success it adopts the id and creation
    /// time the backend assigned.
    #[instrument(skip(self, draft), fields(title = %draft.title))]
    pub async fn add(&mut self, draft: ProductDraft) -> Result<Product, CommerceError> {
        draft.validate()?;

        if let Some(id) = &draft.id {
            if self.get(id).is_some() {
                return Err(CommerceError::DuplicateProduct(id.to_string()));
            }
        }

        let explicit_id = draft.id.clone();
        let product = draft.into_product();
        let local_id = product.id.clone();

        let mut record = NewProductRecord::from(&product);
        record.id = explicit_id;

        self.products.insert(0, product);

        let stored = self
            .gateway
            .insert_product(record)
            .await
            .map_err(|source| CommerceError::Write {
                operation: WriteOperation::Add,
                source,
            })?;

        let adopted = Product::from_record(stored);
        match self.products.iter_mut().find(|p| p.id == local_id) {
            Some(slot) => *slot = adopted.clone(),
            None => self.products.insert(0, adopted.clone()),
        }

        info!(id = %adopted.id, "Product added");
        Ok(adopted)
    }

    /// Apply a partial update.
    ///
    /// Unknown ids are ignored without contacting the backend. The local copy
    /// changes only after the remote update succeeds.
    #[instrument(skip(self, patch))]
    pub async fn update(&mut self, id: &ProductId, patch: ProductPatch) -> Result<(), CommerceError> {
        patch.validate()?;

        if self.get(id).is_none() {
            debug!("Update for unknown product ignored");
            return Ok(());
        }

        let remote = ProductRecordPatch::from_patch(&patch, Utc::now());
        self.gateway
            .update_product(id, remote)
            .await
            .map_err(|source| CommerceError::Write {
                operation: WriteOperation::Update,
                source,
            })?;

        if let Some(product) = self.products.iter_mut().find(|p| &p.id == id) {
            product.apply_patch(&patch);
        }
        Ok(())
    }

    /// Delete a product and its images.
    ///
    /// Image cleanup is best effort. If the record deletion fails the store
    /// reloads from the backend before returning the error.
    #[instrument(skip(self))]
    pub async fn remove(&mut self, id: &ProductId) -> Result<(), CommerceError> {
        let images = match self.products.iter().position(|p| &p.id == id) {
            Some(index) => self.products.remove(index).images,
            None => Vec::new(),
        };

        if !images.is_empty() {
            if let Err(e) = self.gateway.delete_images(&images).await {
                warn!(error = %e, count = images.len(), "Failed to delete product images");
            }
        }

        if let Err(source) = self.gateway.delete_product(id).await {
            warn!(error = %source, "Failed to delete product, reloading");
            if let Err(e) = self.refresh().await {
                warn!(error = %e, "Reload after failed delete also failed");
            }
            return Err(CommerceError::Write {
                operation: WriteOperation::Delete,
                source,
            });
        }

        info!("Product removed");
        Ok(())
    }

    /// Products in a category, in store order.
    pub fn filter_by_category(&self, category: Category) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.category == category)
            .collect()
    }

    /// Featured products, in store order.
    pub fn filter_featured(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| p.featured).collect()
    }

    /// Store a product image and return its reference.
    ///
    /// The object is renamed to `{timestamp}.{ext}`; only image extensions
    /// are accepted.
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    pub async fn upload_image(
        &self,
        bytes: Vec<u8>,
        file_name: &str,
    ) -> Result<String, CommerceError> {
        let extension = image_extension(file_name)
            .ok_or_else(|| CommerceError::InvalidImage(file_name.to_string()))?;
        if bytes.is_empty() {
            return Err(CommerceError::InvalidImage(file_name.to_string()));
        }

        let object_name = format!("{}.{}", ProductId::generate(), extension);
        self.gateway
            .upload_image(bytes, &object_name)
            .await
            .map_err(|source| CommerceError::Write {
                operation: WriteOperation::UploadImage,
                source,
            })
    }
}

/// Lowercased extension of an accepted image file name.
fn image_extension(file_name: &str) -> Option<String> {
    let (_, extension) = file_name.rsplit_once('.')?;
    let extension = extension.to_ascii_lowercase();
    IMAGE_EXTENSIONS
        .contains(&extension.as_str())
        .then_some(extension)
}
