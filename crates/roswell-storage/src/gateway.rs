//! [`ProductGateway`] over a local data directory.

use std::io::ErrorKind;
use std::path::Path;

use async_trait::async_trait;
use chrono::Utc;
use roswell_commerce::gateway::{
    GatewayError, GatewayResult, NewProductRecord, ProductGateway, ProductRecord,
    ProductRecordPatch,
};
use roswell_commerce::ProductId;
use tokio::sync::Mutex;
use tracing::{debug, instrument, warn};

use crate::error::StorageError;
use crate::layout::Layout;

/// Products in a JSON file, images as plain files.
///
/// Every write rewrites `products.json` through a temporary file and a
/// rename. A mutex serializes read-modify-write cycles within the process;
/// separate processes sharing a directory are not coordinated.
pub struct FileGateway {
    layout: Layout,
    write_lock: Mutex<()>,
}

impl FileGateway {
    /// Create a gateway over a data directory.
    ///
    /// Nothing is touched on disk until the first call; a missing products
    /// file reads as an empty catalog.
    pub fn new(layout: Layout) -> Self {
        Self {
            layout,
            write_lock: Mutex::new(()),
        }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    async fn load(&self) -> Result<Vec<ProductRecord>, StorageError> {
        let path = self.layout.products_file();
        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StorageError::io(path, e)),
        };

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        let mut records: Vec<ProductRecord> = serde_json::from_str(&content)
            .map_err(|source| StorageError::Corrupt { path, source })?;
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }

    async fn save(&self, records: &[ProductRecord]) -> Result<(), StorageError> {
        let path = self.layout.products_file();
        let bytes = serde_json::to_vec_pretty(records).map_err(|source| StorageError::Corrupt {
            path: path.clone(),
            source,
        })?;
        write_atomic(&path, &bytes).await
    }
}

async fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), StorageError> {
    let parent = path
        .parent()
        .ok_or_else(|| StorageError::InvalidName(path.display().to_string()))?;
    tokio::fs::create_dir_all(parent)
        .await
        .map_err(|e| StorageError::io(parent, e))?;

    let file_name = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("products.json");
    let tmp = parent.join(format!(".{}.tmp.{}", file_name, std::process::id()));

    tokio::fs::write(&tmp, bytes)
        .await
        .map_err(|e| StorageError::io(&tmp, e))?;
    tokio::fs::rename(&tmp, path)
        .await
        .map_err(|e| StorageError::io(path, e))?;
    Ok(())
}

#[async_trait]
impl ProductGateway for FileGateway {
    #[instrument(skip(self))]
    async fn list_products(&self) -> GatewayResult<Vec<ProductRecord>> {
        let records = self.load().await?;
        debug!(count = records.len(), "Read products file");
        Ok(records)
    }

    #[instrument(skip(self, record), fields(title = %record.title))]
    async fn insert_product(&self, record: NewProductRecord) -> GatewayResult<ProductRecord> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.load().await?;

        if let Some(id) = &record.id {
            if records.iter().any(|r| &r.id == id) {
                return Err(GatewayError::Storage(format!("duplicate key: {}", id)));
            }
        }

        let stored = record.into_record(ProductId::generate(), Utc::now());
        records.push(stored.clone());
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        self.save(&records).await?;

        Ok(stored)
    }

    #[instrument(skip(self, patch))]
    async fn update_product(
        &self,
        id: &ProductId,
        patch: ProductRecordPatch,
    ) -> GatewayResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.load().await?;

        let record = records
            .iter_mut()
            .find(|r| &r.id == id)
            .ok_or_else(|| GatewayError::NotFound(id.to_string()))?;
        patch.apply_to(record);

        self.save(&records).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_product(&self, id: &ProductId) -> GatewayResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.load().await?;

        let before = records.len();
        records.retain(|r| &r.id != id);
        if records.len() == before {
            return Err(GatewayError::NotFound(id.to_string()));
        }

        self.save(&records).await?;
        Ok(())
    }

    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    async fn upload_image(&self, bytes: Vec<u8>, file_name: &str) -> GatewayResult<String> {
        let path = self.layout.image_path(file_name)?;
        let dir = self.layout.images_dir();

        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| StorageError::io(&dir, e))?;
        tokio::fs::write(&path, &bytes)
            .await
            .map_err(|e| StorageError::io(&path, e))?;

        Ok(self.layout.image_reference(file_name))
    }

    #[instrument(skip(self, references), fields(count = references.len()))]
    async fn delete_images(&self, references: &[String]) -> GatewayResult<()> {
        let mut failed = Vec::new();

        for reference in references {
            let Some(name) = self.layout.image_name(reference) else {
                debug!(%reference, "Skipping image outside the store");
                continue;
            };
            let path = match self.layout.image_path(name) {
                Ok(path) => path,
                Err(e) => {
                    warn!(%reference, error = %e, "Refusing to delete image");
                    failed.push(reference.clone());
                    continue;
                }
            };

            match tokio::fs::remove_file(&path).await {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Failed to delete image");
                    failed.push(reference.clone());
                }
            }
        }

        if failed.is_empty() {
            Ok(())
        } else {
            Err(GatewayError::Storage(format!(
                "failed to delete {} image(s): {}",
                failed.len(),
                failed.join(", ")
            )))
        }
    }
}
