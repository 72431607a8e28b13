//! On-disk layout of a data directory.
//!
//! ```text
//! {data_dir}/
//!   products.json          every product record, newest first
//!   images/products/*.jpg  uploaded images
//! ```
//!
//! Image references handed back to the catalog are public URLs of the form
//! `{public_base_url}/products/{name}`.

use std::path::{Path, PathBuf};

use crate::error::StorageError;

const PRODUCTS_FILE: &str = "products.json";
const IMAGES_DIR: &str = "images";
const BUCKET_FOLDER: &str = "products";

/// Paths and URLs for one data directory.
#[derive(Debug, Clone)]
pub struct Layout {
    data_dir: PathBuf,
    public_base_url: String,
}

impl Layout {
    pub fn new(data_dir: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        let public_base_url = public_base_url.into().trim_end_matches('/').to_string();
        Self {
            data_dir: data_dir.into(),
            public_base_url,
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn products_file(&self) -> PathBuf {
        self.data_dir.join(PRODUCTS_FILE)
    }

    pub fn images_dir(&self) -> PathBuf {
        self.data_dir.join(IMAGES_DIR).join(BUCKET_FOLDER)
    }

    /// File path for an image name. Names with path separators are refused.
    pub fn image_path(&self, name: &str) -> Result<PathBuf, StorageError> {
        if name.is_empty()
            || name.starts_with('.')
            || name.contains('/')
            || name.contains('\\')
        {
            return Err(StorageError::InvalidName(name.to_string()));
        }
        Ok(self.images_dir().join(name))
    }

    /// Public reference for a stored image.
    pub fn image_reference(&self, name: &str) -> String {
        format!("{}/{}/{}", self.public_base_url, BUCKET_FOLDER, name)
    }

    /// Image name behind a reference, if it points into this store.
    pub fn image_name<'a>(&self, reference: &'a str) -> Option<&'a str> {
        let rest = reference.strip_prefix(self.public_base_url.as_str())?;
        let name = rest.strip_prefix('/')?.strip_prefix(BUCKET_FOLDER)?.strip_prefix('/')?;
        (!name.is_empty()).then_some(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_round_trip() {
        let layout = Layout::new("/srv/roswell", "https://cdn.roswell.ar/");
        let reference = layout.image_reference("1717000000000.jpg");

        assert_eq!(reference, "https://cdn.roswell.ar/products/1717000000000.jpg");
        assert_eq!(layout.image_name(&reference), Some("1717000000000.jpg"));
    }

    #[test]
    fn test_foreign_references_are_ignored() {
        let layout = Layout::new("/srv/roswell", "/images");
        assert_eq!(layout.image_name("/placeholder.jpg"), None);
        assert_eq!(layout.image_name("https://example.com/products/a.jpg"), None);
        assert_eq!(layout.image_name("/images/products/"), None);
    }

    #[test]
    fn test_image_path_refuses_traversal() {
        let layout = Layout::new("/srv/roswell", "/images");
        assert!(layout.image_path("../products.json").is_err());
        assert!(layout.image_path("a/b.jpg").is_err());
        assert!(layout.image_path("").is_err());
        assert_eq!(
            layout.image_path("a.jpg").unwrap(),
            PathBuf::from("/srv/roswell/images/products/a.jpg")
        );
    }
}
