//! Commerce error types.

use std::fmt;

use thiserror::Error;

use crate::gateway::GatewayError;

/// Errors that can occur in storefront operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// A product with the same id is already in the catalog.
    #[error("Duplicate product id: {0}")]
    DuplicateProduct(String),

    /// Invalid quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// The product does not offer the requested size/color.
    #[error("Product {product_id} has no variant {size} / {color}")]
    InvalidVariant {
        product_id: String,
        size: String,
        color: String,
    },

    /// Draft or patch rejected before reaching the gateway.
    #[error("Validation error: {0}")]
    Validation(ValidationErrors),

    /// Loading the catalog from the gateway failed.
    #[error("Failed to load products: {0}")]
    Fetch(#[source] GatewayError),

    /// A remote write failed.
    #[error("Failed to {operation} product: {source}")]
    Write {
        operation: WriteOperation,
        #[source]
        source: GatewayError,
    },

    /// The uploaded file is not an accepted image.
    #[error("Not an image file: {0}")]
    InvalidImage(String),

    /// Checkout requested with no lines in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in price calculation")]
    Overflow,
}

impl CommerceError {
    /// Check if this error came from the persistence gateway.
    pub fn is_remote(&self) -> bool {
        matches!(self, CommerceError::Fetch(_) | CommerceError::Write { .. })
    }

    /// Field-level messages, if this is a validation failure.
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            CommerceError::Validation(errors) => errors.as_slice(),
            _ => &[],
        }
    }
}

/// Remote write that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOperation {
    Add,
    Update,
    Delete,
    UploadImage,
}

impl WriteOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            WriteOperation::Add => "add",
            WriteOperation::Update => "update",
            WriteOperation::Delete => "delete",
            WriteOperation::UploadImage => "upload image for",
        }
    }
}

impl fmt::Display for WriteOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single rejected field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Field name (e.g., "title").
    pub field: &'static str,
    /// Human-readable message.
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Collected field errors from draft or patch validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a rejected field.
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldError::new(field, message));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn as_slice(&self) -> &[FieldError] {
        &self.0
    }

    /// Check whether a given field was rejected.
    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    /// Turn the collected errors into a result.
    pub fn into_result(self) -> Result<(), CommerceError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(CommerceError::Validation(self))
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.0.iter().map(|e| e.to_string()).collect();
        f.write_str(&messages.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_display() {
        let mut errors = ValidationErrors::new();
        errors.push("title", "title is required");
        errors.push("images", "at least one image is required");

        assert_eq!(errors.len(), 2);
        assert!(errors.has_field("images"));
        assert_eq!(
            errors.to_string(),
            "title: title is required; images: at least one image is required"
        );
    }

    #[test]
    fn test_empty_validation_is_ok() {
        assert!(ValidationErrors::new().into_result().is_ok());
    }

    #[test]
    fn test_write_error_message() {
        let err = CommerceError::Write {
            operation: WriteOperation::Delete,
            source: GatewayError::Network("connection reset".to_string()),
        };
        assert!(err.is_remote());
        assert_eq!(
            err.to_string(),
            "Failed to delete product: Network error: connection reset"
        );
    }
}
