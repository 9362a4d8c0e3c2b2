//! Catalog error types.

use common::ProductId;
use thiserror::Error;

/// Errors that can occur against the catalog store.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The requested product does not exist in the catalog.
    #[error("Product not found: {product_id}")]
    ProductNotFound { product_id: ProductId },

    /// The backing store failed.
    #[error("Catalog store error: {0}")]
    Store(String),
}
