//! Catalog store trait and in-memory implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::ProductId;
use tokio::sync::RwLock;

use crate::{CatalogError, Product};

/// Read/write interface to the product catalog.
///
/// The only write the order core performs is the stock update done by the
/// stock-adjustment handler; `available` must be kept consistent with the
/// new stock level by the caller.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Looks up a product by ID. Returns `None` if the product is unknown.
    async fn lookup(&self, product_id: &ProductId) -> Result<Option<Product>, CatalogError>;

    /// Writes a new stock level and availability flag for a product.
    async fn update_stock(
        &self,
        product_id: &ProductId,
        new_stock: u32,
        new_available: bool,
    ) -> Result<(), CatalogError>;
}

/// In-memory catalog implementation for tests.
///
/// Guards its product map with an async `RwLock`, so each stock update is
/// a single atomic write from the point of view of concurrent readers.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    products: Arc<RwLock<HashMap<ProductId, Product>>>,
}

impl InMemoryCatalog {
    /// Creates a new empty in-memory catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a product in the catalog.
    pub async fn insert(&self, product: Product) {
        self.products.write().await.insert(product.id.clone(), product);
    }

    /// Returns the number of products in the catalog.
    pub async fn product_count(&self) -> usize {
        self.products.read().await.len()
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalog {
    async fn lookup(&self, product_id: &ProductId) -> Result<Option<Product>, CatalogError> {
        Ok(self.products.read().await.get(product_id).cloned())
    }

    async fn update_stock(
        &self,
        product_id: &ProductId,
        new_stock: u32,
        new_available: bool,
    ) -> Result<(), CatalogError> {
        let mut products = self.products.write().await;
        let product = products
            .get_mut(product_id)
            .ok_or_else(|| CatalogError::ProductNotFound {
                product_id: product_id.clone(),
            })?;

        product.stock = new_stock;
        product.available = new_available;
        tracing::debug!(product_id = %product_id, new_stock, new_available, "stock updated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::Money;

    #[tokio::test]
    async fn lookup_returns_inserted_product() {
        let catalog = InMemoryCatalog::new();
        catalog
            .insert(Product::new("SKU-001", "Sourdough Loaf", Money::from_cents(650), 5))
            .await;

        let found = catalog.lookup(&ProductId::new("SKU-001")).await.unwrap();
        assert_eq!(found.unwrap().name, "Sourdough Loaf");

        let missing = catalog.lookup(&ProductId::new("SKU-404")).await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn update_stock_writes_stock_and_availability() {
        let catalog = InMemoryCatalog::new();
        catalog
            .insert(Product::new("SKU-001", "Sourdough Loaf", Money::from_cents(650), 5))
            .await;

        catalog
            .update_stock(&ProductId::new("SKU-001"), 0, false)
            .await
            .unwrap();

        let product = catalog
            .lookup(&ProductId::new("SKU-001"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(product.stock, 0);
        assert!(!product.available);
    }

    #[tokio::test]
    async fn update_stock_unknown_product_fails() {
        let catalog = InMemoryCatalog::new();
        let result = catalog
            .update_stock(&ProductId::new("SKU-404"), 1, true)
            .await;
        assert!(matches!(result, Err(CatalogError::ProductNotFound { .. })));
    }
}
