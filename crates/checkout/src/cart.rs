//! Session cart boundary.
//!
//! The cart itself lives in an external session store; the checkout layer
//! only consumes it through the [`Cart`] trait. Quantities are always
//! positive: the cart drops non-positive entries at its own boundary.

use std::sync::Arc;

use async_trait::async_trait;
use catalog::{PriceAdjustment, Product, price_with_adjustments};
use common::{Money, ProductId};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::RwLock;

/// One retained cart entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub product_name: String,
    pub unit_price: Money,
    pub quantity: u32,
}

/// Failure of the external cart store.
#[derive(Debug, Error)]
#[error("Cart error: {0}")]
pub struct CartError(pub String);

/// Read/clear interface to the session cart.
#[async_trait]
pub trait Cart: Send + Sync {
    /// Returns the retained cart lines, quantities always positive.
    async fn lines(&self) -> Result<Vec<CartLine>, CartError>;

    /// Returns the cart total (sum of unit price × quantity).
    async fn total_price(&self) -> Result<Money, CartError>;

    /// Empties the cart after a successful placement.
    async fn clear(&self) -> Result<(), CartError>;
}

/// In-memory cart implementation for tests and demos.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCart {
    lines: Arc<RwLock<Vec<CartLine>>>,
}

impl InMemoryCart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a product at its list price. A zero quantity removes the entry.
    pub async fn add(&self, product: &Product, quantity: u32) {
        self.add_with_options(product, quantity, &[]).await;
    }

    /// Adds a product with priced options applied to its unit price.
    ///
    /// Adjustments apply in the given order; the resulting line carries the
    /// adjusted unit price and the option suffixes on the name.
    pub async fn add_with_options(
        &self,
        product: &Product,
        quantity: u32,
        adjustments: &[PriceAdjustment],
    ) {
        let (unit_price, suffix) = price_with_adjustments(product.price, adjustments);
        let product_name = format!("{}{}", product.name, suffix);

        let mut lines = self.lines.write().await;
        if let Some(line) = lines
            .iter_mut()
            .find(|l| l.product_id == product.id && l.product_name == product_name)
        {
            line.quantity += quantity;
        } else if quantity > 0 {
            lines.push(CartLine {
                product_id: product.id.clone(),
                product_name,
                unit_price,
                quantity,
            });
        }
        // Non-positive entries never enter the cart.
        lines.retain(|l| l.quantity > 0);
    }

    /// Returns the number of distinct lines.
    pub async fn line_count(&self) -> usize {
        self.lines.read().await.len()
    }
}

#[async_trait]
impl Cart for InMemoryCart {
    async fn lines(&self) -> Result<Vec<CartLine>, CartError> {
        Ok(self.lines.read().await.clone())
    }

    async fn total_price(&self) -> Result<Money, CartError> {
        let lines = self.lines.read().await;
        Ok(lines
            .iter()
            .map(|l| l.unit_price.multiply(l.quantity))
            .sum())
    }

    async fn clear(&self) -> Result<(), CartError> {
        self.lines.write().await.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaf() -> Product {
        Product::new("SKU-001", "Sourdough Loaf", Money::from_cents(650), 10)
    }

    #[tokio::test]
    async fn add_and_total() {
        let cart = InMemoryCart::new();
        cart.add(&loaf(), 2).await;

        assert_eq!(cart.line_count().await, 1);
        assert_eq!(cart.total_price().await.unwrap().cents(), 1300);
    }

    #[tokio::test]
    async fn adding_same_product_accumulates_quantity() {
        let cart = InMemoryCart::new();
        cart.add(&loaf(), 2).await;
        cart.add(&loaf(), 3).await;

        let lines = cart.lines().await.unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].quantity, 5);
    }

    #[tokio::test]
    async fn zero_quantity_is_dropped() {
        let cart = InMemoryCart::new();
        cart.add(&loaf(), 0).await;
        assert_eq!(cart.line_count().await, 0);
    }

    #[tokio::test]
    async fn options_adjust_price_and_name() {
        let cart = InMemoryCart::new();
        cart.add_with_options(&loaf(), 1, &[PriceAdjustment::gift_wrap()])
            .await;

        let lines = cart.lines().await.unwrap();
        assert_eq!(lines[0].product_name, "Sourdough Loaf (Gift Wrapped)");
        assert_eq!(lines[0].unit_price.cents(), 900);
    }

    #[tokio::test]
    async fn plain_and_optioned_lines_stay_separate() {
        let cart = InMemoryCart::new();
        cart.add(&loaf(), 1).await;
        cart.add_with_options(&loaf(), 1, &[PriceAdjustment::gift_wrap()])
            .await;

        assert_eq!(cart.line_count().await, 2);
    }

    #[tokio::test]
    async fn cart_line_serialization_roundtrip() {
        let line = CartLine {
            product_id: ProductId::new("SKU-001"),
            product_name: "Sourdough Loaf".to_string(),
            unit_price: Money::from_cents(650),
            quantity: 2,
        };
        let json = serde_json::to_string(&line).unwrap();
        let deserialized: CartLine = serde_json::from_str(&json).unwrap();
        assert_eq!(line, deserialized);
    }

    #[tokio::test]
    async fn clear_empties_the_cart() {
        let cart = InMemoryCart::new();
        cart.add(&loaf(), 2).await;
        cart.clear().await.unwrap();
        assert_eq!(cart.line_count().await, 0);
    }
}
