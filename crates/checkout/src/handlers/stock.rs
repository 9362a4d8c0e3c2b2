//! Stock adjustment on order creation and cancellation.

use std::sync::Arc;

use async_trait::async_trait;
use catalog::CatalogStore;
use common::{OrderId, ProductId};
use orders::{Order, OrderEvent, OrderEventKind};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::dispatcher::OrderEventHandler;
use crate::error::HandlerError;

/// An order line that could not be covered by catalog stock.
///
/// A shortage means the order was placed with insufficient stock: a race
/// between cart checkout and upstream availability checks. The committed
/// order is never rolled back here; the shortage is recorded for
/// operational follow-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockShortage {
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub requested: u32,
    pub available: u32,
}

/// Adjusts catalog stock in response to order events.
///
/// On `created`, decrements stock per line item behind a check that stock
/// covers the quantity, so stock never goes negative; `available` is
/// recomputed as `stock > 0` on every write. On
/// `canceled_with_stock_return`, increments stock back and re-marks the
/// product available.
pub struct StockAdjustmentHandler<C> {
    catalog: C,
    shortages: Arc<RwLock<Vec<StockShortage>>>,
}

impl<C: CatalogStore> StockAdjustmentHandler<C> {
    /// Creates a handler over the given catalog store.
    pub fn new(catalog: C) -> Self {
        Self {
            catalog,
            shortages: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Returns the shortages recorded so far.
    pub async fn shortages(&self) -> Vec<StockShortage> {
        self.shortages.read().await.clone()
    }

    async fn record_shortage(&self, shortage: StockShortage) {
        metrics::counter!("stock_shortages").increment(1);
        tracing::error!(
            order_id = %shortage.order_id,
            product_id = %shortage.product_id,
            requested = shortage.requested,
            available = shortage.available,
            "CRITICAL: order placed with insufficient stock"
        );
        self.shortages.write().await.push(shortage);
    }

    async fn take_stock(&self, order: &Order) -> Result<(), HandlerError> {
        for item in order.line_items() {
            let Some(product) = self.catalog.lookup(&item.product_id).await? else {
                self.record_shortage(StockShortage {
                    order_id: order.id(),
                    product_id: item.product_id.clone(),
                    requested: item.quantity,
                    available: 0,
                })
                .await;
                continue;
            };

            // Optimistic check right before the decrement; under real
            // concurrency the store would do an atomic compare-and-decrement.
            if product.stock >= item.quantity {
                let new_stock = product.stock - item.quantity;
                self.catalog
                    .update_stock(&item.product_id, new_stock, new_stock > 0)
                    .await?;
                tracing::info!(
                    product_id = %item.product_id,
                    quantity = item.quantity,
                    new_stock,
                    "stock reduced"
                );
            } else {
                self.record_shortage(StockShortage {
                    order_id: order.id(),
                    product_id: item.product_id.clone(),
                    requested: item.quantity,
                    available: product.stock,
                })
                .await;
            }
        }
        Ok(())
    }

    async fn return_stock(&self, order: &Order) -> Result<(), HandlerError> {
        for item in order.line_items() {
            let Some(product) = self.catalog.lookup(&item.product_id).await? else {
                return Err(HandlerError(format!(
                    "cannot return stock for unknown product {}",
                    item.product_id
                )));
            };

            let new_stock = product.stock + item.quantity;
            self.catalog
                .update_stock(&item.product_id, new_stock, true)
                .await?;
            tracing::info!(
                product_id = %item.product_id,
                quantity = item.quantity,
                new_stock,
                "stock returned"
            );
        }
        Ok(())
    }
}

#[async_trait]
impl<C: CatalogStore> OrderEventHandler for StockAdjustmentHandler<C> {
    fn name(&self) -> &'static str {
        "StockAdjustmentHandler"
    }

    async fn on_event(&self, order: &Order, event: &OrderEvent) -> Result<(), HandlerError> {
        match event.kind {
            OrderEventKind::Created => self.take_stock(order).await,
            OrderEventKind::CanceledWithStockReturn => self.return_stock(order).await,
            OrderEventKind::StatusChanged => Ok(()),
        }
    }
}
