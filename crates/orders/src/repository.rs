//! Order persistence boundary.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::OrderId;
use tokio::sync::RwLock;

use crate::aggregate::{Order, OrderPricing};
use crate::error::RepositoryError;
use crate::status::OrderStatus;
use crate::value_objects::{CustomerDetails, LineItemSnapshot};

/// A fully priced order ready to be persisted.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub customer: CustomerDetails,
    pub line_items: Vec<LineItemSnapshot>,
    pub pricing: OrderPricing,
}

/// Durable store for orders.
///
/// `create_order` must write the order and all its line items as one unit:
/// either everything is durably recorded, or nothing is, and no partial
/// state is ever observable to readers.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Atomically persists a new order with status `New`.
    async fn create_order(&self, new_order: NewOrder) -> Result<Order, RepositoryError>;

    /// Loads an order by ID. Returns `None` if no such order exists.
    async fn load_order(&self, id: OrderId) -> Result<Option<Order>, RepositoryError>;

    /// Persists a new status for an existing order.
    async fn save_order_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<(), RepositoryError>;
}

/// One persisted order row plus its line items.
///
/// The status is stored as text, the way a durable row would hold it, so
/// loading exercises the lenient status parse.
#[derive(Debug, Clone)]
struct StoredOrder {
    customer: CustomerDetails,
    line_items: Vec<LineItemSnapshot>,
    pricing: OrderPricing,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// In-memory order repository for tests.
///
/// Each `create_order` takes the write lock once and inserts the complete
/// record, so readers see either the whole order or nothing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryOrderRepository {
    rows: Arc<RwLock<HashMap<OrderId, StoredOrder>>>,
}

impl InMemoryOrderRepository {
    /// Creates a new empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of persisted orders.
    pub async fn order_count(&self) -> usize {
        self.rows.read().await.len()
    }

    /// Overwrites the raw status text of a stored order.
    ///
    /// Test hook for simulating a corrupt persisted status value.
    pub async fn corrupt_status(&self, id: OrderId, raw: &str) {
        if let Some(row) = self.rows.write().await.get_mut(&id) {
            row.status = raw.to_string();
        }
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn create_order(&self, new_order: NewOrder) -> Result<Order, RepositoryError> {
        let id = OrderId::new();
        let now = Utc::now();
        let row = StoredOrder {
            customer: new_order.customer,
            line_items: new_order.line_items,
            pricing: new_order.pricing,
            status: OrderStatus::New.as_str().to_string(),
            created_at: now,
            updated_at: now,
        };

        let order = Order::restore(
            id,
            row.customer.clone(),
            row.line_items.clone(),
            row.pricing.clone(),
            OrderStatus::New,
            now,
            now,
        );

        self.rows.write().await.insert(id, row);
        Ok(order)
    }

    async fn load_order(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        let rows = self.rows.read().await;
        let Some(row) = rows.get(&id) else {
            return Ok(None);
        };

        Ok(Some(Order::restore(
            id,
            row.customer.clone(),
            row.line_items.clone(),
            row.pricing.clone(),
            OrderStatus::parse_lossy(&row.status),
            row.created_at,
            row.updated_at,
        )))
    }

    async fn save_order_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<(), RepositoryError> {
        let mut rows = self.rows.write().await;
        let row = rows.get_mut(&id).ok_or(RepositoryError::NotFound { id })?;

        row.status = status.as_str().to_string();
        row.updated_at = Utc::now();
        Ok(())
    }
}
