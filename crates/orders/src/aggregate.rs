//! Order aggregate.

use chrono::{DateTime, Utc};
use common::{Money, OrderId};
use serde::{Deserialize, Serialize};

use crate::status::OrderStatus;
use crate::value_objects::{CustomerDetails, LineItemSnapshot};

/// The priced totals of an order, fixed at build time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderPricing {
    /// Sum of unit price × quantity over all line items.
    pub subtotal: Money,

    /// Amount taken off the subtotal.
    pub discount_amount: Money,

    /// `max(0, subtotal - discount_amount)`.
    pub final_total: Money,

    /// Human-readable description of the applied discount.
    pub applied_discount_info: String,
}

/// Order aggregate root.
///
/// Created atomically by the [`OrderBuilder`](crate::OrderBuilder); after
/// that only the status (and `updated_at`) ever changes, driven by the
/// lifecycle transitions. Line items and totals are immutable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    customer: CustomerDetails,
    line_items: Vec<LineItemSnapshot>,
    pricing: OrderPricing,
    status: OrderStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Order {
    /// Rehydrates an order from a persisted record.
    ///
    /// Repository implementations use this; application code obtains orders
    /// through the builder or the repository.
    pub fn restore(
        id: OrderId,
        customer: CustomerDetails,
        line_items: Vec<LineItemSnapshot>,
        pricing: OrderPricing,
        status: OrderStatus,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            customer,
            line_items,
            pricing,
            status,
            created_at,
            updated_at,
        }
    }

    /// Returns the order ID.
    pub fn id(&self) -> OrderId {
        self.id
    }

    /// Returns the customer details.
    pub fn customer(&self) -> &CustomerDetails {
        &self.customer
    }

    /// Returns the frozen line items.
    pub fn line_items(&self) -> &[LineItemSnapshot] {
        &self.line_items
    }

    /// Returns the number of line items.
    pub fn item_count(&self) -> usize {
        self.line_items.len()
    }

    /// Returns the total quantity across all line items.
    pub fn total_quantity(&self) -> u32 {
        self.line_items.iter().map(|item| item.quantity).sum()
    }

    /// Returns the pre-discount subtotal.
    pub fn subtotal(&self) -> Money {
        self.pricing.subtotal
    }

    /// Returns the discount taken off the subtotal.
    pub fn discount_amount(&self) -> Money {
        self.pricing.discount_amount
    }

    /// Returns the amount the customer pays.
    pub fn final_total(&self) -> Money {
        self.pricing.final_total
    }

    /// Returns the description of the applied discount.
    pub fn applied_discount_info(&self) -> &str {
        &self.pricing.applied_discount_info
    }

    /// Returns the current status.
    pub fn status(&self) -> OrderStatus {
        self.status
    }

    /// Returns true if the order is in a terminal status.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Returns when the order was placed.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns when the order was last touched.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Applies a status already persisted by the repository.
    ///
    /// The lifecycle persists the new status first and then mirrors it here,
    /// so the in-memory aggregate never runs ahead of the durable record.
    pub fn apply_status(&mut self, status: OrderStatus, at: DateTime<Utc>) {
        self.status = status;
        self.updated_at = at;
    }
}

impl std::fmt::Display for Order {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Order {} - {}", self.id, self.customer.full_name())
    }
}
