//! Order domain events delivered through the notification dispatcher.

use serde::{Deserialize, Serialize};

use crate::status::OrderStatus;

/// The kind of event that occurred on an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderEventKind {
    /// The order was placed and committed.
    Created,

    /// The order moved to a new status.
    StatusChanged,

    /// The order was canceled before shipping and its stock is released.
    CanceledWithStockReturn,
}

impl OrderEventKind {
    /// Returns the event type name.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderEventKind::Created => "created",
            OrderEventKind::StatusChanged => "status_changed",
            OrderEventKind::CanceledWithStockReturn => "canceled_with_stock_return",
        }
    }
}

impl std::fmt::Display for OrderEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An event instance, carrying the kind plus transition context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderEvent {
    /// What happened.
    pub kind: OrderEventKind,

    /// The status the order held before a transition, when applicable.
    pub previous_status: Option<OrderStatus>,
}

impl OrderEvent {
    /// Event for a freshly committed order.
    pub fn created() -> Self {
        Self {
            kind: OrderEventKind::Created,
            previous_status: None,
        }
    }

    /// Event for a status transition.
    pub fn status_changed(previous: OrderStatus) -> Self {
        Self {
            kind: OrderEventKind::StatusChanged,
            previous_status: Some(previous),
        }
    }

    /// Event for a pre-shipping cancellation that releases stock.
    pub fn canceled_with_stock_return(previous: OrderStatus) -> Self {
        Self {
            kind: OrderEventKind::CanceledWithStockReturn,
            previous_status: Some(previous),
        }
    }
}
