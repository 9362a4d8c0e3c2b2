//! Order status machine.

use serde::{Deserialize, Serialize};

use crate::events::OrderEventKind;

/// The status of an order in its lifecycle.
///
/// Status transitions:
/// ```text
/// New ──► Processing ──► Shipped ──► Completed
///  │          │
///  └──────────┴──► Canceled
/// ```
///
/// `Completed` and `Canceled` are terminal. Shipped orders cannot be
/// canceled through this flow; a return process outside this core would
/// handle them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    /// Order was just placed.
    #[default]
    New,

    /// Payment taken, order is being prepared.
    Processing,

    /// Order has left the store (or is ready for pickup).
    Shipped,

    /// Order was delivered/picked up (terminal state).
    Completed,

    /// Order was canceled (terminal state).
    Canceled,
}

/// Action driving a lifecycle transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleAction {
    /// Move to the next logical status.
    Advance,

    /// Cancel the order.
    Cancel,
}

/// A legal transition: the status to move to and the event it emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// Status the order moves to.
    pub next: OrderStatus,

    /// Event emitted after the new status is persisted.
    pub emits: OrderEventKind,
}

/// The transition table.
///
/// Returns `None` when the action is a no-op from the given status: no
/// status change, no persistence, no event. Advancing a terminal order and
/// canceling a shipped or terminal order are no-ops by design of the flow,
/// not errors.
pub fn transition(status: OrderStatus, action: LifecycleAction) -> Option<Transition> {
    match (status, action) {
        (OrderStatus::New, LifecycleAction::Advance) => Some(Transition {
            next: OrderStatus::Processing,
            emits: OrderEventKind::StatusChanged,
        }),
        (OrderStatus::Processing, LifecycleAction::Advance) => Some(Transition {
            next: OrderStatus::Shipped,
            emits: OrderEventKind::StatusChanged,
        }),
        (OrderStatus::Shipped, LifecycleAction::Advance) => Some(Transition {
            next: OrderStatus::Completed,
            emits: OrderEventKind::StatusChanged,
        }),
        (OrderStatus::Completed | OrderStatus::Canceled, LifecycleAction::Advance) => None,

        // Canceling an order that has not shipped returns its stock.
        (OrderStatus::New | OrderStatus::Processing, LifecycleAction::Cancel) => Some(Transition {
            next: OrderStatus::Canceled,
            emits: OrderEventKind::CanceledWithStockReturn,
        }),
        (
            OrderStatus::Shipped | OrderStatus::Completed | OrderStatus::Canceled,
            LifecycleAction::Cancel,
        ) => None,
    }
}

impl OrderStatus {
    /// Returns true if no further transitions are possible.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Canceled)
    }

    /// Returns the status as stored in the persisted order row.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::New => "NEW",
            OrderStatus::Processing => "PROCESSING",
            OrderStatus::Shipped => "SHIPPED",
            OrderStatus::Completed => "COMPLETED",
            OrderStatus::Canceled => "CANCELED",
        }
    }

    /// Parses a persisted status value, recovering from corrupt data.
    ///
    /// An unrecognized value logs a warning and falls back to `New`. The
    /// status is re-read from the persisted row on every lifecycle
    /// construction, so this recovery never overwrites good data.
    pub fn parse_lossy(value: &str) -> OrderStatus {
        match value {
            "NEW" => OrderStatus::New,
            "PROCESSING" => OrderStatus::Processing,
            "SHIPPED" => OrderStatus::Shipped,
            "COMPLETED" => OrderStatus::Completed,
            "CANCELED" => OrderStatus::Canceled,
            other => {
                tracing::warn!(status = other, "unknown order status, defaulting to NEW");
                OrderStatus::New
            }
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
