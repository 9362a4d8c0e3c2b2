//! Order lifecycle driver.

use std::sync::Arc;

use chrono::Utc;
use orders::{
    LifecycleAction, Order, OrderEvent, OrderEventKind, OrderRepository, OrderStatus, transition,
};

use crate::dispatcher::NotificationDispatcher;
use crate::error::CheckoutError;

/// What a lifecycle call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// The order moved to a new status and the event was dispatched.
    Transitioned {
        from: OrderStatus,
        to: OrderStatus,
    },

    /// Nothing to do from the current status; no persistence, no event.
    NoOp,
}

/// Drives status transitions for persisted orders.
///
/// Each transition persists the new status first and only then mirrors it
/// on the aggregate and dispatches the event, so handlers always observe a
/// durably recorded status.
pub struct OrderLifecycle<R> {
    repo: R,
    dispatcher: Arc<NotificationDispatcher>,
}

impl<R: OrderRepository> OrderLifecycle<R> {
    /// Creates a lifecycle over the given repository and dispatcher.
    pub fn new(repo: R, dispatcher: Arc<NotificationDispatcher>) -> Self {
        Self { repo, dispatcher }
    }

    /// Moves the order to its next status.
    ///
    /// No-op (not an error) from a terminal status.
    #[tracing::instrument(skip_all, fields(order_id = %order.id()))]
    pub async fn advance(&self, order: &mut Order) -> Result<TransitionOutcome, CheckoutError> {
        self.drive(order, LifecycleAction::Advance).await
    }

    /// Cancels the order.
    ///
    /// From `New` or `Processing` this releases stock through the
    /// `canceled_with_stock_return` event. No-op once shipped or terminal.
    #[tracing::instrument(skip_all, fields(order_id = %order.id()))]
    pub async fn cancel(&self, order: &mut Order) -> Result<TransitionOutcome, CheckoutError> {
        self.drive(order, LifecycleAction::Cancel).await
    }

    async fn drive(
        &self,
        order: &mut Order,
        action: LifecycleAction,
    ) -> Result<TransitionOutcome, CheckoutError> {
        let from = order.status();
        let Some(step) = transition(from, action) else {
            tracing::debug!(status = %from, ?action, "no transition from current status");
            return Ok(TransitionOutcome::NoOp);
        };

        self.repo.save_order_status(order.id(), step.next).await?;
        order.apply_status(step.next, Utc::now());

        let event = match step.emits {
            OrderEventKind::StatusChanged => OrderEvent::status_changed(from),
            OrderEventKind::CanceledWithStockReturn => OrderEvent::canceled_with_stock_return(from),
            OrderEventKind::Created => OrderEvent::created(),
        };
        self.dispatcher.dispatch(order, &event).await;

        tracing::info!(from = %from, to = %step.next, "order transitioned");
        Ok(TransitionOutcome::Transitioned {
            from,
            to: step.next,
        })
    }
}
