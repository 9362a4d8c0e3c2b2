//! Admin alerts for new orders.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use orders::{Order, OrderEvent, OrderEventKind};

use crate::dispatcher::OrderEventHandler;
use crate::error::HandlerError;

/// Notifies the store admin when a new order arrives.
///
/// Only reacts to `created`; other events are ignored.
#[derive(Debug, Default)]
pub struct AdminAlertHandler {
    alerts: AtomicUsize,
}

impl AdminAlertHandler {
    /// Creates a new admin alert handler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns how many alerts have been raised.
    pub fn alert_count(&self) -> usize {
        self.alerts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl OrderEventHandler for AdminAlertHandler {
    fn name(&self) -> &'static str {
        "AdminAlertHandler"
    }

    async fn on_event(&self, order: &Order, event: &OrderEvent) -> Result<(), HandlerError> {
        if event.kind == OrderEventKind::Created {
            tracing::info!(
                order_id = %order.id(),
                customer = order.customer().full_name(),
                total = %order.final_total(),
                "notifying admin about new order"
            );
            self.alerts.fetch_add(1, Ordering::SeqCst);
        }
        Ok(())
    }
}
