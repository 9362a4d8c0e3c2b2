//! Customer email notifications.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use orders::{Order, OrderEvent, OrderEventKind};

use crate::dispatcher::OrderEventHandler;
use crate::error::HandlerError;

/// Sends order emails to the customer.
///
/// Real delivery is out of scope; the handler logs the email it would send
/// and counts sends so tests can observe them.
#[derive(Debug, Default)]
pub struct EmailHandler {
    sent: AtomicUsize,
}

impl EmailHandler {
    /// Creates a new email handler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns how many emails have been "sent".
    pub fn sent_count(&self) -> usize {
        self.sent.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl OrderEventHandler for EmailHandler {
    fn name(&self) -> &'static str {
        "EmailHandler"
    }

    async fn on_event(&self, order: &Order, event: &OrderEvent) -> Result<(), HandlerError> {
        match event.kind {
            OrderEventKind::Created => {
                tracing::info!(
                    recipient = order.customer().email,
                    order_id = %order.id(),
                    "sending order confirmation email"
                );
            }
            OrderEventKind::StatusChanged | OrderEventKind::CanceledWithStockReturn => {
                tracing::info!(
                    recipient = order.customer().email,
                    order_id = %order.id(),
                    status = %order.status(),
                    "sending order status update email"
                );
            }
        }
        self.sent.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
