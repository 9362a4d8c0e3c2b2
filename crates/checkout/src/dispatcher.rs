//! Notification dispatcher (observer hub).

use std::sync::Arc;

use async_trait::async_trait;
use orders::{Order, OrderEvent};

use crate::error::HandlerError;

/// A handler registered for order events.
///
/// Handlers receive every dispatched event and decide for themselves which
/// kinds they act on. A failing handler never affects its siblings.
#[async_trait]
pub trait OrderEventHandler: Send + Sync {
    /// Handler name, used in logs.
    fn name(&self) -> &'static str;

    /// Reacts to an order event.
    async fn on_event(&self, order: &Order, event: &OrderEvent) -> Result<(), HandlerError>;
}

/// Fan-out hub delivering order events to registered handlers.
///
/// Owned by the application root and passed by reference into the
/// orchestrator and lifecycle; tests construct isolated dispatchers per
/// case. Handlers run in registration order.
#[derive(Default)]
pub struct NotificationDispatcher {
    handlers: Vec<Arc<dyn OrderEventHandler>>,
}

impl NotificationDispatcher {
    /// Creates a dispatcher with no handlers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler. Registering the same instance twice is a no-op.
    pub fn register(&mut self, handler: Arc<dyn OrderEventHandler>) {
        if self.handlers.iter().any(|h| Arc::ptr_eq(h, &handler)) {
            return;
        }
        tracing::debug!(handler = handler.name(), "handler registered");
        self.handlers.push(handler);
    }

    /// Removes a handler if present; no-op if absent.
    pub fn unregister(&mut self, handler: &Arc<dyn OrderEventHandler>) {
        self.handlers.retain(|h| !Arc::ptr_eq(h, handler));
    }

    /// Returns the number of registered handlers.
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Delivers an event to every registered handler, in registration order.
    ///
    /// Delivery is best-effort and isolated per handler: a failure is
    /// logged and counted, and dispatch continues with the remaining
    /// handlers.
    #[tracing::instrument(skip(self, order), fields(order_id = %order.id(), event = %event.kind))]
    pub async fn dispatch(&self, order: &Order, event: &OrderEvent) {
        for handler in &self.handlers {
            match handler.on_event(order, event).await {
                Ok(()) => {
                    metrics::counter!("order_events_dispatched").increment(1);
                }
                Err(error) => {
                    metrics::counter!("order_handler_failures").increment(1);
                    tracing::error!(
                        handler = handler.name(),
                        %error,
                        "handler failed, continuing with remaining handlers"
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use common::{Money, OrderId};
    use orders::{CustomerDetails, LineItemSnapshot, OrderPricing, OrderStatus};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn sample_order() -> Order {
        let now = Utc::now();
        Order::restore(
            OrderId::new(),
            CustomerDetails {
                first_name: "Ada".to_string(),
                last_name: "Lovelace".to_string(),
                email: "ada@example.com".to_string(),
                address: "12 Analytical Way".to_string(),
                postal_code: "10001".to_string(),
                city: "London".to_string(),
            },
            vec![LineItemSnapshot::new(
                "SKU-001",
                "Sourdough Loaf",
                Money::from_cents(650),
                1,
            )],
            OrderPricing {
                subtotal: Money::from_cents(650),
                discount_amount: Money::zero(),
                final_total: Money::from_cents(650),
                applied_discount_info: "No discount applied.".to_string(),
            },
            OrderStatus::New,
            now,
            now,
        )
    }

    struct CountingHandler {
        calls: AtomicUsize,
    }

    impl CountingHandler {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl OrderEventHandler for CountingHandler {
        fn name(&self) -> &'static str {
            "CountingHandler"
        }

        async fn on_event(&self, _order: &Order, _event: &OrderEvent) -> Result<(), HandlerError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct FailingHandler;

    #[async_trait]
    impl OrderEventHandler for FailingHandler {
        fn name(&self) -> &'static str {
            "FailingHandler"
        }

        async fn on_event(&self, _order: &Order, _event: &OrderEvent) -> Result<(), HandlerError> {
            Err(HandlerError("smtp connection refused".to_string()))
        }
    }

    #[tokio::test]
    async fn registering_same_instance_twice_invokes_once() {
        let handler = CountingHandler::new();
        let mut dispatcher = NotificationDispatcher::new();
        dispatcher.register(handler.clone());
        dispatcher.register(handler.clone());
        assert_eq!(dispatcher.handler_count(), 1);

        dispatcher
            .dispatch(&sample_order(), &OrderEvent::created())
            .await;
        assert_eq!(handler.calls(), 1);
    }

    #[tokio::test]
    async fn distinct_instances_both_run() {
        let first = CountingHandler::new();
        let second = CountingHandler::new();
        let mut dispatcher = NotificationDispatcher::new();
        dispatcher.register(first.clone());
        dispatcher.register(second.clone());

        dispatcher
            .dispatch(&sample_order(), &OrderEvent::created())
            .await;
        assert_eq!(first.calls(), 1);
        assert_eq!(second.calls(), 1);
    }

    #[tokio::test]
    async fn failing_handler_does_not_block_later_handlers() {
        let counting = CountingHandler::new();
        let mut dispatcher = NotificationDispatcher::new();
        dispatcher.register(Arc::new(FailingHandler));
        dispatcher.register(counting.clone());

        dispatcher
            .dispatch(&sample_order(), &OrderEvent::created())
            .await;
        assert_eq!(counting.calls(), 1);
    }

    #[tokio::test]
    async fn unregister_removes_handler() {
        let handler = CountingHandler::new();
        let mut dispatcher = NotificationDispatcher::new();

        let as_dyn: Arc<dyn OrderEventHandler> = handler.clone();
        dispatcher.register(as_dyn.clone());
        dispatcher.unregister(&as_dyn);
        assert_eq!(dispatcher.handler_count(), 0);

        // Unregistering again is a no-op.
        dispatcher.unregister(&as_dyn);

        dispatcher
            .dispatch(&sample_order(), &OrderEvent::created())
            .await;
        assert_eq!(handler.calls(), 0);
    }
}
