//! Order placement orchestrator.

use std::sync::Arc;

use orders::{
    CustomerDetails, LineItemSnapshot, Order, OrderBuilder, OrderError, OrderEvent, OrderRepository,
    select_checkout_discount,
};

use crate::cart::Cart;
use crate::dispatcher::NotificationDispatcher;
use crate::error::CheckoutError;

const GENERIC_ERROR: &str = "An unexpected error occurred. Please try again.";

/// Composes cart, discount policy, builder, and dispatcher into the single
/// "place an order from a cart" use case.
///
/// This is the only component that talks to all external collaborators.
/// The presentation layer never sees an unhandled fault from `place`:
/// anything unexpected is logged and surfaced as one generic message.
pub struct OrderPlacementOrchestrator<R> {
    repo: R,
    dispatcher: Arc<NotificationDispatcher>,
}

impl<R: OrderRepository> OrderPlacementOrchestrator<R> {
    /// Creates an orchestrator over the given repository and dispatcher.
    pub fn new(repo: R, dispatcher: Arc<NotificationDispatcher>) -> Self {
        Self { repo, dispatcher }
    }

    /// Places an order from the current cart contents.
    ///
    /// On failure, returns user-facing error messages; no partial order
    /// state is ever persisted. On success the `created` event has been
    /// dispatched and the cart cleared.
    #[tracing::instrument(skip_all, fields(has_promo = promo_code.is_some()))]
    pub async fn place<C: Cart>(
        &self,
        customer: CustomerDetails,
        cart: &C,
        promo_code: Option<&str>,
    ) -> Result<Order, Vec<String>> {
        let lines = match cart.lines().await {
            Ok(lines) => lines,
            Err(error) => {
                tracing::error!(%error, "failed to read cart");
                return Err(vec![GENERIC_ERROR.to_string()]);
            }
        };
        if lines.is_empty() {
            return Err(vec![CheckoutError::EmptyCart.to_string()]);
        }

        let snapshots: Vec<LineItemSnapshot> = lines
            .into_iter()
            .map(|line| {
                LineItemSnapshot::new(
                    line.product_id,
                    line.product_name,
                    line.unit_price,
                    line.quantity,
                )
            })
            .collect();

        let subtotal = snapshots.iter().map(LineItemSnapshot::total_price).sum();
        let strategy = select_checkout_discount(subtotal, &snapshots, promo_code);

        let mut builder = OrderBuilder::new().customer(customer).line_items(snapshots);
        if !strategy.is_trivial() {
            builder = builder.discount_strategy(strategy);
        }

        let order = match builder.build(&self.repo).await {
            Ok(order) => order,
            Err(error @ (OrderError::IncompleteOrder | OrderError::EmptyOrder)) => {
                return Err(vec![error.to_string()]);
            }
            Err(error) => {
                tracing::error!(%error, "unexpected error during order placement");
                return Err(vec![GENERIC_ERROR.to_string()]);
            }
        };

        metrics::counter!("orders_placed").increment(1);
        self.dispatcher.dispatch(&order, &OrderEvent::created()).await;

        // The order is committed; a cart that fails to clear is only logged.
        if let Err(error) = cart.clear().await {
            tracing::error!(order_id = %order.id(), %error, "failed to clear cart after placement");
        }

        Ok(order)
    }
}
