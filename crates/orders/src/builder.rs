//! Single-use order builder.

use common::Money;

use crate::aggregate::{Order, OrderPricing};
use crate::discount::DiscountStrategy;
use crate::error::OrderError;
use crate::repository::{NewOrder, OrderRepository};
use crate::value_objects::{CustomerDetails, LineItemSnapshot};

/// Assembles customer details, a cart snapshot, and a discount strategy
/// into a priced, persisted order.
///
/// The builder is consumed by [`build`](OrderBuilder::build); a partially
/// configured builder can never produce a persisted order, and a failed
/// build performs no repository writes.
#[derive(Debug, Default)]
pub struct OrderBuilder {
    customer: Option<CustomerDetails>,
    line_items: Option<Vec<LineItemSnapshot>>,
    strategy: Option<DiscountStrategy>,
}

impl OrderBuilder {
    /// Creates an empty builder. The discount defaults to no discount.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the customer details.
    pub fn customer(mut self, details: CustomerDetails) -> Self {
        self.customer = Some(details);
        self
    }

    /// Sets the line-item snapshot taken from the cart.
    pub fn line_items(mut self, items: Vec<LineItemSnapshot>) -> Self {
        self.line_items = Some(items);
        self
    }

    /// Appends a single line item.
    pub fn add_line_item(mut self, item: LineItemSnapshot) -> Self {
        self.line_items.get_or_insert_with(Vec::new).push(item);
        self
    }

    /// Sets the discount strategy. Optional; defaults to no discount.
    pub fn discount_strategy(mut self, strategy: DiscountStrategy) -> Self {
        self.strategy = Some(strategy);
        self
    }

    fn calculate_pricing(
        items: &[LineItemSnapshot],
        strategy: &DiscountStrategy,
    ) -> OrderPricing {
        let subtotal: Money = items.iter().map(LineItemSnapshot::total_price).sum();
        let discount_amount = strategy.evaluate(subtotal);
        let final_total = subtotal.subtract_clamped(discount_amount);

        OrderPricing {
            subtotal,
            discount_amount,
            final_total,
            applied_discount_info: strategy.describe().to_string(),
        }
    }

    /// Prices the order and persists it atomically through the repository.
    ///
    /// Fails with [`OrderError::IncompleteOrder`] if customer details or
    /// line items were never set, and [`OrderError::EmptyOrder`] if the
    /// line-item sequence is empty. Neither failure touches the repository.
    #[tracing::instrument(skip_all)]
    pub async fn build<R: OrderRepository>(self, repo: &R) -> Result<Order, OrderError> {
        let (Some(customer), Some(line_items)) = (self.customer, self.line_items) else {
            return Err(OrderError::IncompleteOrder);
        };
        if line_items.is_empty() {
            return Err(OrderError::EmptyOrder);
        }

        let strategy = self.strategy.unwrap_or(DiscountStrategy::NoDiscount);
        let pricing = Self::calculate_pricing(&line_items, &strategy);

        let order = repo
            .create_order(NewOrder {
                customer,
                line_items,
                pricing,
            })
            .await?;

        tracing::info!(
            order_id = %order.id(),
            final_total = %order.final_total(),
            discount = order.applied_discount_info(),
            "order created"
        );

        Ok(order)
    }
}
