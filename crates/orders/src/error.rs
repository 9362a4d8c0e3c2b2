//! Order domain error types.

use common::OrderId;
use thiserror::Error;

/// Errors raised while configuring a discount strategy.
///
/// These are configuration-time faults: a strategy with a bad parameter is
/// never constructed, so evaluation itself cannot fail.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DiscountError {
    /// Percentage outside the 0..=100 range.
    #[error("Percentage must be between 0 and 100 (got {percent})")]
    InvalidPercentage { percent: u32 },

    /// Negative fixed discount amount.
    #[error("Discount amount cannot be negative (got {cents} cents)")]
    NegativeDiscount { cents: i64 },
}

/// Errors raised by the persistence boundary.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// No order row exists for the given ID.
    #[error("Order not found: {id}")]
    NotFound { id: OrderId },

    /// The backing store failed.
    #[error("Order store error: {0}")]
    Storage(String),
}

/// Errors that can occur while building or persisting an order.
#[derive(Debug, Error)]
pub enum OrderError {
    /// Customer details or line items were never set on the builder.
    #[error("Customer details and cart items must be set before building.")]
    IncompleteOrder,

    /// The line-item sequence is empty.
    #[error("Cannot build order without items.")]
    EmptyOrder,

    /// A discount strategy was configured with a bad parameter.
    #[error(transparent)]
    Discount(#[from] DiscountError),

    /// The repository failed while persisting or loading.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
