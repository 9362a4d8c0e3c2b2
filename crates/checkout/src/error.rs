//! Checkout error types.

use orders::{OrderError, RepositoryError};
use thiserror::Error;

/// Errors surfaced by the checkout layer.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The cart snapshot has no lines.
    #[error("Your cart is empty.")]
    EmptyCart,

    /// Building the order failed.
    #[error(transparent)]
    Order(#[from] OrderError),

    /// A lifecycle persistence call failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Failure of a single notification handler.
///
/// Handler failures are isolated: the dispatcher logs them and continues
/// with the remaining handlers, and they never propagate to the caller.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct HandlerError(pub String);

impl From<catalog::CatalogError> for HandlerError {
    fn from(e: catalog::CatalogError) -> Self {
        Self(e.to_string())
    }
}
