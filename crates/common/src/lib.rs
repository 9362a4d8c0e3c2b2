//! Shared types for the storefront order-processing workspace.
//!
//! Identifier newtypes and the integer-cents [`Money`] value used across
//! the catalog, orders, and checkout crates.

mod money;
mod types;

pub use money::Money;
pub use types::{OrderId, ProductId};
