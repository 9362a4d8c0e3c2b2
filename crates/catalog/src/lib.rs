//! Product catalog boundary for the storefront.
//!
//! This crate owns the read/write interface to the product catalog as seen
//! by the order-processing core:
//! - [`Product`] — the catalog view of a product (price, stock, availability)
//! - [`CatalogStore`] — lookup and stock-update operations
//! - [`InMemoryCatalog`] — in-memory implementation for tests and demos
//! - [`PriceAdjustment`] — priced product options (gift wrap, express assembly)
//!   applied as an ordered sequence of adjustments to a base price

mod adjustments;
mod error;
mod product;
mod store;

pub use adjustments::{PriceAdjustment, price_with_adjustments};
pub use error::CatalogError;
pub use product::Product;
pub use store::{CatalogStore, InMemoryCatalog};
