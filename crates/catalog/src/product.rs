use common::{Money, ProductId};
use serde::{Deserialize, Serialize};

/// Catalog view of a product.
///
/// The order-processing core only ever writes `stock` (and the derived
/// `available` flag); everything else is read-only reference data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Product identifier (SKU).
    pub id: ProductId,

    /// Human-readable product name.
    pub name: String,

    /// Current list price.
    pub price: Money,

    /// Units on hand.
    pub stock: u32,

    /// Whether the product is offered for sale.
    pub available: bool,
}

impl Product {
    /// Creates a new product. `available` is derived from the initial stock.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: Money, stock: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            stock,
            available: stock > 0,
        }
    }
}
