//! Value objects for the order domain.

use common::{Money, ProductId};
use serde::{Deserialize, Serialize};

/// Customer details captured at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDetails {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub address: String,
    pub postal_code: String,
    pub city: String,
}

impl CustomerDetails {
    /// Returns "First Last" for display.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// One product/quantity/price entry within an order.
///
/// The unit price is captured when the order is built and never re-derived
/// from the current catalog price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItemSnapshot {
    /// The product this line refers to.
    pub product_id: ProductId,

    /// Product name at snapshot time (including option suffixes).
    pub product_name: String,

    /// Price per unit at snapshot time.
    pub unit_price: Money,

    /// Quantity ordered; always positive, the cart drops non-positive entries.
    pub quantity: u32,
}

impl LineItemSnapshot {
    /// Creates a new line item snapshot.
    pub fn new(
        product_id: impl Into<ProductId>,
        product_name: impl Into<String>,
        unit_price: Money,
        quantity: u32,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            product_name: product_name.into(),
            unit_price,
            quantity,
        }
    }

    /// Returns the line total (unit price × quantity).
    pub fn total_price(&self) -> Money {
        self.unit_price.multiply(self.quantity)
    }
}
