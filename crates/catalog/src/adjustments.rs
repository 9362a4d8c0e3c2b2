//! Priced product options.
//!
//! Options like gift wrap or express assembly adjust a product's base price
//! before it enters the cart. They are modelled as an ordered sequence of
//! adjustments applied left to right. Order matters: a fixed surcharge
//! followed by a percentage surcharge prices the percentage on top of the
//! fixed amount, and vice versa.

use common::Money;
use serde::{Deserialize, Serialize};

const GIFT_WRAP_DEFAULT_CENTS: i64 = 250;
const EXPRESS_ASSEMBLY_DEFAULT_PERCENT: u32 = 5;

/// A single pricing adjustment for a product option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceAdjustment {
    /// Fixed gift-wrap surcharge.
    GiftWrap { cost: Money },

    /// Percentage surcharge for express assembly.
    ExpressAssembly { percent: u32 },
}

impl PriceAdjustment {
    /// Gift wrap at the standard $2.50 cost.
    pub fn gift_wrap() -> Self {
        Self::GiftWrap {
            cost: Money::from_cents(GIFT_WRAP_DEFAULT_CENTS),
        }
    }

    /// Express assembly at the standard 5% surcharge.
    pub fn express_assembly() -> Self {
        Self::ExpressAssembly {
            percent: EXPRESS_ASSEMBLY_DEFAULT_PERCENT,
        }
    }

    /// Applies this adjustment to a price.
    pub fn apply(&self, price: Money) -> Money {
        match self {
            Self::GiftWrap { cost } => price + *cost,
            Self::ExpressAssembly { percent } => price + price.percent(*percent),
        }
    }

    /// Description suffix appended to the product name.
    pub fn suffix(&self) -> String {
        match self {
            Self::GiftWrap { .. } => " (Gift Wrapped)".to_string(),
            Self::ExpressAssembly { percent } => format!(" (Express Assembly +{percent}%)"),
        }
    }
}

/// Applies a sequence of adjustments to a base price, in order.
///
/// Returns the adjusted price and the concatenated description suffix.
pub fn price_with_adjustments(base: Money, adjustments: &[PriceAdjustment]) -> (Money, String) {
    let mut price = base;
    let mut suffix = String::new();
    for adjustment in adjustments {
        price = adjustment.apply(price);
        suffix.push_str(&adjustment.suffix());
    }
    (price, suffix)
}
