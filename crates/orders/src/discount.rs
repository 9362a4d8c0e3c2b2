//! Discount strategies and allocators.
//!
//! A [`DiscountStrategy`] is a pure pricing policy: it maps an order
//! subtotal to a discount amount and carries a human-readable description.
//! A [`DiscountAllocator`] chooses which strategy applies for a given order.

use std::collections::HashMap;

use common::Money;
use serde::{Deserialize, Serialize};

use crate::error::DiscountError;
use crate::value_objects::LineItemSnapshot;

// Volume tiers, compared with strict greater-than.
const TIER_HIGH_CENTS: i64 = 10_000;
const TIER_MID_CENTS: i64 = 5_000;
const TIER_LOW_CENTS: i64 = 2_000;

/// Classifies an applied discount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiscountKind {
    None,
    Percentage,
    FixedAmount,
    PromoPercentage,
    PromoFixed,
}

/// Immutable record of an evaluated discount.
///
/// `parameter` is the percent for percentage kinds and the amount in cents
/// for fixed kinds; zero for `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountDescriptor {
    pub kind: DiscountKind,
    pub parameter: i64,
    pub description: String,
}

impl DiscountDescriptor {
    /// Reclassifies the descriptor as promo-sourced.
    pub fn into_promo(mut self) -> Self {
        self.kind = match self.kind {
            DiscountKind::Percentage => DiscountKind::PromoPercentage,
            DiscountKind::FixedAmount => DiscountKind::PromoFixed,
            other => other,
        };
        self
    }
}

/// A pricing policy mapping a subtotal to a discount amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiscountStrategy {
    /// No discount; always evaluates to zero.
    NoDiscount,

    /// Percentage off the subtotal.
    Percentage { percent: u32, description: String },

    /// Fixed amount off, never more than the subtotal.
    FixedAmount { amount: Money, description: String },
}

impl DiscountStrategy {
    /// The trivial strategy.
    pub fn no_discount() -> Self {
        Self::NoDiscount
    }

    /// Percentage discount with the default description.
    pub fn percentage(percent: u32) -> Result<Self, DiscountError> {
        Self::percentage_described(percent, format!("{percent}% Off"))
    }

    /// Percentage discount with a caller-supplied description.
    pub fn percentage_described(
        percent: u32,
        description: impl Into<String>,
    ) -> Result<Self, DiscountError> {
        if percent > 100 {
            return Err(DiscountError::InvalidPercentage { percent });
        }
        Ok(Self::Percentage {
            percent,
            description: description.into(),
        })
    }

    /// Fixed-amount discount with the default description.
    pub fn fixed_amount(amount: Money) -> Result<Self, DiscountError> {
        Self::fixed_amount_described(amount, format!("{amount} Off"))
    }

    /// Fixed-amount discount with a caller-supplied description.
    pub fn fixed_amount_described(
        amount: Money,
        description: impl Into<String>,
    ) -> Result<Self, DiscountError> {
        if amount.is_negative() {
            return Err(DiscountError::NegativeDiscount {
                cents: amount.cents(),
            });
        }
        Ok(Self::FixedAmount {
            amount,
            description: description.into(),
        })
    }

    /// Evaluates the discount for a subtotal.
    ///
    /// The result never exceeds the subtotal for fixed discounts, and a
    /// valid percentage (≤ 100) cannot exceed it either.
    pub fn evaluate(&self, subtotal: Money) -> Money {
        match self {
            Self::NoDiscount => Money::zero(),
            Self::Percentage { percent, .. } => subtotal.percent(*percent),
            Self::FixedAmount { amount, .. } => (*amount).min(subtotal),
        }
    }

    /// Human-readable description of the discount.
    pub fn describe(&self) -> &str {
        match self {
            Self::NoDiscount => "No discount applied.",
            Self::Percentage { description, .. } => description,
            Self::FixedAmount { description, .. } => description,
        }
    }

    /// Returns true if this is the no-discount strategy.
    pub fn is_trivial(&self) -> bool {
        matches!(self, Self::NoDiscount)
    }

    /// Produces the immutable descriptor for this strategy.
    pub fn descriptor(&self) -> DiscountDescriptor {
        match self {
            Self::NoDiscount => DiscountDescriptor {
                kind: DiscountKind::None,
                parameter: 0,
                description: self.describe().to_string(),
            },
            Self::Percentage {
                percent,
                description,
            } => DiscountDescriptor {
                kind: DiscountKind::Percentage,
                parameter: *percent as i64,
                description: description.clone(),
            },
            Self::FixedAmount {
                amount,
                description,
            } => DiscountDescriptor {
                kind: DiscountKind::FixedAmount,
                parameter: amount.cents(),
                description: description.clone(),
            },
        }
    }
}

/// What a promo code grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromoReward {
    PercentOff(u32),
    AmountOff(Money),
}

/// The recognized promo codes.
///
/// Codes are stored uppercase; lookups are case-insensitive.
#[derive(Debug, Clone)]
pub struct PromoCodeBook {
    codes: HashMap<String, PromoReward>,
}

impl Default for PromoCodeBook {
    fn default() -> Self {
        Self::empty()
            .with_code("BAKERYLOVE15", PromoReward::PercentOff(15))
            .with_code("FRESH5", PromoReward::AmountOff(Money::from_dollars(5)))
    }
}

impl PromoCodeBook {
    /// A book with no codes.
    pub fn empty() -> Self {
        Self {
            codes: HashMap::new(),
        }
    }

    /// Adds a code to the book.
    pub fn with_code(mut self, code: impl Into<String>, reward: PromoReward) -> Self {
        self.codes.insert(code.into().to_uppercase(), reward);
        self
    }

    /// Returns the strategy granted by a code, or `None` if unrecognized.
    pub fn strategy_for(&self, code: &str) -> Option<DiscountStrategy> {
        let normalized = code.to_uppercase();
        let reward = self.codes.get(&normalized)?;
        let strategy = match reward {
            PromoReward::PercentOff(percent) => DiscountStrategy::percentage_described(
                *percent,
                format!("{percent}% Off with Promo {normalized}"),
            ),
            PromoReward::AmountOff(amount) => DiscountStrategy::fixed_amount_described(
                *amount,
                format!("{amount} Off with Promo {normalized}"),
            ),
        };
        match strategy {
            Ok(s) => Some(s),
            Err(error) => {
                tracing::warn!(code = %normalized, %error, "promo code carries invalid reward");
                None
            }
        }
    }
}

/// A policy that chooses which discount strategy applies.
#[derive(Debug, Clone)]
pub enum DiscountAllocator {
    /// Volume tiers on the order subtotal.
    TieredVolume,

    /// Promo code entered at checkout.
    PromoCode {
        code: Option<String>,
        book: PromoCodeBook,
    },
}

impl DiscountAllocator {
    /// The standard volume-tier allocator.
    pub fn tiered_volume() -> Self {
        Self::TieredVolume
    }

    /// Promo allocator over the default code book.
    pub fn promo_code(code: Option<&str>) -> Self {
        Self::promo_code_with_book(code, PromoCodeBook::default())
    }

    /// Promo allocator over a caller-supplied code book.
    pub fn promo_code_with_book(code: Option<&str>, book: PromoCodeBook) -> Self {
        Self::PromoCode {
            code: code.map(str::to_uppercase),
            book,
        }
    }

    /// Selects the strategy for an order.
    ///
    /// Tier boundaries are strict: a subtotal of exactly $100, $50, or $20
    /// falls to the next-lower tier.
    pub fn select(&self, subtotal: Money, _line_items: &[LineItemSnapshot]) -> DiscountStrategy {
        match self {
            Self::TieredVolume => {
                if subtotal.cents() > TIER_HIGH_CENTS {
                    DiscountStrategy::Percentage {
                        percent: 15,
                        description: "15% Off (Order > $100)".to_string(),
                    }
                } else if subtotal.cents() > TIER_MID_CENTS {
                    DiscountStrategy::Percentage {
                        percent: 10,
                        description: "10% Off (Order > $50)".to_string(),
                    }
                } else if subtotal.cents() > TIER_LOW_CENTS {
                    DiscountStrategy::FixedAmount {
                        amount: Money::from_dollars(3),
                        description: "$3 Off (Order > $20)".to_string(),
                    }
                } else {
                    DiscountStrategy::NoDiscount
                }
            }
            Self::PromoCode { code, book } => {
                let Some(code) = code else {
                    return DiscountStrategy::NoDiscount;
                };
                match book.strategy_for(code) {
                    Some(strategy) => strategy,
                    None => {
                        tracing::warn!(code = %code, "promo code not recognized");
                        DiscountStrategy::NoDiscount
                    }
                }
            }
        }
    }
}

/// Checkout-level selection policy: promo first, volume tiers as fallback.
///
/// A recognized promo code wins; an unrecognized or absent code falls back
/// to the tiered allocator. Discounts never stack.
pub fn select_checkout_discount(
    subtotal: Money,
    line_items: &[LineItemSnapshot],
    promo_code: Option<&str>,
) -> DiscountStrategy {
    if promo_code.is_some() {
        let strategy = DiscountAllocator::promo_code(promo_code).select(subtotal, line_items);
        if !strategy.is_trivial() {
            return strategy;
        }
    }
    DiscountAllocator::tiered_volume().select(subtotal, line_items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_discount_evaluates_to_zero() {
        let strategy = DiscountStrategy::no_discount();
        assert_eq!(strategy.evaluate(Money::from_dollars(100)), Money::zero());
        assert_eq!(strategy.describe(), "No discount applied.");
    }

    #[test]
    fn percentage_evaluates_proportionally() {
        let strategy = DiscountStrategy::percentage(10).unwrap();
        assert_eq!(strategy.evaluate(Money::from_cents(3500)).cents(), 350);

        // Never more than the subtotal for any valid percentage.
        let full = DiscountStrategy::percentage(100).unwrap();
        assert_eq!(
            full.evaluate(Money::from_cents(3500)),
            Money::from_cents(3500)
        );
    }

    #[test]
    fn percentage_out_of_range_fails() {
        assert_eq!(
            DiscountStrategy::percentage(101),
            Err(DiscountError::InvalidPercentage { percent: 101 })
        );
    }

    #[test]
    fn fixed_amount_caps_at_subtotal() {
        let strategy = DiscountStrategy::fixed_amount(Money::from_dollars(5)).unwrap();
        assert_eq!(strategy.evaluate(Money::from_dollars(100)).cents(), 500);
        assert_eq!(strategy.evaluate(Money::from_cents(300)).cents(), 300);
    }

    #[test]
    fn negative_fixed_amount_fails() {
        assert_eq!(
            DiscountStrategy::fixed_amount(Money::from_cents(-1)),
            Err(DiscountError::NegativeDiscount { cents: -1 })
        );
    }

    #[test]
    fn tiered_volume_tiers() {
        let allocator = DiscountAllocator::tiered_volume();

        let s = allocator.select(Money::from_dollars(150), &[]);
        assert!(matches!(s, DiscountStrategy::Percentage { percent: 15, .. }));

        let s = allocator.select(Money::from_dollars(75), &[]);
        assert!(matches!(s, DiscountStrategy::Percentage { percent: 10, .. }));

        let s = allocator.select(Money::from_dollars(25), &[]);
        assert!(matches!(s, DiscountStrategy::FixedAmount { .. }));
        assert_eq!(s.evaluate(Money::from_dollars(25)).cents(), 300);

        let s = allocator.select(Money::from_dollars(10), &[]);
        assert!(s.is_trivial());
    }

    #[test]
    fn tier_boundaries_are_strict() {
        let allocator = DiscountAllocator::tiered_volume();

        let s = allocator.select(Money::from_dollars(100), &[]);
        assert!(matches!(s, DiscountStrategy::Percentage { percent: 10, .. }));

        let s = allocator.select(Money::from_dollars(50), &[]);
        assert!(matches!(s, DiscountStrategy::FixedAmount { .. }));

        let s = allocator.select(Money::from_dollars(20), &[]);
        assert!(s.is_trivial());
    }

    #[test]
    fn promo_codes_are_case_insensitive() {
        let allocator = DiscountAllocator::promo_code(Some("bakerylove15"));
        let s = allocator.select(Money::from_dollars(40), &[]);
        assert!(matches!(s, DiscountStrategy::Percentage { percent: 15, .. }));
        assert_eq!(s.describe(), "15% Off with Promo BAKERYLOVE15");
    }

    #[test]
    fn promo_fixed_code() {
        let allocator = DiscountAllocator::promo_code(Some("FRESH5"));
        let s = allocator.select(Money::from_dollars(40), &[]);
        assert_eq!(s.evaluate(Money::from_dollars(40)).cents(), 500);
    }

    #[test]
    fn unknown_or_absent_promo_yields_no_discount() {
        let allocator = DiscountAllocator::promo_code(Some("NOPE"));
        assert!(allocator.select(Money::from_dollars(40), &[]).is_trivial());

        let allocator = DiscountAllocator::promo_code(None);
        assert!(allocator.select(Money::from_dollars(40), &[]).is_trivial());
    }

    #[test]
    fn custom_code_book() {
        let book = PromoCodeBook::empty().with_code("treat10", PromoReward::PercentOff(10));
        let allocator = DiscountAllocator::promo_code_with_book(Some("TREAT10"), book);
        let s = allocator.select(Money::from_dollars(30), &[]);
        assert!(matches!(s, DiscountStrategy::Percentage { percent: 10, .. }));
    }

    #[test]
    fn checkout_selection_prefers_recognized_promo() {
        // Subtotal qualifies for the 15% volume tier, but the promo wins.
        let s = select_checkout_discount(Money::from_dollars(150), &[], Some("FRESH5"));
        assert!(matches!(s, DiscountStrategy::FixedAmount { .. }));
    }

    #[test]
    fn checkout_selection_falls_back_on_unknown_promo() {
        let s = select_checkout_discount(Money::from_dollars(150), &[], Some("NOPE"));
        assert!(matches!(s, DiscountStrategy::Percentage { percent: 15, .. }));
    }

    #[test]
    fn checkout_selection_without_promo_uses_tiers() {
        let s = select_checkout_discount(Money::from_dollars(10), &[], None);
        assert!(s.is_trivial());
    }

    #[test]
    fn descriptor_reflects_strategy() {
        let d = DiscountStrategy::percentage(15).unwrap().descriptor();
        assert_eq!(d.kind, DiscountKind::Percentage);
        assert_eq!(d.parameter, 15);

        let d = DiscountStrategy::fixed_amount(Money::from_dollars(5))
            .unwrap()
            .descriptor()
            .into_promo();
        assert_eq!(d.kind, DiscountKind::PromoFixed);
        assert_eq!(d.parameter, 500);
    }
}
