//! Order domain for the storefront.
//!
//! This crate provides the order placement and lifecycle core:
//! - [`OrderStatus`] and the explicit lifecycle transition table
//! - [`CustomerDetails`] and [`LineItemSnapshot`] value objects
//! - [`DiscountStrategy`] and [`DiscountAllocator`] pricing policies
//! - [`Order`] aggregate and the single-use [`OrderBuilder`]
//! - [`OrderRepository`] persistence boundary with an in-memory implementation

mod aggregate;
mod builder;
mod discount;
mod error;
mod events;
mod repository;
mod status;
mod value_objects;

pub use aggregate::{Order, OrderPricing};
pub use builder::OrderBuilder;
pub use discount::{
    DiscountAllocator, DiscountDescriptor, DiscountKind, DiscountStrategy, PromoCodeBook,
    PromoReward, select_checkout_discount,
};
pub use error::{DiscountError, OrderError, RepositoryError};
pub use events::{OrderEvent, OrderEventKind};
pub use repository::{InMemoryOrderRepository, NewOrder, OrderRepository};
pub use status::{LifecycleAction, OrderStatus, Transition, transition};
pub use value_objects::{CustomerDetails, LineItemSnapshot};
