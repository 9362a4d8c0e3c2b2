//! Checkout composition layer for the storefront.
//!
//! Wires the order domain to its collaborators:
//! - [`Cart`] — the session cart boundary consumed at placement time
//! - [`NotificationDispatcher`] — fan-out of order events to handlers
//! - [`StockAdjustmentHandler`], [`EmailHandler`], [`AdminAlertHandler`] —
//!   the side effects triggered by order events
//! - [`OrderLifecycle`] — advances or cancels a persisted order
//! - [`OrderPlacementOrchestrator`] — the "place an order from a cart" use case
//!
//! The dispatcher is constructed explicitly at the application root and
//! shared by reference; there is no global notifier instance.

mod cart;
mod dispatcher;
mod error;
mod handlers;
mod lifecycle;
mod orchestrator;

pub use cart::{Cart, CartError, CartLine, InMemoryCart};
pub use dispatcher::{NotificationDispatcher, OrderEventHandler};
pub use error::{CheckoutError, HandlerError};
pub use handlers::{AdminAlertHandler, EmailHandler, StockAdjustmentHandler, StockShortage};
pub use lifecycle::{OrderLifecycle, TransitionOutcome};
pub use orchestrator::OrderPlacementOrchestrator;
