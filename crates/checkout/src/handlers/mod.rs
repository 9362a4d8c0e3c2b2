//! Concrete order-event handlers.

mod admin;
mod email;
mod stock;

pub use admin::AdminAlertHandler;
pub use email::EmailHandler;
pub use stock::{StockAdjustmentHandler, StockShortage};
