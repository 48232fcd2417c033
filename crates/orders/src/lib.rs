//! `stockwise-orders` — order aggregate and lifecycle.
//!
//! An order owns its items and status history; reservations it causes live
//! in the movement ledger, linked back by order id. Creation writes the
//! order and its reservations in one transaction.

pub mod order;
pub mod service;

pub use order::{Order, OrderItem, OrderPolicy, OrderStatus, StatusEntry};
pub use service::{OrderService, OrderStore};
