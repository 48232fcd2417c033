//! Shared domain primitives: strongly-typed identifiers and the error
//! taxonomy every other crate builds on. Pure, no I/O.

pub mod error;
pub mod id;

pub use error::{DomainError, DomainResult};
pub use id::{CategoryId, MovementId, OrderId, ProductId, SupplierId, UserId};
