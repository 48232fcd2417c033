//! `stockwise-store` — SQLite adapters for every persistence port.
//!
//! One `Database` handle owns the pool; each port gets a repository that
//! borrows it. All calls are bounded by a fixed deadline, and the two
//! multi-row writes (order creation, status update) each run in a single
//! transaction.

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

pub use pool::{Database, DbConfig};
