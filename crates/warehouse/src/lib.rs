//! `stockwise-warehouse` — the append-only stock ledger.
//!
//! Movements are immutable facts; current inventory is derived by signed
//! aggregation at read time. Corrections are compensating movements, never
//! updates or deletes.

pub mod movement;
pub mod service;

pub use movement::{MovementKind, StockItem, StockMovement};
pub use service::{MovementLedger, WarehouseService};
