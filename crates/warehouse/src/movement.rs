//! Stock movement facts and the derived stock view.

use chrono::{DateTime, Utc};
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use stockwise_core::{DomainError, DomainResult, MovementId, OrderId, ProductId, SupplierId};

/// Kind of ledger entry. The kind alone decides the sign a movement
/// contributes to derived stock; quantities are always stored positive.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementKind {
    Receipt,
    WriteOff,
    Reserve,
}

impl MovementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementKind::Receipt => "receipt",
            MovementKind::WriteOff => "write_off",
            MovementKind::Reserve => "reserve",
        }
    }

    /// Contribution sign: receipts add, write-offs and reservations deduct.
    pub fn sign(&self) -> f64 {
        match self {
            MovementKind::Receipt => 1.0,
            MovementKind::WriteOff | MovementKind::Reserve => -1.0,
        }
    }

    /// Whether appending this kind requires a sufficiency check.
    pub fn deducts(&self) -> bool {
        self.sign() < 0.0
    }
}

impl core::fmt::Display for MovementKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MovementKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "receipt" => Ok(MovementKind::Receipt),
            "write_off" => Ok(MovementKind::WriteOff),
            "reserve" => Ok(MovementKind::Reserve),
            other => Err(DomainError::validation(format!(
                "unknown movement kind: {other}"
            ))),
        }
    }
}

/// An immutable ledger entry. Once appended it is never updated or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockMovement {
    pub id: MovementId,
    pub kind: MovementKind,
    pub product_id: ProductId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier_id: Option<SupplierId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<OrderId>,
    pub quantity: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl StockMovement {
    /// Goods arriving from a supplier.
    pub fn receipt(
        product_id: ProductId,
        supplier_id: Option<SupplierId>,
        quantity: f64,
        price: Option<f64>,
        expiry_date: Option<DateTime<Utc>>,
    ) -> Self {
        StockMovement {
            id: MovementId::new(),
            kind: MovementKind::Receipt,
            product_id,
            supplier_id,
            order_id: None,
            quantity,
            price,
            expiry_date,
            created_at: Utc::now(),
        }
    }

    /// Stock removed from circulation (damage, expiry, shrinkage).
    pub fn write_off(product_id: ProductId, quantity: f64) -> Self {
        StockMovement {
            id: MovementId::new(),
            kind: MovementKind::WriteOff,
            product_id,
            supplier_id: None,
            order_id: None,
            quantity,
            price: None,
            expiry_date: None,
            created_at: Utc::now(),
        }
    }

    /// Stock held against an order.
    pub fn reserve(product_id: ProductId, order_id: OrderId, quantity: f64) -> Self {
        StockMovement {
            id: MovementId::new(),
            kind: MovementKind::Reserve,
            product_id,
            supplier_id: None,
            order_id: Some(order_id),
            quantity,
            price: None,
            expiry_date: None,
            created_at: Utc::now(),
        }
    }

    /// Quantity must be strictly positive regardless of kind.
    pub fn validate(&self) -> DomainResult<()> {
        if !(self.quantity > 0.0) {
            return Err(DomainError::validation("quantity must be positive"));
        }
        Ok(())
    }

    /// Signed contribution of this movement to derived stock.
    pub fn signed_quantity(&self) -> f64 {
        self.kind.sign() * self.quantity
    }
}

/// Derived stock on hand for one product. Never persisted; always recomputed
/// from the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockItem {
    pub product_id: ProductId,
    pub quantity: f64,
}
