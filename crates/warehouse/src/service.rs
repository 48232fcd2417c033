//! Ledger port and warehouse operations façade.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use chrono::{DateTime, Utc};
use stockwise_catalog::ProductStore;
use stockwise_core::{DomainError, DomainResult, OrderId, ProductId, SupplierId};

use crate::movement::{StockItem, StockMovement};

/// Persistence port for the movement ledger.
///
/// `append_deducting` is the only sufficiency-checked entry point: the
/// adapter must recompute the product's signed stock sum and insert the
/// movement inside one write transaction, failing `InsufficientStock`
/// without writing anything when the balance is too low. The check and the
/// insert must not be separable by a concurrent writer.
#[async_trait]
pub trait MovementLedger: Send + Sync {
    /// Append a movement with no balance precondition (receipts).
    async fn append(&self, movement: &StockMovement) -> DomainResult<()>;

    /// Append a deducting movement only if derived stock covers it.
    async fn append_deducting(&self, movement: &StockMovement) -> DomainResult<()>;

    /// Signed sum of all movements for one product; 0.0 when none exist.
    async fn stock_of(&self, product_id: ProductId) -> DomainResult<f64>;

    /// Signed sums grouped by product, for every product with movements.
    async fn inventory(&self) -> DomainResult<Vec<StockItem>>;
}

/// Warehouse operations: receipt, write-off, reservation, inventory.
pub struct WarehouseService {
    ledger: Arc<dyn MovementLedger>,
    products: Arc<dyn ProductStore>,
}

impl WarehouseService {
    pub fn new(ledger: Arc<dyn MovementLedger>, products: Arc<dyn ProductStore>) -> Self {
        WarehouseService { ledger, products }
    }

    /// Record goods arriving from a supplier. No sufficiency check.
    pub async fn receipt(
        &self,
        product_id: ProductId,
        supplier_id: Option<SupplierId>,
        quantity: f64,
        price: Option<f64>,
        expiry_date: Option<DateTime<Utc>>,
    ) -> DomainResult<StockMovement> {
        self.require_product(product_id).await?;
        let movement = StockMovement::receipt(product_id, supplier_id, quantity, price, expiry_date);
        movement.validate()?;
        self.ledger.append(&movement).await?;
        info!(product_id = %product_id, quantity, "stock received");
        Ok(movement)
    }

    /// Remove stock from circulation. Fails `InsufficientStock` if the
    /// derived balance does not cover the quantity.
    pub async fn write_off(&self, product_id: ProductId, quantity: f64) -> DomainResult<StockMovement> {
        self.require_product(product_id).await?;
        let movement = StockMovement::write_off(product_id, quantity);
        movement.validate()?;
        self.ledger.append_deducting(&movement).await?;
        info!(product_id = %product_id, quantity, "stock written off");
        Ok(movement)
    }

    /// Hold stock against an order. Same sufficiency rule as write-off.
    pub async fn reserve(
        &self,
        product_id: ProductId,
        order_id: OrderId,
        quantity: f64,
    ) -> DomainResult<StockMovement> {
        self.require_product(product_id).await?;
        let movement = StockMovement::reserve(product_id, order_id, quantity);
        movement.validate()?;
        self.ledger.append_deducting(&movement).await?;
        info!(product_id = %product_id, order_id = %order_id, quantity, "stock reserved");
        Ok(movement)
    }

    /// Derived stock for every product with at least one movement.
    pub async fn inventory(&self) -> DomainResult<Vec<StockItem>> {
        self.ledger.inventory().await
    }

    /// Derived stock for one product; 0.0 when it has no movements.
    pub async fn stock_of(&self, product_id: ProductId) -> DomainResult<f64> {
        self.ledger.stock_of(product_id).await
    }

    async fn require_product(&self, id: ProductId) -> DomainResult<()> {
        self.products
            .find_by_id(id)
            .await?
            .map(|_| ())
            .ok_or_else(|| DomainError::not_found("product"))
    }
}
