//! The movement ledger: append-only inserts and signed aggregation.

use async_trait::async_trait;
use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::{Row, SqlitePool};
use tracing::debug;

use stockwise_core::{DomainError, DomainResult, ProductId};
use stockwise_warehouse::{MovementLedger, StockItem, StockMovement};

use crate::error::{bounded, map_sqlx};
use crate::repository::parse_stored;

const INSERT_MOVEMENT_SQL: &str =
    "INSERT INTO stock_movements \
     (id, kind, product_id, supplier_id, order_id, quantity, price, expiry_date, created_at) \
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)";

/// Insert, but only when the product's signed balance covers the quantity.
/// A single conditional statement, so the check and the write cannot be
/// separated by a concurrent writer.
const INSERT_DEDUCTING_SQL: &str =
    "INSERT INTO stock_movements \
     (id, kind, product_id, supplier_id, order_id, quantity, price, expiry_date, created_at) \
     SELECT ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9 \
     WHERE COALESCE((SELECT SUM(CASE kind WHEN 'receipt' THEN quantity ELSE -quantity END) \
                     FROM stock_movements WHERE product_id = ?3), 0.0) >= ?6";

const STOCK_OF_SQL: &str =
    "SELECT COALESCE(SUM(CASE kind WHEN 'receipt' THEN quantity ELSE -quantity END), 0.0) \
     FROM stock_movements WHERE product_id = ?1";

const INVENTORY_SQL: &str =
    "SELECT product_id, SUM(CASE kind WHEN 'receipt' THEN quantity ELSE -quantity END) AS quantity \
     FROM stock_movements GROUP BY product_id ORDER BY product_id";

/// Bind a movement to an insert statement. Shared with the order repository,
/// which writes reservations inside the order-creation transaction.
pub(crate) fn bind_movement(
    sql: &'static str,
    movement: &StockMovement,
) -> sqlx::query::Query<'static, sqlx::Sqlite, SqliteArguments<'static>> {
    sqlx::query(sql)
        .bind(movement.id.to_string())
        .bind(movement.kind.as_str())
        .bind(movement.product_id.to_string())
        .bind(movement.supplier_id.map(|s| s.to_string()))
        .bind(movement.order_id.map(|o| o.to_string()))
        .bind(movement.quantity)
        .bind(movement.price)
        .bind(movement.expiry_date)
        .bind(movement.created_at)
}

pub(crate) fn insert_movement(
    movement: &StockMovement,
) -> sqlx::query::Query<'static, sqlx::Sqlite, SqliteArguments<'static>> {
    bind_movement(INSERT_MOVEMENT_SQL, movement)
}

fn stock_item_from_row(row: &SqliteRow) -> DomainResult<StockItem> {
    Ok(StockItem {
        product_id: parse_stored(
            row.try_get::<String, _>("product_id")
                .map_err(map_sqlx)?
                .as_str(),
        )?,
        quantity: row.try_get("quantity").map_err(map_sqlx)?,
    })
}

#[derive(Debug, Clone)]
pub struct LedgerRepository {
    pool: SqlitePool,
}

impl LedgerRepository {
    pub(crate) fn new(pool: SqlitePool) -> Self {
        LedgerRepository { pool }
    }
}

#[async_trait]
impl MovementLedger for LedgerRepository {
    async fn append(&self, movement: &StockMovement) -> DomainResult<()> {
        bounded(async {
            debug!(movement_id = %movement.id, kind = %movement.kind, "appending movement");
            insert_movement(movement)
                .execute(&self.pool)
                .await
                .map_err(map_sqlx)?;
            Ok(())
        })
        .await
    }

    async fn append_deducting(&self, movement: &StockMovement) -> DomainResult<()> {
        bounded(async {
            let mut tx = self.pool.begin().await.map_err(map_sqlx)?;
            let result = bind_movement(INSERT_DEDUCTING_SQL, movement)
                .execute(&mut *tx)
                .await
                .map_err(map_sqlx)?;
            if result.rows_affected() == 0 {
                // Nothing was written; read the balance for the error payload.
                let available: f64 = sqlx::query_scalar(STOCK_OF_SQL)
                    .bind(movement.product_id.to_string())
                    .fetch_one(&mut *tx)
                    .await
                    .map_err(map_sqlx)?;
                return Err(DomainError::InsufficientStock {
                    requested: movement.quantity,
                    available,
                });
            }
            tx.commit().await.map_err(map_sqlx)?;
            debug!(movement_id = %movement.id, kind = %movement.kind, "deducting movement appended");
            Ok(())
        })
        .await
    }

    async fn stock_of(&self, product_id: ProductId) -> DomainResult<f64> {
        bounded(async {
            sqlx::query_scalar(STOCK_OF_SQL)
                .bind(product_id.to_string())
                .fetch_one(&self.pool)
                .await
                .map_err(map_sqlx)
        })
        .await
    }

    async fn inventory(&self) -> DomainResult<Vec<StockItem>> {
        bounded(async {
            sqlx::query(INVENTORY_SQL)
                .fetch_all(&self.pool)
                .await
                .map_err(map_sqlx)?
                .iter()
                .map(stock_item_from_row)
                .collect()
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::testutil::{seed_product, test_db};
    use stockwise_core::OrderId;

    #[tokio::test]
    async fn receipt_write_off_and_over_draw() {
        let db = test_db().await;
        let product = seed_product(&db, "SKU-L1").await;
        let ledger = db.ledger();

        ledger
            .append(&StockMovement::receipt(product, None, 100.0, Some(2.5), None))
            .await
            .unwrap();
        assert_eq!(ledger.stock_of(product).await.unwrap(), 100.0);

        ledger
            .append_deducting(&StockMovement::write_off(product, 40.0))
            .await
            .unwrap();
        assert_eq!(ledger.stock_of(product).await.unwrap(), 60.0);

        let err = ledger
            .append_deducting(&StockMovement::write_off(product, 100.0))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            DomainError::InsufficientStock {
                requested: 100.0,
                available: 60.0
            }
        );
        // The failed deduction wrote nothing.
        assert_eq!(ledger.stock_of(product).await.unwrap(), 60.0);
    }

    #[tokio::test]
    async fn deduction_at_exact_balance() {
        let db = test_db().await;
        let product = seed_product(&db, "SKU-L2").await;
        let ledger = db.ledger();

        ledger
            .append(&StockMovement::receipt(product, None, 5.0, None, None))
            .await
            .unwrap();
        ledger
            .append_deducting(&StockMovement::reserve(product, OrderId::new(), 5.0))
            .await
            .unwrap();
        assert_eq!(ledger.stock_of(product).await.unwrap(), 0.0);
        assert!(matches!(
            ledger
                .append_deducting(&StockMovement::write_off(product, 1.0))
                .await,
            Err(DomainError::InsufficientStock { .. })
        ));
    }

    #[tokio::test]
    async fn inventory_groups_by_product() {
        let db = test_db().await;
        let a = seed_product(&db, "SKU-A").await;
        let b = seed_product(&db, "SKU-B").await;
        let ledger = db.ledger();

        ledger
            .append(&StockMovement::receipt(a, None, 10.0, None, None))
            .await
            .unwrap();
        ledger
            .append(&StockMovement::receipt(b, None, 3.0, None, None))
            .await
            .unwrap();
        ledger
            .append_deducting(&StockMovement::write_off(a, 4.0))
            .await
            .unwrap();

        let inventory = ledger.inventory().await.unwrap();
        assert_eq!(inventory.len(), 2);
        let of = |p: ProductId| {
            inventory
                .iter()
                .find(|i| i.product_id == p)
                .map(|i| i.quantity)
                .unwrap()
        };
        assert_eq!(of(a), 6.0);
        assert_eq!(of(b), 3.0);
    }

    #[tokio::test]
    async fn unmoved_product_has_zero_stock() {
        let db = test_db().await;
        let product = seed_product(&db, "SKU-ZERO").await;
        assert_eq!(db.ledger().stock_of(product).await.unwrap(), 0.0);
        assert!(db.ledger().inventory().await.unwrap().is_empty());
    }
}
