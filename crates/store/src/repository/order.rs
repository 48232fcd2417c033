//! Order rows, hydrated with items and status history.

use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::debug;

use stockwise_core::{DomainError, DomainResult, OrderId};
use stockwise_orders::{Order, OrderItem, OrderStore, StatusEntry};
use stockwise_warehouse::StockMovement;

use crate::error::{bounded, map_sqlx};
use crate::repository::ledger::insert_movement;
use crate::repository::parse_stored;

#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    pub(crate) fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    async fn hydrate(&self, row: &SqliteRow) -> DomainResult<Order> {
        let id: String = row.try_get("id").map_err(map_sqlx)?;

        let items = sqlx::query(
            "SELECT product_id, quantity, price FROM order_items \
             WHERE order_id = ?1 ORDER BY rowid",
        )
        .bind(&id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?
        .iter()
        .map(|r| {
            Ok(OrderItem {
                product_id: parse_stored(
                    r.try_get::<String, _>("product_id").map_err(map_sqlx)?.as_str(),
                )?,
                quantity: r.try_get("quantity").map_err(map_sqlx)?,
                price: r.try_get("price").map_err(map_sqlx)?,
            })
        })
        .collect::<DomainResult<Vec<_>>>()?;

        let status_history = sqlx::query(
            "SELECT status, changed_at FROM order_status_history \
             WHERE order_id = ?1 ORDER BY rowid",
        )
        .bind(&id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?
        .iter()
        .map(|r| {
            Ok(StatusEntry {
                status: parse_stored(r.try_get::<String, _>("status").map_err(map_sqlx)?.as_str())?,
                changed_at: r.try_get("changed_at").map_err(map_sqlx)?,
            })
        })
        .collect::<DomainResult<Vec<_>>>()?;

        Ok(Order {
            id: parse_stored(&id)?,
            customer: row.try_get("customer").map_err(map_sqlx)?,
            status: parse_stored(row.try_get::<String, _>("status").map_err(map_sqlx)?.as_str())?,
            items,
            created_at: row.try_get("created_at").map_err(map_sqlx)?,
            updated_at: row.try_get("updated_at").map_err(map_sqlx)?,
            status_history,
        })
    }
}

#[async_trait]
impl OrderStore for OrderRepository {
    async fn list(&self) -> DomainResult<Vec<Order>> {
        bounded(async {
            let rows = sqlx::query("SELECT * FROM orders ORDER BY created_at")
                .fetch_all(&self.pool)
                .await
                .map_err(map_sqlx)?;
            let mut orders = Vec::with_capacity(rows.len());
            for row in &rows {
                orders.push(self.hydrate(row).await?);
            }
            Ok(orders)
        })
        .await
    }

    async fn find_by_id(&self, id: OrderId) -> DomainResult<Option<Order>> {
        bounded(async {
            let row = sqlx::query("SELECT * FROM orders WHERE id = ?1")
                .bind(id.to_string())
                .fetch_optional(&self.pool)
                .await
                .map_err(map_sqlx)?;
            match row {
                Some(row) => Ok(Some(self.hydrate(&row).await?)),
                None => Ok(None),
            }
        })
        .await
    }

    async fn create_with_reservations(
        &self,
        order: &Order,
        reservations: &[StockMovement],
    ) -> DomainResult<()> {
        bounded(async {
            let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

            sqlx::query(
                "INSERT INTO orders (id, customer, status, created_at, updated_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )
            .bind(order.id.to_string())
            .bind(&order.customer)
            .bind(order.status.as_str())
            .bind(order.created_at)
            .bind(order.updated_at)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx)?;

            for item in &order.items {
                sqlx::query(
                    "INSERT INTO order_items (order_id, product_id, quantity, price) \
                     VALUES (?1, ?2, ?3, ?4)",
                )
                .bind(order.id.to_string())
                .bind(item.product_id.to_string())
                .bind(item.quantity)
                .bind(item.price)
                .execute(&mut *tx)
                .await
                .map_err(map_sqlx)?;
            }

            for entry in &order.status_history {
                sqlx::query(
                    "INSERT INTO order_status_history (order_id, status, changed_at) \
                     VALUES (?1, ?2, ?3)",
                )
                .bind(order.id.to_string())
                .bind(entry.status.as_str())
                .bind(entry.changed_at)
                .execute(&mut *tx)
                .await
                .map_err(map_sqlx)?;
            }

            for movement in reservations {
                insert_movement(movement)
                    .execute(&mut *tx)
                    .await
                    .map_err(map_sqlx)?;
            }

            tx.commit().await.map_err(map_sqlx)?;
            debug!(order_id = %order.id, reservations = reservations.len(), "order persisted");
            Ok(())
        })
        .await
    }

    async fn update_status(&self, order: &Order) -> DomainResult<()> {
        bounded(async {
            let entry = order
                .last_status_entry()
                .ok_or_else(|| DomainError::backend("order has no status history"))?;

            let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

            let result =
                sqlx::query("UPDATE orders SET status = ?2, updated_at = ?3 WHERE id = ?1")
                    .bind(order.id.to_string())
                    .bind(order.status.as_str())
                    .bind(order.updated_at)
                    .execute(&mut *tx)
                    .await
                    .map_err(map_sqlx)?;
            if result.rows_affected() == 0 {
                return Err(DomainError::not_found("order"));
            }

            sqlx::query(
                "INSERT INTO order_status_history (order_id, status, changed_at) \
                 VALUES (?1, ?2, ?3)",
            )
            .bind(order.id.to_string())
            .bind(entry.status.as_str())
            .bind(entry.changed_at)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx)?;

            tx.commit().await.map_err(map_sqlx)?;
            Ok(())
        })
        .await
    }
}
