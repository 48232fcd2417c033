//! Product rows.

use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use stockwise_catalog::{Product, ProductStore};
use stockwise_core::{DomainError, DomainResult, ProductId};

use crate::error::{bounded, map_sqlx, map_sqlx_delete};
use crate::repository::parse_stored;

#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    pub(crate) fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }
}

fn product_from_row(row: &SqliteRow) -> DomainResult<Product> {
    let supplier_id = row
        .try_get::<Option<String>, _>("supplier_id")
        .map_err(map_sqlx)?
        .map(|s| parse_stored(&s))
        .transpose()?;
    Ok(Product {
        id: parse_stored(row.try_get::<String, _>("id").map_err(map_sqlx)?.as_str())?,
        sku: row.try_get("sku").map_err(map_sqlx)?,
        name: row.try_get("name").map_err(map_sqlx)?,
        description: row.try_get("description").map_err(map_sqlx)?,
        category_id: parse_stored(
            row.try_get::<String, _>("category_id")
                .map_err(map_sqlx)?
                .as_str(),
        )?,
        supplier_id,
        unit: parse_stored(row.try_get::<String, _>("unit").map_err(map_sqlx)?.as_str())?,
        created_at: row.try_get("created_at").map_err(map_sqlx)?,
        updated_at: row.try_get("updated_at").map_err(map_sqlx)?,
    })
}

#[async_trait]
impl ProductStore for ProductRepository {
    async fn list(&self) -> DomainResult<Vec<Product>> {
        bounded(async {
            sqlx::query("SELECT * FROM products ORDER BY sku")
                .fetch_all(&self.pool)
                .await
                .map_err(map_sqlx)?
                .iter()
                .map(product_from_row)
                .collect()
        })
        .await
    }

    async fn find_by_id(&self, id: ProductId) -> DomainResult<Option<Product>> {
        bounded(async {
            sqlx::query("SELECT * FROM products WHERE id = ?1")
                .bind(id.to_string())
                .fetch_optional(&self.pool)
                .await
                .map_err(map_sqlx)?
                .map(|row| product_from_row(&row))
                .transpose()
        })
        .await
    }

    async fn find_by_sku(&self, sku: &str) -> DomainResult<Option<Product>> {
        bounded(async {
            sqlx::query("SELECT * FROM products WHERE sku = ?1")
                .bind(sku)
                .fetch_optional(&self.pool)
                .await
                .map_err(map_sqlx)?
                .map(|row| product_from_row(&row))
                .transpose()
        })
        .await
    }

    async fn insert(&self, product: &Product) -> DomainResult<()> {
        bounded(async {
            sqlx::query(
                "INSERT INTO products \
                 (id, sku, name, description, category_id, supplier_id, unit, created_at, updated_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            )
            .bind(product.id.to_string())
            .bind(&product.sku)
            .bind(&product.name)
            .bind(&product.description)
            .bind(product.category_id.to_string())
            .bind(product.supplier_id.map(|s| s.to_string()))
            .bind(product.unit.as_str())
            .bind(product.created_at)
            .bind(product.updated_at)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
            Ok(())
        })
        .await
    }

    async fn update(&self, product: &Product) -> DomainResult<()> {
        bounded(async {
            let result = sqlx::query(
                "UPDATE products SET sku = ?2, name = ?3, description = ?4, category_id = ?5, \
                 supplier_id = ?6, unit = ?7, updated_at = ?8 WHERE id = ?1",
            )
            .bind(product.id.to_string())
            .bind(&product.sku)
            .bind(&product.name)
            .bind(&product.description)
            .bind(product.category_id.to_string())
            .bind(product.supplier_id.map(|s| s.to_string()))
            .bind(product.unit.as_str())
            .bind(product.updated_at)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
            if result.rows_affected() == 0 {
                return Err(DomainError::not_found("product"));
            }
            Ok(())
        })
        .await
    }

    async fn delete(&self, id: ProductId) -> DomainResult<()> {
        bounded(async {
            let result = sqlx::query("DELETE FROM products WHERE id = ?1")
                .bind(id.to_string())
                .execute(&self.pool)
                .await
                .map_err(map_sqlx_delete)?;
            if result.rows_affected() == 0 {
                return Err(DomainError::not_found("product"));
            }
            Ok(())
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::testutil::{seed_product, test_db};
    use chrono::Utc;
    use stockwise_catalog::Unit;
    use stockwise_core::CategoryId;

    #[tokio::test]
    async fn seeded_product_round_trips() {
        let db = test_db().await;
        let id = seed_product(&db, "SKU-100").await;
        let fetched = db.products().find_by_id(id).await.unwrap().unwrap();
        assert_eq!(fetched.sku, "SKU-100");
        assert_eq!(fetched.unit, Unit::Pcs);
        let by_sku = db.products().find_by_sku("SKU-100").await.unwrap().unwrap();
        assert_eq!(by_sku.id, id);
    }

    #[tokio::test]
    async fn duplicate_sku_is_conflict() {
        let db = test_db().await;
        seed_product(&db, "SKU-1").await;
        let now = Utc::now();
        let dup = Product {
            id: ProductId::new(),
            sku: "SKU-1".into(),
            name: "other".into(),
            description: None,
            category_id: CategoryId::new(),
            supplier_id: None,
            unit: Unit::Kg,
            created_at: now,
            updated_at: now,
        };
        // Category FK would also fire; the UNIQUE check on sku fires first.
        let err = db.products().insert(&dup).await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::Conflict(_) | DomainError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn delete_of_product_with_movements_is_conflict() {
        use stockwise_warehouse::{MovementLedger, StockMovement};

        let db = test_db().await;
        let id = seed_product(&db, "SKU-HELD").await;
        db.ledger()
            .append(&StockMovement::receipt(id, None, 3.0, None, None))
            .await
            .unwrap();

        let err = db.products().delete(id).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
        // The product survived the refused delete.
        assert!(db.products().find_by_id(id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn unknown_category_fk_is_rejected() {
        let db = test_db().await;
        let now = Utc::now();
        let orphan = Product {
            id: ProductId::new(),
            sku: "SKU-ORPHAN".into(),
            name: "orphan".into(),
            description: None,
            category_id: CategoryId::new(),
            supplier_id: None,
            unit: Unit::Pcs,
            created_at: now,
            updated_at: now,
        };
        assert!(matches!(
            db.products().insert(&orphan).await,
            Err(DomainError::NotFound(_))
        ));
    }
}
