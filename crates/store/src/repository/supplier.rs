//! Supplier rows.

use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use stockwise_catalog::{Supplier, SupplierStore};
use stockwise_core::{DomainError, DomainResult, SupplierId};

use crate::error::{bounded, map_sqlx, map_sqlx_delete};
use crate::repository::parse_stored;

#[derive(Debug, Clone)]
pub struct SupplierRepository {
    pool: SqlitePool,
}

impl SupplierRepository {
    pub(crate) fn new(pool: SqlitePool) -> Self {
        SupplierRepository { pool }
    }
}

fn supplier_from_row(row: &SqliteRow) -> DomainResult<Supplier> {
    Ok(Supplier {
        id: parse_stored(row.try_get::<String, _>("id").map_err(map_sqlx)?.as_str())?,
        name: row.try_get("name").map_err(map_sqlx)?,
        address: row.try_get("address").map_err(map_sqlx)?,
        phone: row.try_get("phone").map_err(map_sqlx)?,
        email: row.try_get("email").map_err(map_sqlx)?,
        created_at: row.try_get("created_at").map_err(map_sqlx)?,
        updated_at: row.try_get("updated_at").map_err(map_sqlx)?,
    })
}

#[async_trait]
impl SupplierStore for SupplierRepository {
    async fn list(&self) -> DomainResult<Vec<Supplier>> {
        bounded(async {
            sqlx::query("SELECT * FROM suppliers ORDER BY name")
                .fetch_all(&self.pool)
                .await
                .map_err(map_sqlx)?
                .iter()
                .map(supplier_from_row)
                .collect()
        })
        .await
    }

    async fn find_by_id(&self, id: SupplierId) -> DomainResult<Option<Supplier>> {
        bounded(async {
            sqlx::query("SELECT * FROM suppliers WHERE id = ?1")
                .bind(id.to_string())
                .fetch_optional(&self.pool)
                .await
                .map_err(map_sqlx)?
                .map(|row| supplier_from_row(&row))
                .transpose()
        })
        .await
    }

    async fn insert(&self, supplier: &Supplier) -> DomainResult<()> {
        bounded(async {
            sqlx::query(
                "INSERT INTO suppliers (id, name, address, phone, email, created_at, updated_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )
            .bind(supplier.id.to_string())
            .bind(&supplier.name)
            .bind(&supplier.address)
            .bind(&supplier.phone)
            .bind(&supplier.email)
            .bind(supplier.created_at)
            .bind(supplier.updated_at)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
            Ok(())
        })
        .await
    }

    async fn update(&self, supplier: &Supplier) -> DomainResult<()> {
        bounded(async {
            let result = sqlx::query(
                "UPDATE suppliers SET name = ?2, address = ?3, phone = ?4, email = ?5, \
                 updated_at = ?6 WHERE id = ?1",
            )
            .bind(supplier.id.to_string())
            .bind(&supplier.name)
            .bind(&supplier.address)
            .bind(&supplier.phone)
            .bind(&supplier.email)
            .bind(supplier.updated_at)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
            if result.rows_affected() == 0 {
                return Err(DomainError::not_found("supplier"));
            }
            Ok(())
        })
        .await
    }

    async fn delete(&self, id: SupplierId) -> DomainResult<()> {
        bounded(async {
            let result = sqlx::query("DELETE FROM suppliers WHERE id = ?1")
                .bind(id.to_string())
                .execute(&self.pool)
                .await
                .map_err(map_sqlx_delete)?;
            if result.rows_affected() == 0 {
                return Err(DomainError::not_found("supplier"));
            }
            Ok(())
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::testutil::test_db;
    use chrono::Utc;

    #[tokio::test]
    async fn optional_contact_fields_round_trip() {
        let db = test_db().await;
        let repo = db.suppliers();
        let now = Utc::now();
        let supplier = Supplier {
            id: SupplierId::new(),
            name: "Fresh Farms".into(),
            address: None,
            phone: Some("+1-555-0100".into()),
            email: None,
            created_at: now,
            updated_at: now,
        };
        repo.insert(&supplier).await.unwrap();
        let fetched = repo.find_by_id(supplier.id).await.unwrap().unwrap();
        assert_eq!(fetched, supplier);
    }
}
