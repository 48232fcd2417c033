//! Category rows.

use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use stockwise_catalog::{Category, CategoryStore};
use stockwise_core::{CategoryId, DomainError, DomainResult};

use crate::error::{bounded, map_sqlx, map_sqlx_delete};
use crate::repository::parse_stored;

#[derive(Debug, Clone)]
pub struct CategoryRepository {
    pool: SqlitePool,
}

impl CategoryRepository {
    pub(crate) fn new(pool: SqlitePool) -> Self {
        CategoryRepository { pool }
    }
}

fn category_from_row(row: &SqliteRow) -> DomainResult<Category> {
    Ok(Category {
        id: parse_stored(row.try_get::<String, _>("id").map_err(map_sqlx)?.as_str())?,
        name: row.try_get("name").map_err(map_sqlx)?,
        created_at: row.try_get("created_at").map_err(map_sqlx)?,
        updated_at: row.try_get("updated_at").map_err(map_sqlx)?,
    })
}

#[async_trait]
impl CategoryStore for CategoryRepository {
    async fn list(&self) -> DomainResult<Vec<Category>> {
        bounded(async {
            sqlx::query("SELECT * FROM categories ORDER BY name")
                .fetch_all(&self.pool)
                .await
                .map_err(map_sqlx)?
                .iter()
                .map(category_from_row)
                .collect()
        })
        .await
    }

    async fn find_by_id(&self, id: CategoryId) -> DomainResult<Option<Category>> {
        bounded(async {
            sqlx::query("SELECT * FROM categories WHERE id = ?1")
                .bind(id.to_string())
                .fetch_optional(&self.pool)
                .await
                .map_err(map_sqlx)?
                .map(|row| category_from_row(&row))
                .transpose()
        })
        .await
    }

    async fn insert(&self, category: &Category) -> DomainResult<()> {
        bounded(async {
            sqlx::query(
                "INSERT INTO categories (id, name, created_at, updated_at) \
                 VALUES (?1, ?2, ?3, ?4)",
            )
            .bind(category.id.to_string())
            .bind(&category.name)
            .bind(category.created_at)
            .bind(category.updated_at)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
            Ok(())
        })
        .await
    }

    async fn update(&self, category: &Category) -> DomainResult<()> {
        bounded(async {
            let result = sqlx::query(
                "UPDATE categories SET name = ?2, updated_at = ?3 WHERE id = ?1",
            )
            .bind(category.id.to_string())
            .bind(&category.name)
            .bind(category.updated_at)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
            if result.rows_affected() == 0 {
                return Err(DomainError::not_found("category"));
            }
            Ok(())
        })
        .await
    }

    async fn delete(&self, id: CategoryId) -> DomainResult<()> {
        bounded(async {
            let result = sqlx::query("DELETE FROM categories WHERE id = ?1")
                .bind(id.to_string())
                .execute(&self.pool)
                .await
                .map_err(map_sqlx_delete)?;
            if result.rows_affected() == 0 {
                return Err(DomainError::not_found("category"));
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

    fn category(name: &str) -> Category {
        let now = Utc::now();
        Category {
            id: CategoryId::new(),
            name: name.into(),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn crud_round_trip() {
        let db = test_db().await;
        let repo = db.categories();
        let mut c = category("Beverages");
        repo.insert(&c).await.unwrap();

        c.name = "Drinks".into();
        repo.update(&c).await.unwrap();
        let fetched = repo.find_by_id(c.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "Drinks");

        repo.delete(c.id).await.unwrap();
        assert!(repo.find_by_id(c.id).await.unwrap().is_none());
        assert!(matches!(
            repo.delete(c.id).await,
            Err(DomainError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn delete_of_category_with_products_is_conflict() {
        let db = test_db().await;
        crate::repository::testutil::seed_product(&db, "SKU-CAT").await;
        let categories = db.categories().list().await.unwrap();
        assert_eq!(categories.len(), 1);

        let err = db.categories().delete(categories[0].id).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn duplicate_name_is_conflict() {
        let db = test_db().await;
        let repo = db.categories();
        repo.insert(&category("Snacks")).await.unwrap();
        assert!(matches!(
            repo.insert(&category("Snacks")).await,
            Err(DomainError::Conflict(_))
        ));
    }
}
