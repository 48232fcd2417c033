//! User rows.

use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use stockwise_auth::{User, UserStore};
use stockwise_core::{DomainResult, UserId};

use crate::error::{bounded, map_sqlx};
use crate::repository::parse_stored;

#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub(crate) fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }
}

fn user_from_row(row: &SqliteRow) -> DomainResult<User> {
    Ok(User {
        id: parse_stored(row.try_get::<String, _>("id").map_err(map_sqlx)?.as_str())?,
        email: row.try_get("email").map_err(map_sqlx)?,
        password_hash: row.try_get("password_hash").map_err(map_sqlx)?,
        role: parse_stored(row.try_get::<String, _>("role").map_err(map_sqlx)?.as_str())?,
        created_at: row.try_get("created_at").map_err(map_sqlx)?,
        updated_at: row.try_get("updated_at").map_err(map_sqlx)?,
    })
}

#[async_trait]
impl UserStore for UserRepository {
    async fn insert(&self, user: &User) -> DomainResult<()> {
        bounded(async {
            sqlx::query(
                "INSERT INTO users (id, email, password_hash, role, created_at, updated_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )
            .bind(user.id.to_string())
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.role.as_str())
            .bind(user.created_at)
            .bind(user.updated_at)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
            Ok(())
        })
        .await
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        bounded(async {
            sqlx::query("SELECT * FROM users WHERE email = ?1")
                .bind(email)
                .fetch_optional(&self.pool)
                .await
                .map_err(map_sqlx)?
                .map(|row| user_from_row(&row))
                .transpose()
        })
        .await
    }

    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>> {
        bounded(async {
            sqlx::query("SELECT * FROM users WHERE id = ?1")
                .bind(id.to_string())
                .fetch_optional(&self.pool)
                .await
                .map_err(map_sqlx)?
                .map(|row| user_from_row(&row))
                .transpose()
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::testutil::test_db;
    use chrono::Utc;
    use stockwise_auth::Role;
    use stockwise_core::DomainError;

    fn user(email: &str) -> User {
        let now = Utc::now();
        User {
            id: UserId::new(),
            email: email.into(),
            password_hash: "$argon2id$stub".into(),
            role: Role::Storekeeper,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn insert_and_find() {
        let db = test_db().await;
        let repo = db.users();
        let u = user("ops@example.com");
        repo.insert(&u).await.unwrap();

        let by_email = repo.find_by_email("ops@example.com").await.unwrap().unwrap();
        assert_eq!(by_email, u);
        let by_id = repo.find_by_id(u.id).await.unwrap().unwrap();
        assert_eq!(by_id, u);
        assert!(repo.find_by_email("ghost@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_email_is_conflict() {
        let db = test_db().await;
        let repo = db.users();
        repo.insert(&user("dup@example.com")).await.unwrap();
        let err = repo.insert(&user("dup@example.com")).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }
}
