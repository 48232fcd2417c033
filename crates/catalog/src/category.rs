//! Product categories.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use stockwise_core::{CategoryId, DomainError, DomainResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Persistence port for categories.
#[async_trait]
pub trait CategoryStore: Send + Sync {
    async fn list(&self) -> DomainResult<Vec<Category>>;

    async fn find_by_id(&self, id: CategoryId) -> DomainResult<Option<Category>>;

    /// Insert; duplicate name must surface as `Conflict`.
    async fn insert(&self, category: &Category) -> DomainResult<()>;

    async fn update(&self, category: &Category) -> DomainResult<()>;

    async fn delete(&self, id: CategoryId) -> DomainResult<()>;
}

pub struct CategoryService {
    categories: Arc<dyn CategoryStore>,
}

impl CategoryService {
    pub fn new(categories: Arc<dyn CategoryStore>) -> Self {
        CategoryService { categories }
    }

    pub async fn list(&self) -> DomainResult<Vec<Category>> {
        self.categories.list().await
    }

    pub async fn get(&self, id: CategoryId) -> DomainResult<Category> {
        self.categories
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("category"))
    }

    pub async fn create(&self, name: &str) -> DomainResult<Category> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("category name is required"));
        }
        let now = Utc::now();
        let category = Category {
            id: CategoryId::new(),
            name: name.to_owned(),
            created_at: now,
            updated_at: now,
        };
        self.categories.insert(&category).await?;
        Ok(category)
    }

    pub async fn update(&self, id: CategoryId, name: &str) -> DomainResult<Category> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("category name is required"));
        }
        let mut category = self.get(id).await?;
        category.name = name.to_owned();
        category.updated_at = Utc::now();
        self.categories.update(&category).await?;
        Ok(category)
    }

    pub async fn delete(&self, id: CategoryId) -> DomainResult<()> {
        self.categories.delete(id).await
    }
}
