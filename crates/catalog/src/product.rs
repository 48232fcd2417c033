//! Product model, store port and service.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use core::str::FromStr;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use stockwise_core::{CategoryId, DomainError, DomainResult, ProductId, SupplierId};

use crate::category::CategoryStore;

/// Unit of measure for a product quantity.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Pcs,
    Kg,
    L,
    Box,
}

impl Unit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Pcs => "pcs",
            Unit::Kg => "kg",
            Unit::L => "l",
            Unit::Box => "box",
        }
    }
}

impl core::fmt::Display for Unit {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Unit {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pcs" => Ok(Unit::Pcs),
            "kg" => Ok(Unit::Kg),
            "l" => Ok(Unit::L),
            "box" => Ok(Unit::Box),
            other => Err(DomainError::validation(format!("unknown unit: {other}"))),
        }
    }
}

/// Catalog product. Stock on hand is never stored here; it is derived from
/// the movement ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub sku: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub category_id: CategoryId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier_id: Option<SupplierId>,
    pub unit: Unit,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for product creation.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub sku: String,
    pub name: String,
    pub description: Option<String>,
    pub category_id: CategoryId,
    pub supplier_id: Option<SupplierId>,
    pub unit: Unit,
}

/// Input for product update; all descriptive fields are replaced.
#[derive(Debug, Clone)]
pub struct ProductPatch {
    pub sku: String,
    pub name: String,
    pub description: Option<String>,
    pub category_id: CategoryId,
    pub supplier_id: Option<SupplierId>,
    pub unit: Unit,
}

/// Persistence port for products.
#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn list(&self) -> DomainResult<Vec<Product>>;

    async fn find_by_id(&self, id: ProductId) -> DomainResult<Option<Product>>;

    async fn find_by_sku(&self, sku: &str) -> DomainResult<Option<Product>>;

    /// Insert; duplicate SKU must surface as `Conflict`.
    async fn insert(&self, product: &Product) -> DomainResult<()>;

    async fn update(&self, product: &Product) -> DomainResult<()>;

    /// Delete; `NotFound` when the id does not exist.
    async fn delete(&self, id: ProductId) -> DomainResult<()>;
}

/// Business rules for the product catalog.
pub struct ProductService {
    products: Arc<dyn ProductStore>,
    categories: Arc<dyn CategoryStore>,
}

impl ProductService {
    pub fn new(products: Arc<dyn ProductStore>, categories: Arc<dyn CategoryStore>) -> Self {
        ProductService {
            products,
            categories,
        }
    }

    pub async fn list(&self) -> DomainResult<Vec<Product>> {
        self.products.list().await
    }

    pub async fn get(&self, id: ProductId) -> DomainResult<Product> {
        self.products
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("product"))
    }

    pub async fn create(&self, input: NewProduct) -> DomainResult<Product> {
        let sku = input.sku.trim().to_owned();
        let name = input.name.trim().to_owned();
        if sku.is_empty() || name.is_empty() {
            return Err(DomainError::validation("sku and name are required"));
        }

        // Uniqueness is a business rule here, not just a storage constraint;
        // the UNIQUE index backs it up under races.
        if self.products.find_by_sku(&sku).await?.is_some() {
            return Err(DomainError::conflict(format!("sku '{sku}' already exists")));
        }
        self.require_category(input.category_id).await?;

        let now = Utc::now();
        let product = Product {
            id: ProductId::new(),
            sku,
            name,
            description: input.description.filter(|d| !d.trim().is_empty()),
            category_id: input.category_id,
            supplier_id: input.supplier_id,
            unit: input.unit,
            created_at: now,
            updated_at: now,
        };
        self.products.insert(&product).await?;
        info!(product_id = %product.id, sku = %product.sku, "product created");
        Ok(product)
    }

    pub async fn update(&self, id: ProductId, patch: ProductPatch) -> DomainResult<Product> {
        let mut product = self.get(id).await?;

        let sku = patch.sku.trim().to_owned();
        let name = patch.name.trim().to_owned();
        if sku.is_empty() || name.is_empty() {
            return Err(DomainError::validation("sku and name are required"));
        }
        if sku != product.sku {
            if self.products.find_by_sku(&sku).await?.is_some() {
                return Err(DomainError::conflict(format!("sku '{sku}' already exists")));
            }
        }
        self.require_category(patch.category_id).await?;

        product.sku = sku;
        product.name = name;
        product.description = patch.description.filter(|d| !d.trim().is_empty());
        product.category_id = patch.category_id;
        product.supplier_id = patch.supplier_id;
        product.unit = patch.unit;
        product.updated_at = Utc::now();

        self.products.update(&product).await?;
        Ok(product)
    }

    pub async fn delete(&self, id: ProductId) -> DomainResult<()> {
        self.products.delete(id).await
    }

    async fn require_category(&self, id: CategoryId) -> DomainResult<()> {
        self.categories
            .find_by_id(id)
            .await?
            .map(|_| ())
            .ok_or_else(|| DomainError::not_found("category"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::Category;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemProducts {
        rows: Mutex<HashMap<ProductId, Product>>,
    }

    #[async_trait]
    impl ProductStore for MemProducts {
        async fn list(&self) -> DomainResult<Vec<Product>> {
            Ok(self.rows.lock().unwrap().values().cloned().collect())
        }

        async fn find_by_id(&self, id: ProductId) -> DomainResult<Option<Product>> {
            Ok(self.rows.lock().unwrap().get(&id).cloned())
        }

        async fn find_by_sku(&self, sku: &str) -> DomainResult<Option<Product>> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .values()
                .find(|p| p.sku == sku)
                .cloned())
        }

        async fn insert(&self, product: &Product) -> DomainResult<()> {
            self.rows
                .lock()
                .unwrap()
                .insert(product.id, product.clone());
            Ok(())
        }

        async fn update(&self, product: &Product) -> DomainResult<()> {
            self.rows
                .lock()
                .unwrap()
                .insert(product.id, product.clone());
            Ok(())
        }

        async fn delete(&self, id: ProductId) -> DomainResult<()> {
            self.rows
                .lock()
                .unwrap()
                .remove(&id)
                .map(|_| ())
                .ok_or_else(|| DomainError::not_found("product"))
        }
    }

    struct MemCategories {
        known: Vec<CategoryId>,
    }

    #[async_trait]
    impl CategoryStore for MemCategories {
        async fn list(&self) -> DomainResult<Vec<Category>> {
            Ok(vec![])
        }

        async fn find_by_id(&self, id: CategoryId) -> DomainResult<Option<Category>> {
            Ok(self.known.contains(&id).then(|| Category {
                id,
                name: "stub".into(),
                created_at: Utc::now(),
                updated_at: Utc::now(),
            }))
        }

        async fn insert(&self, _category: &Category) -> DomainResult<()> {
            Ok(())
        }

        async fn update(&self, _category: &Category) -> DomainResult<()> {
            Ok(())
        }

        async fn delete(&self, _id: CategoryId) -> DomainResult<()> {
            Ok(())
        }
    }

    fn service(category: CategoryId) -> ProductService {
        ProductService::new(
            Arc::new(MemProducts::default()),
            Arc::new(MemCategories {
                known: vec![category],
            }),
        )
    }

    fn new_product(category: CategoryId, sku: &str) -> NewProduct {
        NewProduct {
            sku: sku.into(),
            name: "Widget".into(),
            description: None,
            category_id: category,
            supplier_id: None,
            unit: Unit::Pcs,
        }
    }

    #[tokio::test]
    async fn create_and_get() {
        let category = CategoryId::new();
        let svc = service(category);
        let created = svc.create(new_product(category, "SKU-1")).await.unwrap();
        let fetched = svc.get(created.id).await.unwrap();
        assert_eq!(created, fetched);
    }

    #[tokio::test]
    async fn duplicate_sku_conflicts() {
        let category = CategoryId::new();
        let svc = service(category);
        svc.create(new_product(category, "SKU-1")).await.unwrap();
        let err = svc.create(new_product(category, "SKU-1")).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn unknown_category_is_not_found() {
        let svc = service(CategoryId::new());
        let err = svc
            .create(new_product(CategoryId::new(), "SKU-2"))
            .await
            .unwrap_err();
        assert_eq!(err, DomainError::not_found("category"));
    }

    #[tokio::test]
    async fn blank_sku_is_rejected() {
        let category = CategoryId::new();
        let svc = service(category);
        let err = svc.create(new_product(category, "   ")).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
