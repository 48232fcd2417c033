//! Suppliers.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use stockwise_core::{DomainError, DomainResult, SupplierId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supplier {
    pub id: SupplierId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Contact fields applied on create and update.
#[derive(Debug, Clone, Default)]
pub struct SupplierPatch {
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// Persistence port for suppliers.
#[async_trait]
pub trait SupplierStore: Send + Sync {
    async fn list(&self) -> DomainResult<Vec<Supplier>>;

    async fn find_by_id(&self, id: SupplierId) -> DomainResult<Option<Supplier>>;

    async fn insert(&self, supplier: &Supplier) -> DomainResult<()>;

    async fn update(&self, supplier: &Supplier) -> DomainResult<()>;

    async fn delete(&self, id: SupplierId) -> DomainResult<()>;
}

pub struct SupplierService {
    suppliers: Arc<dyn SupplierStore>,
}

impl SupplierService {
    pub fn new(suppliers: Arc<dyn SupplierStore>) -> Self {
        SupplierService { suppliers }
    }

    pub async fn list(&self) -> DomainResult<Vec<Supplier>> {
        self.suppliers.list().await
    }

    pub async fn get(&self, id: SupplierId) -> DomainResult<Supplier> {
        self.suppliers
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("supplier"))
    }

    pub async fn create(&self, patch: SupplierPatch) -> DomainResult<Supplier> {
        let name = patch.name.trim().to_owned();
        if name.is_empty() {
            return Err(DomainError::validation("supplier name is required"));
        }
        let now = Utc::now();
        let supplier = Supplier {
            id: SupplierId::new(),
            name,
            address: trimmed(patch.address),
            phone: trimmed(patch.phone),
            email: trimmed(patch.email),
            created_at: now,
            updated_at: now,
        };
        self.suppliers.insert(&supplier).await?;
        Ok(supplier)
    }

    pub async fn update(&self, id: SupplierId, patch: SupplierPatch) -> DomainResult<Supplier> {
        let name = patch.name.trim().to_owned();
        if name.is_empty() {
            return Err(DomainError::validation("supplier name is required"));
        }
        let mut supplier = self.get(id).await?;
        supplier.name = name;
        supplier.address = trimmed(patch.address);
        supplier.phone = trimmed(patch.phone);
        supplier.email = trimmed(patch.email);
        supplier.updated_at = Utc::now();
        self.suppliers.update(&supplier).await?;
        Ok(supplier)
    }

    pub async fn delete(&self, id: SupplierId) -> DomainResult<()> {
        self.suppliers.delete(id).await
    }
}

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}
