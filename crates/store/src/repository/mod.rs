//! One repository per port. Identifiers, enum tags and timestamps are
//! stored as TEXT; rows that fail to parse back are reported as `Backend`
//! faults, not validation errors.

pub mod category;
pub mod ledger;
pub mod order;
pub mod product;
pub mod supplier;
pub mod user;

use core::str::FromStr;

use stockwise_core::{DomainError, DomainResult};

/// Parse a stored identifier or enum tag. Failures mean the row is corrupt.
pub(crate) fn parse_stored<T>(value: &str) -> DomainResult<T>
where
    T: FromStr<Err = DomainError>,
{
    value
        .parse()
        .map_err(|_| DomainError::backend(format!("corrupt stored value: {value}")))
}

#[cfg(test)]
pub(crate) mod testutil {
    use chrono::Utc;
    use stockwise_catalog::{Category, CategoryStore, Product, ProductStore, Unit};
    use stockwise_core::{CategoryId, ProductId};

    use crate::pool::{Database, DbConfig};

    pub(crate) async fn test_db() -> Database {
        Database::connect(DbConfig::in_memory()).await.unwrap()
    }

    /// Insert a category and one product; returns the product id.
    pub(crate) async fn seed_product(db: &Database, sku: &str) -> ProductId {
        let now = Utc::now();
        let category = Category {
            id: CategoryId::new(),
            name: format!("category-{sku}"),
            created_at: now,
            updated_at: now,
        };
        db.categories().insert(&category).await.unwrap();

        let product = Product {
            id: ProductId::new(),
            sku: sku.to_owned(),
            name: format!("product-{sku}"),
            description: None,
            category_id: category.id,
            supplier_id: None,
            unit: Unit::Pcs,
            created_at: now,
            updated_at: now,
        };
        db.products().insert(&product).await.unwrap();
        product.id
    }
}
