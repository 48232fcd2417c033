//! Service construction: every port gets its SQLite repository.

use std::sync::Arc;

use stockwise_auth::{AuthService, TokenManager, UserStore};
use stockwise_catalog::{
    CategoryService, CategoryStore, ProductService, ProductStore, SupplierService, SupplierStore,
};
use stockwise_orders::{OrderPolicy, OrderService, OrderStore};
use stockwise_store::Database;
use stockwise_warehouse::{MovementLedger, WarehouseService};

pub struct AppServices {
    pub auth: AuthService,
    pub products: ProductService,
    pub categories: CategoryService,
    pub suppliers: SupplierService,
    pub warehouse: WarehouseService,
    pub orders: OrderService,
}

pub fn build_services(db: &Database, tokens: TokenManager) -> AppServices {
    let users: Arc<dyn UserStore> = Arc::new(db.users());
    let products: Arc<dyn ProductStore> = Arc::new(db.products());
    let categories: Arc<dyn CategoryStore> = Arc::new(db.categories());
    let suppliers: Arc<dyn SupplierStore> = Arc::new(db.suppliers());
    let ledger: Arc<dyn MovementLedger> = Arc::new(db.ledger());
    let orders: Arc<dyn OrderStore> = Arc::new(db.orders());

    AppServices {
        auth: AuthService::new(users, tokens),
        products: ProductService::new(products.clone(), categories.clone()),
        categories: CategoryService::new(categories),
        suppliers: SupplierService::new(suppliers),
        warehouse: WarehouseService::new(ledger, products.clone()),
        orders: OrderService::new(orders, products, OrderPolicy::default()),
    }
}
