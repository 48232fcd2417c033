//! Order lifecycle service and store port.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use stockwise_catalog::ProductStore;
use stockwise_core::{DomainError, DomainResult, OrderId};
use stockwise_warehouse::StockMovement;

use crate::order::{Order, OrderItem, OrderPolicy, OrderStatus};

/// Persistence port for orders.
#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn list(&self) -> DomainResult<Vec<Order>>;

    /// Load an order hydrated with items and status history.
    async fn find_by_id(&self, id: OrderId) -> DomainResult<Option<Order>>;

    /// Persist the order (row, items, seeded history) together with its
    /// reserve movements in ONE transaction. Any failure leaves nothing
    /// behind.
    async fn create_with_reservations(
        &self,
        order: &Order,
        reservations: &[StockMovement],
    ) -> DomainResult<()>;

    /// Persist a status change: the order's status/updated_at and the last
    /// history entry, in one transaction.
    async fn update_status(&self, order: &Order) -> DomainResult<()>;
}

/// Order lifecycle: creation with automatic reservation, status changes,
/// reads.
pub struct OrderService {
    orders: Arc<dyn OrderStore>,
    products: Arc<dyn ProductStore>,
    policy: OrderPolicy,
}

impl OrderService {
    pub fn new(
        orders: Arc<dyn OrderStore>,
        products: Arc<dyn ProductStore>,
        policy: OrderPolicy,
    ) -> Self {
        OrderService {
            orders,
            products,
            policy,
        }
    }

    pub async fn list(&self) -> DomainResult<Vec<Order>> {
        self.orders.list().await
    }

    pub async fn get(&self, id: OrderId) -> DomainResult<Order> {
        self.orders
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("order"))
    }

    /// Create an order and reserve every item, all-or-nothing.
    ///
    /// Reservation here records the demand without a sufficiency check; an
    /// order may over-reserve. The explicit warehouse `reserve` operation is
    /// the checked path.
    pub async fn create(&self, customer: &str, items: Vec<OrderItem>) -> DomainResult<Order> {
        let customer = customer.trim().to_owned();
        if customer.is_empty() {
            return Err(DomainError::validation("customer is required"));
        }
        if items.is_empty() {
            return Err(DomainError::validation("order must have at least one item"));
        }
        for item in &items {
            if !(item.quantity > 0.0) {
                return Err(DomainError::validation("item quantity must be positive"));
            }
            if !(item.price >= 0.0) {
                return Err(DomainError::validation("item price must not be negative"));
            }
            self.products
                .find_by_id(item.product_id)
                .await?
                .ok_or_else(|| DomainError::not_found("product"))?;
        }

        let order = Order::new(customer, items);
        let reservations: Vec<StockMovement> = order
            .items
            .iter()
            .map(|item| StockMovement::reserve(item.product_id, order.id, item.quantity))
            .collect();

        self.orders
            .create_with_reservations(&order, &reservations)
            .await?;
        info!(order_id = %order.id, items = order.items.len(), "order created");
        Ok(order)
    }

    /// Apply a status transition and record it in the history.
    pub async fn update_status(&self, id: OrderId, target: OrderStatus) -> DomainResult<Order> {
        let mut order = self.get(id).await?;
        order.transition(target, &self.policy)?;
        self.orders.update_status(&order).await?;
        info!(order_id = %order.id, status = %order.status, "order status updated");
        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use stockwise_catalog::{Product, Unit};
    use stockwise_core::{CategoryId, ProductId};

    #[derive(Default)]
    struct MemOrders {
        orders: Mutex<HashMap<OrderId, Order>>,
        movements: Mutex<Vec<StockMovement>>,
        fail_reservations: bool,
    }

    #[async_trait]
    impl OrderStore for MemOrders {
        async fn list(&self) -> DomainResult<Vec<Order>> {
            Ok(self.orders.lock().unwrap().values().cloned().collect())
        }

        async fn find_by_id(&self, id: OrderId) -> DomainResult<Option<Order>> {
            Ok(self.orders.lock().unwrap().get(&id).cloned())
        }

        async fn create_with_reservations(
            &self,
            order: &Order,
            reservations: &[StockMovement],
        ) -> DomainResult<()> {
            if self.fail_reservations {
                // Simulates a mid-transaction failure: nothing is kept.
                return Err(DomainError::backend("write failed"));
            }
            self.orders.lock().unwrap().insert(order.id, order.clone());
            self.movements
                .lock()
                .unwrap()
                .extend(reservations.iter().cloned());
            Ok(())
        }

        async fn update_status(&self, order: &Order) -> DomainResult<()> {
            self.orders.lock().unwrap().insert(order.id, order.clone());
            Ok(())
        }
    }

    struct MemProducts {
        known: Vec<ProductId>,
    }

    #[async_trait]
    impl ProductStore for MemProducts {
        async fn list(&self) -> DomainResult<Vec<Product>> {
            Ok(vec![])
        }

        async fn find_by_id(&self, id: ProductId) -> DomainResult<Option<Product>> {
            let now = Utc::now();
            Ok(self.known.contains(&id).then(|| Product {
                id,
                sku: "SKU".into(),
                name: "stub".into(),
                description: None,
                category_id: CategoryId::new(),
                supplier_id: None,
                unit: Unit::Pcs,
                created_at: now,
                updated_at: now,
            }))
        }

        async fn find_by_sku(&self, _sku: &str) -> DomainResult<Option<Product>> {
            Ok(None)
        }

        async fn insert(&self, _product: &Product) -> DomainResult<()> {
            Ok(())
        }

        async fn update(&self, _product: &Product) -> DomainResult<()> {
            Ok(())
        }

        async fn delete(&self, _id: ProductId) -> DomainResult<()> {
            Ok(())
        }
    }

    fn fixture(product: ProductId) -> (OrderService, Arc<MemOrders>) {
        let store = Arc::new(MemOrders::default());
        let svc = OrderService::new(
            store.clone(),
            Arc::new(MemProducts {
                known: vec![product],
            }),
            OrderPolicy::default(),
        );
        (svc, store)
    }

    fn item(product: ProductId, quantity: f64) -> OrderItem {
        OrderItem {
            product_id: product,
            quantity,
            price: 19.99,
        }
    }

    #[tokio::test]
    async fn create_reserves_every_item() {
        let product = ProductId::new();
        let (svc, store) = fixture(product);
        let order = svc
            .create("ACME Ltd", vec![item(product, 3.0)])
            .await
            .unwrap();

        let movements = store.movements.lock().unwrap();
        assert_eq!(movements.len(), 1);
        assert_eq!(movements[0].order_id, Some(order.id));
        assert_eq!(movements[0].quantity, 3.0);
    }

    #[tokio::test]
    async fn failed_creation_persists_nothing() {
        let product = ProductId::new();
        let store = Arc::new(MemOrders {
            fail_reservations: true,
            ..Default::default()
        });
        let svc = OrderService::new(
            store.clone(),
            Arc::new(MemProducts {
                known: vec![product],
            }),
            OrderPolicy::default(),
        );

        let err = svc.create("ACME Ltd", vec![item(product, 3.0)]).await.unwrap_err();
        assert!(matches!(err, DomainError::Backend(_)));
        assert!(store.orders.lock().unwrap().is_empty());
        assert!(store.movements.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_product_aborts_creation() {
        let (svc, store) = fixture(ProductId::new());
        let err = svc
            .create("ACME Ltd", vec![item(ProductId::new(), 1.0)])
            .await
            .unwrap_err();
        assert_eq!(err, DomainError::not_found("product"));
        assert!(store.orders.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_validates_input() {
        let product = ProductId::new();
        let (svc, _) = fixture(product);
        assert!(matches!(
            svc.create("  ", vec![item(product, 1.0)]).await,
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            svc.create("ACME", vec![]).await,
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            svc.create("ACME", vec![item(product, 0.0)]).await,
            Err(DomainError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn status_update_appends_history() {
        let product = ProductId::new();
        let (svc, _) = fixture(product);
        let order = svc.create("ACME", vec![item(product, 1.0)]).await.unwrap();

        let updated = svc
            .update_status(order.id, OrderStatus::Reserved)
            .await
            .unwrap();
        assert_eq!(updated.status, OrderStatus::Reserved);
        assert_eq!(updated.status_history.len(), 2);

        // Once completed, further updates are rejected.
        svc.update_status(order.id, OrderStatus::Completed).await.unwrap();
        let err = svc
            .update_status(order.id, OrderStatus::Canceled)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidTransition { .. }));
    }

    #[tokio::test]
    async fn unknown_order_is_not_found() {
        let (svc, _) = fixture(ProductId::new());
        assert_eq!(
            svc.update_status(OrderId::new(), OrderStatus::Reserved)
                .await
                .unwrap_err(),
            DomainError::not_found("order")
        );
    }
}
