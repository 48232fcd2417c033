//! Order aggregate: status machine, items, history.

use chrono::{DateTime, Utc};
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use stockwise_core::{DomainError, DomainResult, OrderId, ProductId};

/// Order lifecycle state.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    New,
    Reserved,
    Completed,
    Canceled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::New => "new",
            OrderStatus::Reserved => "reserved",
            OrderStatus::Completed => "completed",
            OrderStatus::Canceled => "canceled",
        }
    }

    /// Terminal states accept no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Canceled)
    }
}

impl core::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(OrderStatus::New),
            "reserved" => Ok(OrderStatus::Reserved),
            "completed" => Ok(OrderStatus::Completed),
            "canceled" => Ok(OrderStatus::Canceled),
            other => Err(DomainError::validation(format!(
                "unknown order status: {other}"
            ))),
        }
    }
}

/// Which target statuses a transition may land on. The source-state rule
/// (terminal states are frozen) is not configurable; the target set is.
#[derive(Debug, Clone)]
pub struct OrderPolicy {
    pub allowed_targets: Vec<OrderStatus>,
}

impl OrderPolicy {
    pub fn allows(&self, target: OrderStatus) -> bool {
        self.allowed_targets.contains(&target)
    }
}

impl Default for OrderPolicy {
    fn default() -> Self {
        OrderPolicy {
            allowed_targets: vec![
                OrderStatus::New,
                OrderStatus::Reserved,
                OrderStatus::Completed,
                OrderStatus::Canceled,
            ],
        }
    }
}

/// A line in an order. Immutable once the order exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: ProductId,
    pub quantity: f64,
    /// Sale price per unit.
    pub price: f64,
}

/// One entry in the append-only status history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusEntry {
    pub status: OrderStatus,
    pub changed_at: DateTime<Utc>,
}

/// Customer order. The customer is a plain string; there is no customer
/// entity. Orders are never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub customer: String,
    pub status: OrderStatus,
    pub items: Vec<OrderItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub status_history: Vec<StatusEntry>,
}

impl Order {
    /// New order in status `new`, history seeded with the creation entry.
    pub fn new(customer: String, items: Vec<OrderItem>) -> Self {
        let now = Utc::now();
        Order {
            id: OrderId::new(),
            customer,
            status: OrderStatus::New,
            items,
            created_at: now,
            updated_at: now,
            status_history: vec![StatusEntry {
                status: OrderStatus::New,
                changed_at: now,
            }],
        }
    }

    /// Move to `target` if the lifecycle and the policy permit it, appending
    /// a history entry and bumping `updated_at`.
    pub fn transition(&mut self, target: OrderStatus, policy: &OrderPolicy) -> DomainResult<()> {
        if self.status.is_terminal() || !policy.allows(target) {
            return Err(DomainError::InvalidTransition {
                from: self.status.to_string(),
                to: target.to_string(),
            });
        }
        let now = Utc::now();
        self.status = target;
        self.updated_at = now;
        self.status_history.push(StatusEntry {
            status: target,
            changed_at: now,
        });
        Ok(())
    }

    /// The history entry written by the latest transition.
    pub fn last_status_entry(&self) -> Option<&StatusEntry> {
        self.status_history.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order() -> Order {
        Order::new(
            "ACME Ltd".into(),
            vec![OrderItem {
                product_id: ProductId::new(),
                quantity: 2.0,
                price: 10.0,
            }],
        )
    }

    #[test]
    fn starts_new_with_seeded_history() {
        let o = order();
        assert_eq!(o.status, OrderStatus::New);
        assert_eq!(o.status_history.len(), 1);
        assert_eq!(o.status_history[0].status, OrderStatus::New);
        assert_eq!(o.status_history[0].changed_at, o.created_at);
    }

    #[test]
    fn new_and_reserved_may_transition() {
        let policy = OrderPolicy::default();
        let mut o = order();
        o.transition(OrderStatus::Reserved, &policy).unwrap();
        assert_eq!(o.status, OrderStatus::Reserved);
        o.transition(OrderStatus::Completed, &policy).unwrap();
        assert_eq!(o.status, OrderStatus::Completed);
        assert_eq!(o.status_history.len(), 3);
    }

    #[test]
    fn terminal_states_are_frozen() {
        let policy = OrderPolicy::default();
        let mut o = order();
        o.transition(OrderStatus::Canceled, &policy).unwrap();
        let err = o.transition(OrderStatus::New, &policy).unwrap_err();
        assert_eq!(
            err,
            DomainError::InvalidTransition {
                from: "canceled".into(),
                to: "new".into()
            }
        );
        assert_eq!(o.status_history.len(), 2);
    }

    #[test]
    fn policy_restricts_targets() {
        let policy = OrderPolicy {
            allowed_targets: vec![OrderStatus::Reserved, OrderStatus::Canceled],
        };
        let mut o = order();
        assert!(o.transition(OrderStatus::Completed, &policy).is_err());
        assert!(o.transition(OrderStatus::Reserved, &policy).is_ok());
    }

    #[test]
    fn transition_bumps_updated_at_and_history() {
        let policy = OrderPolicy::default();
        let mut o = order();
        let before = o.updated_at;
        o.transition(OrderStatus::Reserved, &policy).unwrap();
        assert!(o.updated_at >= before);
        let last = o.last_status_entry().unwrap();
        assert_eq!(last.status, OrderStatus::Reserved);
        assert_eq!(last.changed_at, o.updated_at);
    }

    #[test]
    fn status_parses_lowercase_names() {
        assert_eq!("reserved".parse::<OrderStatus>().unwrap(), OrderStatus::Reserved);
        assert!("shipped".parse::<OrderStatus>().is_err());
    }
}
