//! Order repository boundary.
//!
//! The settlement core never creates or persists orders; it reads them from a
//! repository supplied by the surrounding application.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use shinedesk_shared::AppError;
use shinedesk_shared::types::{BranchId, OrderId};
use thiserror::Error;
use tracing::warn;

use super::types::Order;

/// Errors returned by an order repository.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Order not found.
    #[error("Order not found: {0}")]
    OrderNotFound(OrderId),

    /// A supplied order breaks a settlement invariant.
    #[error("Order {order_id} is invalid: {reason}")]
    InvalidOrder {
        /// The offending order.
        order_id: OrderId,
        /// What is wrong with it.
        reason: String,
    },
}

impl RepositoryError {
    /// Returns the error code for the rendering layer.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::OrderNotFound(_) => "ORDER_NOT_FOUND",
            Self::InvalidOrder { .. } => "INVALID_ORDER",
        }
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::OrderNotFound(_) => Self::NotFound(err.to_string()),
            RepositoryError::InvalidOrder { .. } => Self::Internal(err.to_string()),
        }
    }
}

/// Read-only access to orders.
pub trait OrderRepository {
    /// Fetches one order.
    fn get(&self, order_id: &OrderId) -> Result<Order, RepositoryError>;

    /// Lists the orders of one branch for one business day.
    fn list_by_day(
        &self,
        branch_id: &BranchId,
        business_date: NaiveDate,
    ) -> Result<Vec<Order>, RepositoryError>;
}

/// In-memory repository, used by tests and by the day-close tool after it
/// has loaded an order export.
#[derive(Debug, Default)]
pub struct InMemoryOrderRepository {
    orders: HashMap<OrderId, Order>,
}

impl InMemoryOrderRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an order after checking it against the settlement rules.
    ///
    /// Orders coming from outside the core are not trusted: malformed prices
    /// and non-positive payments are refused. A ledger above the owed amount is
    /// accepted with a warning.
    pub fn insert(&mut self, order: Order) -> Result<(), RepositoryError> {
        order
            .validate()
            .map_err(|err| RepositoryError::InvalidOrder {
                order_id: order.id,
                reason: err.to_string(),
            })?;

        if let Some(tx) = order
            .ledger()
            .transactions()
            .iter()
            .find(|tx| tx.amount <= Decimal::ZERO)
        {
            return Err(RepositoryError::InvalidOrder {
                order_id: order.id,
                reason: format!("payment {} has a non-positive amount", tx.id),
            });
        }

        if let Some(excess) = order.overpaid_by() {
            warn!(
                order_id = %order.id,
                %excess,
                "Imported order is paid beyond its owed amount"
            );
        }

        self.orders.insert(order.id, order);
        Ok(())
    }

    /// Builds a repository from a list of orders.
    pub fn from_orders(orders: impl IntoIterator<Item = Order>) -> Result<Self, RepositoryError> {
        let mut repository = Self::new();
        for order in orders {
            repository.insert(order)?;
        }
        Ok(repository)
    }

    /// Number of stored orders.
    #[must_use]
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// Returns true if no orders are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

impl OrderRepository for InMemoryOrderRepository {
    fn get(&self, order_id: &OrderId) -> Result<Order, RepositoryError> {
        self.orders
            .get(order_id)
            .cloned()
            .ok_or(RepositoryError::OrderNotFound(*order_id))
    }

    fn list_by_day(
        &self,
        branch_id: &BranchId,
        business_date: NaiveDate,
    ) -> Result<Vec<Order>, RepositoryError> {
        let mut orders: Vec<Order> = self
            .orders
            .values()
            .filter(|order| order.branch_id == *branch_id && order.business_date == business_date)
            .cloned()
            .collect();
        // UUID v7 ids sort by creation time.
        orders.sort_by_key(|order| order.id);
        Ok(orders)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::PaymentMethod;
    use crate::settlement::{Category, LineItem, SettlementPolicy};
    use rust_decimal_macros::dec;
    use shinedesk_shared::types::CustomerId;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    fn order(branch_id: BranchId, business_date: NaiveDate) -> Order {
        Order::new(
            CustomerId::new(),
            branch_id,
            business_date,
            vec![LineItem::new("sneakers", Category::Service, dec!(10000))],
            SettlementPolicy::default(),
        )
    }

    #[test]
    fn test_get_and_missing() {
        let branch = BranchId::new();
        let stored = order(branch, day());
        let id = stored.id;
        let repository = InMemoryOrderRepository::from_orders([stored]).unwrap();

        assert_eq!(repository.get(&id).unwrap().id, id);
        assert!(matches!(
            repository.get(&OrderId::new()),
            Err(RepositoryError::OrderNotFound(_))
        ));
    }

    #[test]
    fn test_list_by_day_filters_branch_and_date() {
        let branch = BranchId::new();
        let other_branch = BranchId::new();
        let next_day = day().succ_opt().unwrap();

        let repository = InMemoryOrderRepository::from_orders([
            order(branch, day()),
            order(branch, day()),
            order(other_branch, day()),
            order(branch, next_day),
        ])
        .unwrap();

        assert_eq!(repository.len(), 4);
        let orders = repository.list_by_day(&branch, day()).unwrap();
        assert_eq!(orders.len(), 2);
        assert!(orders[0].id < orders[1].id);
    }

    #[test]
    fn test_rejects_malformed_order() {
        let mut bad = order(BranchId::new(), day());
        bad.policy.discount = dec!(-500);
        let mut repository = InMemoryOrderRepository::new();

        assert!(matches!(
            repository.insert(bad),
            Err(RepositoryError::InvalidOrder { .. })
        ));
        assert!(repository.is_empty());
    }

    #[test]
    fn test_rejects_non_positive_payment() {
        let mut json = serde_json::to_value(order(BranchId::new(), day())).unwrap();
        json["ledger"] = serde_json::json!([{
            "id": shinedesk_shared::types::PaymentId::new(),
            "method": "cash",
            "amount": "0",
            "recorded_at": "2024-03-15T10:00:00Z"
        }]);
        let imported: Order = serde_json::from_value(json).unwrap();

        let mut repository = InMemoryOrderRepository::new();
        let err = repository.insert(imported).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_ORDER");
    }

    #[test]
    fn test_accepts_paid_order() {
        let mut paid = order(BranchId::new(), day());
        paid.accept_payment(PaymentMethod::Cash, dec!(11000)).unwrap();
        let id = paid.id;

        let repository = InMemoryOrderRepository::from_orders([paid]).unwrap();
        assert!(repository.get(&id).unwrap().is_settled());
    }

    #[test]
    fn test_accepts_overpaid_import() {
        let mut paid = order(BranchId::new(), day());
        paid.accept_payment(PaymentMethod::Cash, dec!(11000)).unwrap();
        paid.line_items[0].status = crate::settlement::ItemStatus::Cancelled;
        let id = paid.id;

        let repository = InMemoryOrderRepository::from_orders([paid]).unwrap();
        let stored = repository.get(&id).unwrap();
        assert_eq!(stored.overpaid_by(), Some(dec!(11000)));
        assert_eq!(stored.remaining_balance(), Decimal::ZERO);
    }
}
