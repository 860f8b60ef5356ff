//! Shared ledger registry for multi-terminal deployments.
//!
//! Each order's ledger sits behind its own map shard lock, and every payment
//! carries the ledger version the operator saw. A payment made against a stale
//! balance is refused with `VersionMismatch` instead of being appended.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use rust_decimal::Decimal;
use shinedesk_shared::types::OrderId;
use tracing::warn;

use super::error::LedgerError;
use super::payment_ledger::PaymentLedger;
use super::types::{PaymentMethod, PaymentReceipt};

/// Concurrent map of order ledgers with optimistic version checks.
#[derive(Debug, Default)]
pub struct LedgerRegistry {
    ledgers: DashMap<OrderId, PaymentLedger>,
}

impl LedgerRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an order's ledger, replacing any previous one.
    pub fn register(&self, order_id: OrderId, ledger: PaymentLedger) {
        self.ledgers.insert(order_id, ledger);
    }

    /// Returns true if a ledger is registered for the order.
    #[must_use]
    pub fn contains(&self, order_id: &OrderId) -> bool {
        self.ledgers.contains_key(order_id)
    }

    /// Current version of an order's ledger.
    pub fn version(&self, order_id: &OrderId) -> Result<u64, LedgerError> {
        self.ledgers
            .get(order_id)
            .map(|ledger| ledger.version())
            .ok_or(LedgerError::OrderNotRegistered(*order_id))
    }

    /// Remaining balance of an order against `final_owed`.
    pub fn remaining_balance(
        &self,
        order_id: &OrderId,
        final_owed: Decimal,
    ) -> Result<Decimal, LedgerError> {
        self.ledgers
            .get(order_id)
            .map(|ledger| ledger.remaining_balance(final_owed))
            .ok_or(LedgerError::OrderNotRegistered(*order_id))
    }

    /// Copy of an order's ledger.
    #[must_use]
    pub fn snapshot(&self, order_id: &OrderId) -> Option<PaymentLedger> {
        self.ledgers.get(order_id).map(|ledger| ledger.clone())
    }

    /// Accepts a payment if the ledger is still at `expected_version`.
    ///
    /// The version check and the append happen under the same entry lock.
    ///
    /// # Errors
    ///
    /// Returns `OrderNotRegistered`, `VersionMismatch`, or any payment
    /// validation error from [`PaymentLedger::accept_payment_at`].
    pub fn accept_payment(
        &self,
        order_id: OrderId,
        final_owed: Decimal,
        expected_version: u64,
        method: PaymentMethod,
        amount: Decimal,
        recorded_at: DateTime<Utc>,
    ) -> Result<PaymentReceipt, LedgerError> {
        let mut ledger = self
            .ledgers
            .get_mut(&order_id)
            .ok_or(LedgerError::OrderNotRegistered(order_id))?;

        let actual = ledger.version();
        if actual != expected_version {
            warn!(
                %order_id,
                expected = expected_version,
                actual,
                "Stale ledger version, payment refused"
            );
            return Err(LedgerError::VersionMismatch {
                order_id,
                expected: expected_version,
                actual,
            });
        }

        ledger.accept_payment_at(final_owed, method, amount, recorded_at)
    }
}
