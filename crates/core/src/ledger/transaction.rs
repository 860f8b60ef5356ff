//! Payment transaction.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shinedesk_shared::types::PaymentId;

use super::types::PaymentMethod;

/// An accepted payment against an order's owed balance.
///
/// Always a credit; there is no refund or void path. Transactions are only
/// created by the payment ledger and never change afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier.
    pub id: PaymentId,
    /// How the customer paid.
    pub method: PaymentMethod,
    /// Amount paid (always positive).
    pub amount: Decimal,
    /// When the payment was accepted.
    pub recorded_at: DateTime<Utc>,
}

impl Transaction {
    pub(crate) fn new(method: PaymentMethod, amount: Decimal, recorded_at: DateTime<Utc>) -> Self {
        Self {
            id: PaymentId::new(),
            method,
            amount,
            recorded_at,
        }
    }
}
