//! Order aggregate.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shinedesk_shared::types::{BranchId, CustomerId, LineItemId, OrderId, ServiceId};
use tracing::warn;

use crate::ledger::{LedgerError, PaymentLedger, PaymentMethod, PaymentReceipt};
use crate::settlement::{
    CategoryTotals, ItemStatus, LineItem, SettlementCalculator, SettlementError,
    SettlementFigures, SettlementPolicy,
};

/// A customer order as supplied by the order repository.
///
/// The payment ledger is the only record of what has been paid. Settlement
/// figures are recomputed from the current items on every call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Unique identifier.
    pub id: OrderId,
    /// The customer who placed the order.
    pub customer_id: CustomerId,
    /// The branch that took the order.
    pub branch_id: BranchId,
    /// Business day the order is reported under.
    pub business_date: NaiveDate,
    /// Billable items, in display order.
    pub line_items: Vec<LineItem>,
    /// Discount, points and VAT inputs.
    #[serde(default)]
    pub policy: SettlementPolicy,
    /// Accepted payments.
    #[serde(default)]
    ledger: PaymentLedger,
}

impl Order {
    /// Creates an order with an empty ledger.
    #[must_use]
    pub fn new(
        customer_id: CustomerId,
        branch_id: BranchId,
        business_date: NaiveDate,
        line_items: Vec<LineItem>,
        policy: SettlementPolicy,
    ) -> Self {
        Self {
            id: OrderId::new(),
            customer_id,
            branch_id,
            business_date,
            line_items,
            policy,
            ledger: PaymentLedger::new(),
        }
    }

    /// The payment ledger.
    #[must_use]
    pub fn ledger(&self) -> &PaymentLedger {
        &self.ledger
    }

    /// Settlement figures for the current state of the order.
    #[must_use]
    pub fn settlement(&self) -> SettlementFigures {
        SettlementCalculator::compute(&self.line_items, &self.policy)
    }

    /// Charges split by category.
    #[must_use]
    pub fn category_totals(&self) -> CategoryTotals {
        SettlementCalculator::category_totals(&self.line_items)
    }

    /// Amount owed after cancellations, VAT, discount and points.
    #[must_use]
    pub fn final_owed(&self) -> Decimal {
        self.settlement().final_owed
    }

    /// Amount still to be paid; never negative.
    #[must_use]
    pub fn remaining_balance(&self) -> Decimal {
        self.ledger.remaining_balance(self.final_owed())
    }

    /// True iff the remaining balance is zero.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.remaining_balance().is_zero()
    }

    /// Amount paid beyond what is now owed, if any.
    ///
    /// Payments are never refused after the fact, so cancelling a paid item
    /// can leave the ledger above the recomputed owed amount.
    #[must_use]
    pub fn overpaid_by(&self) -> Option<Decimal> {
        let excess = self.ledger.total_paid() - self.final_owed();
        (excess > Decimal::ZERO).then_some(excess)
    }

    /// Validates the order's items and policy.
    pub fn validate(&self) -> Result<(), SettlementError> {
        SettlementCalculator::validate(&self.line_items, &self.policy)
    }

    /// Accepts a payment against the current owed amount.
    pub fn accept_payment(
        &mut self,
        method: PaymentMethod,
        amount: Decimal,
    ) -> Result<PaymentReceipt, LedgerError> {
        self.accept_payment_at(method, amount, Utc::now())
    }

    /// Accepts a payment recorded at a given time.
    pub fn accept_payment_at(
        &mut self,
        method: PaymentMethod,
        amount: Decimal,
        recorded_at: DateTime<Utc>,
    ) -> Result<PaymentReceipt, LedgerError> {
        let final_owed = self.final_owed();
        self.ledger
            .accept_payment_at(final_owed, method, amount, recorded_at)
    }

    /// Changes the status of a line item.
    pub fn set_line_item_status(
        &mut self,
        line_item_id: LineItemId,
        status: ItemStatus,
    ) -> Result<(), SettlementError> {
        let item = self
            .line_items
            .iter_mut()
            .find(|item| item.id == line_item_id)
            .ok_or(SettlementError::LineItemNotFound(line_item_id))?;
        item.status = status;
        self.warn_if_overpaid();
        Ok(())
    }

    /// Changes the status of one service of a line item.
    pub fn set_service_status(
        &mut self,
        line_item_id: LineItemId,
        service_id: ServiceId,
        status: ItemStatus,
    ) -> Result<(), SettlementError> {
        let item = self
            .line_items
            .iter_mut()
            .find(|item| item.id == line_item_id)
            .ok_or(SettlementError::LineItemNotFound(line_item_id))?;
        let service = item
            .services
            .iter_mut()
            .find(|service| service.id == service_id)
            .ok_or(SettlementError::ServiceNotFound {
                line_item_id,
                service_id,
            })?;
        service.status = status;
        self.warn_if_overpaid();
        Ok(())
    }

    fn warn_if_overpaid(&self) {
        if let Some(excess) = self.overpaid_by() {
            warn!(
                order_id = %self.id,
                total_paid = %self.ledger.total_paid(),
                final_owed = %self.final_owed(),
                %excess,
                "Ledger exceeds owed amount after status change"
            );
        }
    }
}
