//! Day-close report types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shinedesk_shared::types::{BranchId, OrderId};

use super::tally::TallyLine;
use crate::ledger::PaymentMethod;
use crate::settlement::Category;

/// One order's share of one payment method and category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDetailRow {
    /// The order.
    pub order_id: OrderId,
    /// Payment method the share is attributed to.
    pub method: PaymentMethod,
    /// Revenue category.
    pub category: Category,
    /// Gross charges.
    pub gross: Decimal,
    /// Cancelled charges.
    pub cancelled: Decimal,
    /// `gross - cancelled`.
    pub net: Decimal,
}

/// Day totals of one payment method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethodAggregate {
    /// Payment method.
    pub method: PaymentMethod,
    /// Gross service charges.
    pub gross_service: Decimal,
    /// Cancelled service charges.
    pub service_cancelled: Decimal,
    /// Net service charges.
    pub net_service: Decimal,
    /// Gross product charges.
    pub gross_product: Decimal,
    /// Cancelled product charges.
    pub product_cancelled: Decimal,
    /// Net product charges.
    pub net_product: Decimal,
    /// `net_service + net_product`.
    pub net_total: Decimal,
    /// Sum of the payments taken with this method.
    pub collected: Decimal,
}

impl PaymentMethodAggregate {
    pub(crate) fn new(method: PaymentMethod) -> Self {
        Self {
            method,
            gross_service: Decimal::ZERO,
            service_cancelled: Decimal::ZERO,
            net_service: Decimal::ZERO,
            gross_product: Decimal::ZERO,
            product_cancelled: Decimal::ZERO,
            net_product: Decimal::ZERO,
            net_total: Decimal::ZERO,
            collected: Decimal::ZERO,
        }
    }

    pub(crate) fn add_row(&mut self, row: &OrderDetailRow) {
        match row.category {
            Category::Service => {
                self.gross_service += row.gross;
                self.service_cancelled += row.cancelled;
                self.net_service += row.net;
            }
            Category::Product => {
                self.gross_product += row.gross;
                self.product_cancelled += row.cancelled;
                self.net_product += row.net;
            }
        }
        self.net_total = self.net_service + self.net_product;
    }

    /// Net charges of one category.
    #[must_use]
    pub fn net(&self, category: Category) -> Decimal {
        match category {
            Category::Service => self.net_service,
            Category::Product => self.net_product,
        }
    }
}

/// Outcome of comparing the drawer count with the system figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReconciliationVerdict {
    /// Counted cash equals the system figure.
    Match,
    /// Counted cash differs from the system figure.
    Mismatch,
    /// No drawer count was supplied.
    NotCounted,
}

/// Cash reconciliation section of the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashReconciliation {
    /// Net cash the system expects in the drawer.
    pub system_cash: Decimal,
    /// Cash taken from customers, VAT included.
    pub collected_cash: Decimal,
    /// Total of the drawer count.
    pub counted_cash: Option<Decimal>,
    /// `counted_cash - system_cash`.
    pub discrepancy: Option<Decimal>,
    /// Comparison result.
    pub verdict: ReconciliationVerdict,
    /// The drawer count, largest face value first.
    pub count_lines: Vec<TallyLine>,
}

/// Non-blocking warning raised at day close.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationWarning {
    /// Net cash the system expects.
    pub system_cash: Decimal,
    /// Cash taken from customers, VAT included.
    pub collected_cash: Decimal,
    /// Cash actually counted.
    pub counted_cash: Decimal,
    /// `counted_cash - system_cash`.
    pub discrepancy: Decimal,
    /// Operator-facing message.
    pub message: String,
}

/// Day-close report of one branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCashReport {
    /// Branch.
    pub branch_id: BranchId,
    /// Business day.
    pub business_date: NaiveDate,
    /// Orders with at least one payment.
    pub orders_counted: usize,
    /// Per-method totals, in order of first use.
    pub methods: Vec<PaymentMethodAggregate>,
    /// Order-level rows the method totals are folded from.
    pub details: Vec<OrderDetailRow>,
    /// Net service charges over all methods.
    pub net_service: Decimal,
    /// Net product charges over all methods.
    pub net_product: Decimal,
    /// Σ net total over all methods.
    pub net_revenue: Decimal,
    /// Σ payments taken.
    pub total_collected: Decimal,
    /// Drawer comparison.
    pub reconciliation: CashReconciliation,
    /// Warnings for the operator.
    pub warnings: Vec<ReconciliationWarning>,
    /// Whether the day may be closed.
    pub can_close: bool,
}

impl DailyCashReport {
    /// Totals of one payment method.
    #[must_use]
    pub fn method(&self, method: &PaymentMethod) -> Option<&PaymentMethodAggregate> {
        self.methods.iter().find(|aggregate| aggregate.method == *method)
    }

    /// Drill-down rows behind one method and category.
    #[must_use]
    pub fn detail_rows(&self, method: &PaymentMethod, category: Category) -> Vec<&OrderDetailRow> {
        self.details
            .iter()
            .filter(|row| row.method == *method && row.category == category)
            .collect()
    }
}
