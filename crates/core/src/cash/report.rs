//! Day-close aggregation and cash reconciliation.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use shinedesk_shared::types::BranchId;
use tracing::{debug, info, warn};

use super::allocation::allocate_by_weights;
use super::tally::DenominationCount;
use super::types::{
    CashReconciliation, DailyCashReport, OrderDetailRow, PaymentMethodAggregate,
    ReconciliationVerdict, ReconciliationWarning,
};
use crate::ledger::PaymentMethod;
use crate::order::Order;
use crate::settlement::Category;

/// Builds the day-close report of one branch.
pub struct DailyCashAggregator;

impl DailyCashAggregator {
    /// Folds the day's orders into per-method totals and reconciles the cash
    /// drawer.
    ///
    /// Each order's category charges are split across the methods it was paid
    /// with, in proportion to the amount paid by each. Method totals are then
    /// folded from those order-level rows, so a drill-down always adds up to
    /// its total. Orders of other branches or days are ignored.
    #[must_use]
    pub fn aggregate(
        branch_id: BranchId,
        business_date: NaiveDate,
        orders: &[Order],
        count: Option<&DenominationCount>,
    ) -> DailyCashReport {
        let mut details = Vec::new();
        let mut collected: Vec<(PaymentMethod, Decimal)> = Vec::new();
        let mut orders_counted = 0;

        for order in orders {
            if order.branch_id != branch_id || order.business_date != business_date {
                warn!(
                    order_id = %order.id,
                    %branch_id,
                    %business_date,
                    "Order from another branch or day ignored"
                );
                continue;
            }

            let paid = order.ledger().paid_by_method();
            if paid.is_empty() {
                debug!(order_id = %order.id, "Order has no payments, skipped");
                continue;
            }
            orders_counted += 1;

            for (method, amount) in &paid {
                match collected.iter_mut().find(|(m, _)| m == method) {
                    Some((_, total)) => *total += *amount,
                    None => collected.push((method.clone(), *amount)),
                }
            }
            Self::split_order(order, &paid, &mut details);
        }

        let methods = Self::fold_methods(&details, &collected);
        let net_service = methods.iter().map(|m| m.net_service).sum();
        let net_product = methods.iter().map(|m| m.net_product).sum();
        let net_revenue = methods.iter().map(|m| m.net_total).sum();
        let total_collected = methods.iter().map(|m| m.collected).sum();

        let (system_cash, collected_cash) = methods
            .iter()
            .find(|m| m.method.is_cash())
            .map_or((Decimal::ZERO, Decimal::ZERO), |m| (m.net_total, m.collected));
        let (reconciliation, warning) = Self::reconcile(system_cash, collected_cash, count);

        info!(
            %branch_id,
            %business_date,
            orders = orders_counted,
            methods = methods.len(),
            %net_revenue,
            verdict = ?reconciliation.verdict,
            "Daily cash report built"
        );

        DailyCashReport {
            branch_id,
            business_date,
            orders_counted,
            methods,
            details,
            net_service,
            net_product,
            net_revenue,
            total_collected,
            reconciliation,
            warnings: warning.into_iter().collect(),
            can_close: true,
        }
    }

    /// Compares the drawer count with the system cash figure.
    ///
    /// A mismatch produces a warning but never blocks the day close. The
    /// verdict compares against `system_cash`; `collected_cash` is carried
    /// alongside so the operator can tell VAT from a real shortage.
    #[must_use]
    pub fn reconcile(
        system_cash: Decimal,
        collected_cash: Decimal,
        count: Option<&DenominationCount>,
    ) -> (CashReconciliation, Option<ReconciliationWarning>) {
        let Some(count) = count else {
            return (
                CashReconciliation {
                    system_cash,
                    collected_cash,
                    counted_cash: None,
                    discrepancy: None,
                    verdict: ReconciliationVerdict::NotCounted,
                    count_lines: Vec::new(),
                },
                None,
            );
        };

        let counted_cash = count.total();
        let discrepancy = counted_cash - system_cash;
        let verdict = if discrepancy.is_zero() {
            ReconciliationVerdict::Match
        } else {
            ReconciliationVerdict::Mismatch
        };

        let warning = (verdict == ReconciliationVerdict::Mismatch).then(|| {
            warn!(
                %system_cash,
                %collected_cash,
                %counted_cash,
                %discrepancy,
                "Cash count mismatch"
            );
            ReconciliationWarning {
                system_cash,
                collected_cash,
                counted_cash,
                discrepancy,
                message: format!(
                    "Counted cash {counted_cash} differs from system cash {system_cash} by \
                     {discrepancy} (cash collected incl. VAT: {collected_cash})"
                ),
            }
        });

        (
            CashReconciliation {
                system_cash,
                collected_cash,
                counted_cash: Some(counted_cash),
                discrepancy: Some(discrepancy),
                verdict,
                count_lines: count.lines(),
            },
            warning,
        )
    }

    fn split_order(
        order: &Order,
        paid: &[(PaymentMethod, Decimal)],
        details: &mut Vec<OrderDetailRow>,
    ) {
        let weights: Vec<Decimal> = paid.iter().map(|(_, amount)| *amount).collect();
        let totals = order.category_totals();

        for category in Category::ALL {
            let figures = totals.get(category);
            if figures.gross.is_zero() {
                continue;
            }
            // Net and cancelled are split separately so neither share can go
            // negative; gross is their sum.
            let net_shares = allocate_by_weights(figures.net, &weights);
            let cancelled_shares = allocate_by_weights(figures.cancelled, &weights);

            for (((method, _), net), cancelled) in paid.iter().zip(net_shares).zip(cancelled_shares)
            {
                if net.is_zero() && cancelled.is_zero() {
                    continue;
                }
                details.push(OrderDetailRow {
                    order_id: order.id,
                    method: method.clone(),
                    category,
                    gross: net + cancelled,
                    cancelled,
                    net,
                });
            }
        }
    }

    fn fold_methods(
        details: &[OrderDetailRow],
        collected: &[(PaymentMethod, Decimal)],
    ) -> Vec<PaymentMethodAggregate> {
        let mut methods: Vec<PaymentMethodAggregate> = collected
            .iter()
            .map(|(method, amount)| {
                let mut aggregate = PaymentMethodAggregate::new(method.clone());
                aggregate.collected = *amount;
                aggregate
            })
            .collect();

        for row in details {
            if let Some(aggregate) = methods.iter_mut().find(|m| m.method == row.method) {
                aggregate.add_row(row);
            }
        }
        methods
    }
}
