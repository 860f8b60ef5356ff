//! Order settlement calculator.
//!
//! Every screen that shows an owed amount calls into this module with the
//! current order state; nothing here caches a previous result.

use rust_decimal::Decimal;
use shinedesk_shared::types::{clamp_non_negative, round_currency};

use super::error::SettlementError;
use super::types::{
    CancellationRecord, CategoryTotals, LineItem, SettlementFigures, SettlementPolicy,
};

/// Stateless service computing settlement figures.
pub struct SettlementCalculator;

impl SettlementCalculator {
    /// Computes gross, cancelled, net, VAT and final owed amounts.
    ///
    /// - `vat = round(net_total * vat_rate)`, or zero under the no-VAT override
    /// - `final_owed = max(0, net_total + vat - discount - points_used)`
    ///
    /// This is a total function; run [`Self::validate`] first on untrusted input.
    #[must_use]
    pub fn compute(items: &[LineItem], policy: &SettlementPolicy) -> SettlementFigures {
        let gross_total: Decimal = items.iter().map(LineItem::gross).sum();
        let cancelled_total: Decimal = items.iter().map(LineItem::cancelled_amount).sum();
        let net_total = gross_total - cancelled_total;

        let vat = if policy.no_vat {
            Decimal::ZERO
        } else {
            round_currency(net_total * policy.vat_rate)
        };

        let final_owed =
            clamp_non_negative(net_total + vat - policy.discount - policy.points_used);

        SettlementFigures {
            gross_total,
            cancelled_total,
            net_total,
            vat,
            discount: policy.discount,
            points_used: policy.points_used,
            final_owed,
        }
    }

    /// Lists every cancelled price.
    ///
    /// A cancelled line yields one record covering its services; services
    /// cancelled under an active line yield one record each.
    #[must_use]
    pub fn cancellations(items: &[LineItem]) -> Vec<CancellationRecord> {
        let mut records = Vec::new();
        for item in items {
            if item.status.is_cancelled() {
                records.push(CancellationRecord {
                    line_item_id: item.id,
                    service_id: None,
                    category: item.category,
                    amount: item.gross(),
                });
                continue;
            }
            records.extend(
                item.services
                    .iter()
                    .filter(|s| s.status.is_cancelled())
                    .map(|s| CancellationRecord {
                        line_item_id: item.id,
                        service_id: Some(s.id),
                        category: item.category,
                        amount: s.price,
                    }),
            );
        }
        records
    }

    /// Splits the charges of an order by category.
    #[must_use]
    pub fn category_totals(items: &[LineItem]) -> CategoryTotals {
        let mut totals = CategoryTotals::default();
        for item in items {
            totals.add_line(item);
        }
        totals
    }

    /// Rejects malformed input: negative prices, negative discount or points,
    /// and VAT rates outside `[0, 1]`.
    pub fn validate(items: &[LineItem], policy: &SettlementPolicy) -> Result<(), SettlementError> {
        for item in items {
            if item.unit_price < Decimal::ZERO {
                return Err(SettlementError::NegativeLinePrice(item.id));
            }
            if let Some(service) = item.services.iter().find(|s| s.price < Decimal::ZERO) {
                return Err(SettlementError::NegativeServicePrice(service.id));
            }
        }

        if policy.discount < Decimal::ZERO {
            return Err(SettlementError::NegativeDiscount(policy.discount));
        }
        if policy.points_used < Decimal::ZERO {
            return Err(SettlementError::NegativePoints(policy.points_used));
        }
        if policy.vat_rate < Decimal::ZERO || policy.vat_rate > Decimal::ONE {
            return Err(SettlementError::InvalidVatRate(policy.vat_rate));
        }

        Ok(())
    }
}
