//! Property-based tests for the settlement calculator.
//!
//! Covers the netting invariant, the no-double-counting rule and the
//! non-negativity of the owed amount.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::calculator::SettlementCalculator;
use super::types::{Category, ItemStatus, LineItem, Service, SettlementPolicy};

/// Strategy for a whole-unit price between 0 and 500,000.
fn price() -> impl Strategy<Value = Decimal> {
    (0i64..=500_000i64).prop_map(Decimal::from)
}

fn status() -> impl Strategy<Value = ItemStatus> {
    prop_oneof![Just(ItemStatus::Active), Just(ItemStatus::Cancelled)]
}

fn category() -> impl Strategy<Value = Category> {
    prop_oneof![Just(Category::Service), Just(Category::Product)]
}

fn service() -> impl Strategy<Value = Service> {
    (price(), status()).prop_map(|(price, status)| Service::new("svc", price).with_status(status))
}

fn line_item() -> impl Strategy<Value = LineItem> {
    (
        category(),
        price(),
        status(),
        prop::collection::vec(service(), 0..4),
    )
        .prop_map(|(category, unit_price, status, services)| {
            let mut item = LineItem::new("item", category, unit_price).with_status(status);
            item.services = services;
            item
        })
}

fn policy() -> impl Strategy<Value = SettlementPolicy> {
    (price(), price(), 0i64..=30i64, any::<bool>()).prop_map(
        |(discount, points_used, vat_percent, no_vat)| SettlementPolicy {
            discount,
            points_used,
            vat_rate: Decimal::new(vat_percent, 2),
            no_vat,
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// net_total == gross_total - cancelled_total for every order.
    #[test]
    fn prop_netting_invariant(
        items in prop::collection::vec(line_item(), 0..8),
        policy in policy(),
    ) {
        let figures = SettlementCalculator::compute(&items, &policy);
        prop_assert_eq!(figures.net_total, figures.gross_total - figures.cancelled_total);
        prop_assert!(figures.cancelled_total <= figures.gross_total);
    }

    /// Cancelling a service under an already-cancelled line changes nothing.
    #[test]
    fn prop_no_double_counting(
        mut item in line_item(),
        policy in policy(),
    ) {
        item.status = ItemStatus::Cancelled;
        let before = SettlementCalculator::compute(std::slice::from_ref(&item), &policy);

        for service in &mut item.services {
            service.status = ItemStatus::Cancelled;
        }
        let after = SettlementCalculator::compute(std::slice::from_ref(&item), &policy);

        prop_assert_eq!(before.cancelled_total, item.gross());
        prop_assert_eq!(after.cancelled_total, before.cancelled_total);
        prop_assert_eq!(after.net_total, Decimal::ZERO);
    }

    /// final_owed is never negative, whatever the discount and points.
    #[test]
    fn prop_final_owed_non_negative(
        items in prop::collection::vec(line_item(), 0..8),
        policy in policy(),
    ) {
        let figures = SettlementCalculator::compute(&items, &policy);
        prop_assert!(figures.final_owed >= Decimal::ZERO);

        let unclamped = figures.net_total + figures.vat - policy.discount - policy.points_used;
        if unclamped >= Decimal::ZERO {
            prop_assert_eq!(figures.final_owed, unclamped);
        } else {
            prop_assert_eq!(figures.final_owed, Decimal::ZERO);
        }
    }

    /// The no-VAT override always yields zero VAT.
    #[test]
    fn prop_no_vat_override(
        items in prop::collection::vec(line_item(), 0..8),
        mut policy in policy(),
    ) {
        policy.no_vat = true;
        let figures = SettlementCalculator::compute(&items, &policy);
        prop_assert_eq!(figures.vat, Decimal::ZERO);
    }

    /// Cancellation records sum to the cancelled total, and the category
    /// split sums to the order totals.
    #[test]
    fn prop_derived_views_agree(
        items in prop::collection::vec(line_item(), 0..8),
    ) {
        let figures = SettlementCalculator::compute(&items, &SettlementPolicy::default());

        let records: Decimal = SettlementCalculator::cancellations(&items)
            .iter()
            .map(|r| r.amount)
            .sum();
        prop_assert_eq!(records, figures.cancelled_total);

        let split = SettlementCalculator::category_totals(&items);
        prop_assert_eq!(split.service.gross + split.product.gross, figures.gross_total);
        prop_assert_eq!(split.service.net + split.product.net, figures.net_total);
    }

    /// Computing twice from the same state gives the same figures.
    #[test]
    fn prop_compute_is_pure(
        items in prop::collection::vec(line_item(), 0..8),
        policy in policy(),
    ) {
        prop_assert_eq!(
            SettlementCalculator::compute(&items, &policy),
            SettlementCalculator::compute(&items, &policy)
        );
    }
}
