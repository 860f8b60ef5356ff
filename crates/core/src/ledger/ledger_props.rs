//! Property-based tests for the payment ledger.
//!
//! Feature: payment-ledger, overpayment rejection and settlement monotonicity.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::error::LedgerError;
use super::payment_ledger::PaymentLedger;
use super::types::PaymentMethod;

/// Strategy for an owed amount between 0 and 1,000,000.
fn owed_amount() -> impl Strategy<Value = Decimal> {
    (0i64..=1_000_000i64).prop_map(Decimal::from)
}

/// Strategy for a payment attempt, including zero and negative amounts.
fn attempt_amount() -> impl Strategy<Value = Decimal> {
    (-1_000i64..=400_000i64).prop_map(Decimal::from)
}

fn method() -> impl Strategy<Value = PaymentMethod> {
    prop_oneof![
        Just(PaymentMethod::Cash),
        Just(PaymentMethod::Card),
        Just(PaymentMethod::QrPay),
        Just(PaymentMethod::Voucher),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Remaining balance never increases, never goes negative, and the ledger
    /// never holds more than the owed amount.
    #[test]
    fn prop_remaining_balance_monotonic(
        final_owed in owed_amount(),
        attempts in prop::collection::vec((method(), attempt_amount()), 1..30),
    ) {
        let mut ledger = PaymentLedger::new();
        let mut previous = ledger.remaining_balance(final_owed);

        for (method, amount) in attempts {
            let _ = ledger.accept_payment(final_owed, method, amount);
            let remaining = ledger.remaining_balance(final_owed);

            prop_assert!(remaining <= previous);
            prop_assert!(remaining >= Decimal::ZERO);
            prop_assert!(ledger.total_paid() <= final_owed);
            prop_assert_eq!(ledger.is_settled(final_owed), remaining.is_zero());
            previous = remaining;
        }
    }

    /// A payment above the remaining balance is rejected and changes nothing.
    #[test]
    fn prop_overpayment_rejected(
        final_owed in (1i64..=1_000_000i64).prop_map(Decimal::from),
        excess in (1i64..=100_000i64).prop_map(Decimal::from),
        method in method(),
    ) {
        let mut ledger = PaymentLedger::new();
        let before = ledger.clone();

        let result = ledger.accept_payment(final_owed, method, final_owed + excess);

        let is_overpayment = matches!(result, Err(LedgerError::Overpayment { .. }));
        prop_assert!(is_overpayment);
        prop_assert_eq!(ledger, before);
    }

    /// Paying the remaining balance in any split always ends exactly at zero.
    #[test]
    fn prop_split_payments_settle_exactly(
        final_owed in (1i64..=1_000_000i64).prop_map(Decimal::from),
        parts in 1usize..6,
    ) {
        let mut ledger = PaymentLedger::new();
        let part = (final_owed / Decimal::from(parts as u64)).floor();

        for _ in 0..parts - 1 {
            if part > Decimal::ZERO {
                ledger.accept_payment(final_owed, PaymentMethod::Card, part).unwrap();
            }
        }
        let rest = ledger.remaining_balance(final_owed);
        let receipt = ledger.accept_payment(final_owed, PaymentMethod::Cash, rest).unwrap();

        prop_assert!(receipt.settled);
        prop_assert_eq!(receipt.remaining_balance, Decimal::ZERO);
        prop_assert_eq!(ledger.total_paid(), final_owed);
    }
}
