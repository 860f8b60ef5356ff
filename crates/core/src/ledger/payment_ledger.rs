//! Append-only payment ledger of one order.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shinedesk_shared::types::clamp_non_negative;
use tracing::{debug, info};

use super::error::LedgerError;
use super::transaction::Transaction;
use super::types::{PaymentMethod, PaymentReceipt};
use super::validation::validate_payment;

/// Append-only log of payments against one order.
///
/// The ledger does not store the owed amount: callers pass the `final_owed`
/// figure freshly computed from the order, so cancellations made after a
/// payment are always reflected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaymentLedger {
    transactions: Vec<Transaction>,
}

impl PaymentLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All transactions in acceptance order.
    #[must_use]
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Number of accepted transactions; increases by one per payment.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.transactions.len() as u64
    }

    /// Sum of all accepted payments.
    #[must_use]
    pub fn total_paid(&self) -> Decimal {
        self.transactions.iter().map(|t| t.amount).sum()
    }

    /// `final_owed - total_paid`, floored at zero.
    #[must_use]
    pub fn remaining_balance(&self, final_owed: Decimal) -> Decimal {
        clamp_non_negative(final_owed - self.total_paid())
    }

    /// True iff nothing remains to be paid.
    #[must_use]
    pub fn is_settled(&self, final_owed: Decimal) -> bool {
        self.remaining_balance(final_owed).is_zero()
    }

    /// Totals per payment method, in order of first use.
    #[must_use]
    pub fn paid_by_method(&self) -> Vec<(PaymentMethod, Decimal)> {
        let mut totals: Vec<(PaymentMethod, Decimal)> = Vec::new();
        for tx in &self.transactions {
            match totals.iter_mut().find(|(method, _)| *method == tx.method) {
                Some((_, total)) => *total += tx.amount,
                None => totals.push((tx.method.clone(), tx.amount)),
            }
        }
        totals
    }

    /// Accepts a payment, timestamped now.
    ///
    /// # Errors
    ///
    /// See [`Self::accept_payment_at`].
    pub fn accept_payment(
        &mut self,
        final_owed: Decimal,
        method: PaymentMethod,
        amount: Decimal,
    ) -> Result<PaymentReceipt, LedgerError> {
        self.accept_payment_at(final_owed, method, amount, Utc::now())
    }

    /// Accepts a payment recorded at `recorded_at`.
    ///
    /// The payment is validated against the remaining balance before anything
    /// is appended; a rejected payment leaves the ledger untouched.
    ///
    /// # Errors
    ///
    /// Returns `ZeroAmount`, `NegativeAmount`, `AlreadySettled` or
    /// `Overpayment` when the amount is not acceptable.
    pub fn accept_payment_at(
        &mut self,
        final_owed: Decimal,
        method: PaymentMethod,
        amount: Decimal,
        recorded_at: DateTime<Utc>,
    ) -> Result<PaymentReceipt, LedgerError> {
        let previous_balance = self.remaining_balance(final_owed);

        if let Err(err) = validate_payment(amount, previous_balance) {
            debug!(
                %method,
                %amount,
                remaining = %previous_balance,
                code = err.error_code(),
                "Payment rejected"
            );
            return Err(err);
        }

        let transaction = Transaction::new(method, amount, recorded_at);
        self.transactions.push(transaction.clone());

        let remaining_balance = previous_balance - amount;
        let settled = remaining_balance.is_zero();
        info!(
            payment_id = %transaction.id,
            method = %transaction.method,
            %amount,
            remaining = %remaining_balance,
            settled,
            "Payment accepted"
        );

        Ok(PaymentReceipt {
            transaction,
            previous_balance,
            remaining_balance,
            version: self.version(),
            settled,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_full_cash_payment_settles() {
        let mut ledger = PaymentLedger::new();
        let receipt = ledger
            .accept_payment(dec!(33000), PaymentMethod::Cash, dec!(33000))
            .unwrap();

        assert_eq!(receipt.previous_balance, dec!(33000));
        assert_eq!(receipt.remaining_balance, Decimal::ZERO);
        assert!(receipt.settled);
        assert_eq!(receipt.version, 1);
        assert!(ledger.is_settled(dec!(33000)));
    }

    #[test]
    fn test_overpayment_leaves_ledger_unchanged() {
        let mut ledger = PaymentLedger::new();
        let result = ledger.accept_payment(dec!(33000), PaymentMethod::Cash, dec!(40000));

        assert!(matches!(result, Err(LedgerError::Overpayment { .. })));
        assert!(ledger.transactions().is_empty());
        assert_eq!(ledger.remaining_balance(dec!(33000)), dec!(33000));
    }

    #[test]
    fn test_partial_payments_across_methods() {
        let mut ledger = PaymentLedger::new();
        ledger
            .accept_payment(dec!(50000), PaymentMethod::Card, dec!(20000))
            .unwrap();
        ledger
            .accept_payment(dec!(50000), PaymentMethod::Cash, dec!(10000))
            .unwrap();
        let receipt = ledger
            .accept_payment(dec!(50000), PaymentMethod::Card, dec!(20000))
            .unwrap();

        assert!(receipt.settled);
        assert_eq!(ledger.total_paid(), dec!(50000));
        assert_eq!(
            ledger.paid_by_method(),
            vec![
                (PaymentMethod::Card, dec!(40000)),
                (PaymentMethod::Cash, dec!(10000)),
            ]
        );
    }

    #[test]
    fn test_payment_on_settled_order_rejected() {
        let mut ledger = PaymentLedger::new();
        ledger
            .accept_payment(dec!(1000), PaymentMethod::Cash, dec!(1000))
            .unwrap();
        assert!(matches!(
            ledger.accept_payment(dec!(1000), PaymentMethod::Cash, dec!(1)),
            Err(LedgerError::AlreadySettled)
        ));
        assert_eq!(ledger.version(), 1);
    }

    #[test]
    fn test_remaining_floored_when_owed_drops() {
        // A cancellation after payment lowers the owed amount below what was paid.
        let mut ledger = PaymentLedger::new();
        ledger
            .accept_payment(dec!(33000), PaymentMethod::Cash, dec!(33000))
            .unwrap();
        assert_eq!(ledger.remaining_balance(dec!(16500)), Decimal::ZERO);
        assert!(ledger.is_settled(dec!(16500)));
    }

    #[test]
    fn test_zero_owed_is_settled_without_payments() {
        let ledger = PaymentLedger::new();
        assert!(ledger.is_settled(Decimal::ZERO));
    }

    #[test]
    fn test_serializes_as_transaction_list() {
        let mut ledger = PaymentLedger::new();
        ledger
            .accept_payment(dec!(5000), PaymentMethod::Voucher, dec!(5000))
            .unwrap();

        let json = serde_json::to_value(&ledger).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["method"], "voucher");

        let back: PaymentLedger = serde_json::from_value(json).unwrap();
        assert_eq!(back, ledger);
    }
}
