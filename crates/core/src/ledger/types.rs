//! Payment ledger domain types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::transaction::Transaction;

/// Payment method tag.
///
/// The business adds methods over time, so this is an open enumeration:
/// unknown codes parse into [`PaymentMethod::Other`] instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaymentMethod {
    /// Cash in the drawer.
    Cash,
    /// Debit or credit card.
    Card,
    /// QR code / e-wallet payment.
    QrPay,
    /// Bank transfer.
    BankTransfer,
    /// Paper or digital voucher.
    Voucher,
    /// Store gift card.
    GiftCard,
    /// Goods or services exchanged in kind.
    Barter,
    /// Any other method, by its code.
    Other(String),
}

impl PaymentMethod {
    /// Returns the code of the method.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Cash => "cash",
            Self::Card => "card",
            Self::QrPay => "qr_pay",
            Self::BankTransfer => "bank_transfer",
            Self::Voucher => "voucher",
            Self::GiftCard => "gift_card",
            Self::Barter => "barter",
            Self::Other(code) => code,
        }
    }

    /// Parses a method from its code (case-insensitive). Never fails.
    #[must_use]
    pub fn parse(code: &str) -> Self {
        let normalized = code.trim().to_lowercase();
        match normalized.as_str() {
            "cash" => Self::Cash,
            "card" => Self::Card,
            "qr_pay" | "qr" | "ewallet" => Self::QrPay,
            "bank_transfer" | "transfer" => Self::BankTransfer,
            "voucher" => Self::Voucher,
            "gift_card" => Self::GiftCard,
            "barter" => Self::Barter,
            _ => Self::Other(normalized),
        }
    }

    /// Returns true for cash, the only method reconciled against the drawer.
    #[must_use]
    pub fn is_cash(&self) -> bool {
        matches!(self, Self::Cash)
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for PaymentMethod {
    fn from(code: String) -> Self {
        Self::parse(&code)
    }
}

impl From<PaymentMethod> for String {
    fn from(method: PaymentMethod) -> Self {
        method.as_str().to_string()
    }
}

/// Outcome of an accepted payment.
///
/// Carries the running balance around the new transaction:
/// `remaining_balance = previous_balance - transaction.amount`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentReceipt {
    /// The appended transaction.
    pub transaction: Transaction,
    /// Remaining balance before this payment.
    pub previous_balance: Decimal,
    /// Remaining balance after this payment.
    pub remaining_balance: Decimal,
    /// Ledger version after this payment (number of transactions).
    pub version: u64,
    /// Whether the order is now fully settled.
    pub settled: bool,
}
