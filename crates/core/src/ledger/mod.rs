//! Order payment ledger.
//!
//! This module implements the payment side of settlement:
//! - Immutable payment transactions with an open set of payment methods
//! - The append-only per-order ledger that refuses overpayment
//! - Payment validation rules
//! - Error types for ledger operations
//! - A concurrent registry with optimistic version checks

pub mod error;
pub mod payment_ledger;
pub mod registry;
pub mod transaction;
pub mod types;
pub mod validation;

#[cfg(test)]
mod ledger_props;

pub use error::LedgerError;
pub use payment_ledger::PaymentLedger;
pub use registry::LedgerRegistry;
pub use transaction::Transaction;
pub use types::{PaymentMethod, PaymentReceipt};
pub use validation::validate_payment;
