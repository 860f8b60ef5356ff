//! Order settlement.
//!
//! Turns an order's line items, cancellations, discount, points and VAT
//! policy into a single owed balance:
//! - Line items and their service sub-charges
//! - Derived cancellation records
//! - The pure settlement calculator
//! - Validation errors for malformed input

pub mod calculator;
pub mod error;
pub mod types;

#[cfg(test)]
mod calculator_props;

pub use calculator::SettlementCalculator;
pub use error::SettlementError;
pub use types::{
    CancellationRecord, Category, CategoryFigures, CategoryTotals, ItemStatus, LineItem, Service,
    SettlementFigures, SettlementPolicy,
};
