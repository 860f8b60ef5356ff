//! Day close.
//!
//! This module folds a day's payments into the cash report:
//! - Denomination tally of the physical drawer count
//! - Proportional split of order charges across payment methods
//! - Per-method and per-category aggregation with order-level drill-down
//! - Reconciliation of counted cash against the system figure

pub mod allocation;
pub mod error;
pub mod report;
pub mod tally;
pub mod types;


pub use allocation::allocate_by_weights;
pub use error::CashError;
pub use report::DailyCashAggregator;
pub use tally::{DenominationCount, DenominationSet, TallyLine};
pub use types::{
    CashReconciliation, DailyCashReport, OrderDetailRow, PaymentMethodAggregate,
    ReconciliationVerdict, ReconciliationWarning,
};
