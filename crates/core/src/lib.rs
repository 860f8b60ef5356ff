//! Core business logic for Shinedesk.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Orders come in through a repository trait; everything else is computed here.
//!
//! # Modules
//!
//! - `settlement` - Owed balance from line items, cancellations, discount and VAT
//! - `ledger` - Append-only payment ledger that refuses overpayment
//! - `order` - Order aggregate and the repository boundary
//! - `receive` - Receive flow state machine with the complaint branch
//! - `cash` - Denomination tally, day-close aggregation and reconciliation

pub mod cash;
pub mod ledger;
pub mod order;
pub mod receive;
pub mod settlement;
