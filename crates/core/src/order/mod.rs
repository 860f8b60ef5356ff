//! Orders as consumed by the settlement core.
//!
//! Orders are built elsewhere and read through [`OrderRepository`]; the core
//! only edits item statuses and appends payments.

pub mod repository;
pub mod types;

pub use repository::{InMemoryOrderRepository, OrderRepository, RepositoryError};
pub use types::Order;
