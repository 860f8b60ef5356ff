//! Common types used across the application.

pub mod id;
pub mod money;

pub use id::*;
pub use money::{CURRENCY_DECIMAL_PLACES, clamp_non_negative, round_currency};
