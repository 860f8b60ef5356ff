//! Currency amount helpers.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Amounts are `rust_decimal::Decimal` in whole units of the shop currency.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places kept for the shop currency (whole units).
pub const CURRENCY_DECIMAL_PLACES: u32 = 0;

/// Rounds an amount to the shop currency precision.
///
/// Midpoints round away from zero, so `2.5` becomes `3` for the non-negative
/// amounts this is applied to.
#[must_use]
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(
        CURRENCY_DECIMAL_PLACES,
        RoundingStrategy::MidpointAwayFromZero,
    )
}

/// Returns `amount`, or zero when it is negative.
#[must_use]
pub fn clamp_non_negative(amount: Decimal) -> Decimal {
    amount.max(Decimal::ZERO)
}
