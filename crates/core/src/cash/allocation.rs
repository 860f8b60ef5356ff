//! Proportional split of an amount using the Largest Remainder Method.
//!
//! Each share is rounded down to the currency unit, then the units left over
//! go to the shares with the largest fractional parts, so the shares always
//! sum to the original amount.

use rust_decimal::Decimal;
use rust_decimal::RoundingStrategy;
use shinedesk_shared::types::CURRENCY_DECIMAL_PLACES;

/// Splits `total` in proportion to `weights`, in whole currency units.
///
/// Ties in the fractional part go to the earlier weight. When every weight is
/// zero the whole amount goes to the first share.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use shinedesk_core::cash::allocate_by_weights;
///
/// // 100 split 1:1:1 = [34, 33, 33]
/// let shares = allocate_by_weights(dec!(100), &[dec!(1), dec!(1), dec!(1)]);
/// assert_eq!(shares, vec![dec!(34), dec!(33), dec!(33)]);
/// ```
#[must_use]
pub fn allocate_by_weights(total: Decimal, weights: &[Decimal]) -> Vec<Decimal> {
    if weights.is_empty() {
        return vec![];
    }

    let weight_total: Decimal = weights.iter().copied().sum();
    if weight_total.is_zero() {
        let mut shares = vec![Decimal::ZERO; weights.len()];
        shares[0] = total;
        return shares;
    }

    let unit = Decimal::new(1, CURRENCY_DECIMAL_PLACES);
    let exact: Vec<Decimal> = weights.iter().map(|w| total * *w / weight_total).collect();
    let mut shares: Vec<Decimal> = exact
        .iter()
        .map(|e| e.round_dp_with_strategy(CURRENCY_DECIMAL_PLACES, RoundingStrategy::ToZero))
        .collect();

    let mut leftover = total - shares.iter().copied().sum::<Decimal>();

    // Stable sort keeps the earlier share first on equal remainders.
    let mut remainders: Vec<(usize, Decimal)> = exact
        .iter()
        .zip(&shares)
        .map(|(e, s)| *e - *s)
        .enumerate()
        .collect();
    remainders.sort_by(|a, b| b.1.cmp(&a.1));

    for (index, _) in remainders {
        if leftover < unit {
            break;
        }
        shares[index] += unit;
        leftover -= unit;
    }

    shares
}
