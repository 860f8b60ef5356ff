//! Business rule validation for payments.

use rust_decimal::Decimal;

use super::error::LedgerError;

/// Validates a payment amount against the remaining balance.
///
/// Overpayment is never allowed: the ledger has no refund or change-giving
/// transaction type.
///
/// # Errors
///
/// Returns an error if the amount is zero, negative, or above `remaining`.
pub fn validate_payment(amount: Decimal, remaining: Decimal) -> Result<(), LedgerError> {
    if amount.is_zero() {
        return Err(LedgerError::ZeroAmount);
    }
    if amount < Decimal::ZERO {
        return Err(LedgerError::NegativeAmount);
    }
    if remaining.is_zero() {
        return Err(LedgerError::AlreadySettled);
    }
    if amount > remaining {
        return Err(LedgerError::Overpayment { amount, remaining });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_exact_payment() {
        assert!(validate_payment(dec!(33000), dec!(33000)).is_ok());
    }

    #[test]
    fn test_partial_payment() {
        assert!(validate_payment(dec!(10000), dec!(33000)).is_ok());
    }

    #[test]
    fn test_overpayment() {
        assert!(matches!(
            validate_payment(dec!(40000), dec!(33000)),
            Err(LedgerError::Overpayment { amount, remaining })
                if amount == dec!(40000) && remaining == dec!(33000)
        ));
    }

    #[test]
    fn test_zero_and_negative() {
        assert!(matches!(
            validate_payment(Decimal::ZERO, dec!(100)),
            Err(LedgerError::ZeroAmount)
        ));
        assert!(matches!(
            validate_payment(dec!(-1), dec!(100)),
            Err(LedgerError::NegativeAmount)
        ));
    }

    #[test]
    fn test_settled_order() {
        assert!(matches!(
            validate_payment(dec!(1), Decimal::ZERO),
            Err(LedgerError::AlreadySettled)
        ));
    }
}
