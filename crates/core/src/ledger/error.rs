//! Ledger error types for payment validation and concurrency errors.

use rust_decimal::Decimal;
use shinedesk_shared::AppError;
use shinedesk_shared::types::OrderId;
use thiserror::Error;

/// Errors that can occur during payment ledger operations.
///
/// Every error leaves the ledger unchanged.
#[derive(Debug, Error)]
pub enum LedgerError {
    // ========== Validation Errors ==========
    /// Payment amount cannot be zero.
    #[error("Payment amount cannot be zero")]
    ZeroAmount,

    /// Payment amount cannot be negative.
    #[error("Payment amount cannot be negative")]
    NegativeAmount,

    /// Payment would exceed the remaining balance.
    #[error("Payment of {amount} exceeds the remaining balance of {remaining}")]
    Overpayment {
        /// The attempted amount.
        amount: Decimal,
        /// The remaining balance at the time of the attempt.
        remaining: Decimal,
    },

    /// The order is already fully settled.
    #[error("Order is already fully settled")]
    AlreadySettled,

    // ========== Registry Errors ==========
    /// No ledger is registered for the order.
    #[error("No payment ledger registered for order {0}")]
    OrderNotRegistered(OrderId),

    /// The ledger changed since the caller read it.
    #[error("Ledger version mismatch for order {order_id}: expected {expected}, got {actual}")]
    VersionMismatch {
        /// The order ID.
        order_id: OrderId,
        /// The version the caller read.
        expected: u64,
        /// The current version.
        actual: u64,
    },
}

impl LedgerError {
    /// Returns the error code for the rendering layer.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ZeroAmount => "ZERO_AMOUNT",
            Self::NegativeAmount => "NEGATIVE_AMOUNT",
            Self::Overpayment { .. } => "OVERPAYMENT",
            Self::AlreadySettled => "ALREADY_SETTLED",
            Self::OrderNotRegistered(_) => "ORDER_NOT_REGISTERED",
            Self::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }

    /// Returns true if this is a rejected operator input.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ZeroAmount | Self::NegativeAmount | Self::Overpayment { .. } | Self::AlreadySettled
        )
    }

    /// Returns true if re-reading the balance and retrying may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::VersionMismatch { .. })
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::OrderNotRegistered(_) => Self::NotFound(err.to_string()),
            LedgerError::VersionMismatch { .. } => Self::Conflict(err.to_string()),
            _ => Self::Validation(err.to_string()),
        }
    }
}
