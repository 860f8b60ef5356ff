//! Cash module error types.

use shinedesk_shared::AppError;
use thiserror::Error;

/// Errors raised while counting the cash drawer.
#[derive(Debug, Error)]
pub enum CashError {
    /// A denomination was given a negative count.
    #[error("Count for denomination {denomination} cannot be negative: {count}")]
    NegativeCount {
        /// The face value.
        denomination: u32,
        /// The rejected count.
        count: i64,
    },

    /// The face value is not in the configured set.
    #[error("Unknown denomination: {0}")]
    UnknownDenomination(u32),

    /// A face value of zero was configured.
    #[error("Denomination must be positive")]
    InvalidDenomination,

    /// No face values were configured.
    #[error("Denomination set cannot be empty")]
    EmptyDenominationSet,
}

impl CashError {
    /// Returns the error code for the rendering layer.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NegativeCount { .. } => "NEGATIVE_COUNT",
            Self::UnknownDenomination(_) => "UNKNOWN_DENOMINATION",
            Self::InvalidDenomination => "INVALID_DENOMINATION",
            Self::EmptyDenominationSet => "EMPTY_DENOMINATION_SET",
        }
    }

    /// Returns true if this is a rejected operator input.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::NegativeCount { .. } | Self::UnknownDenomination(_)
        )
    }
}

impl From<CashError> for AppError {
    fn from(err: CashError) -> Self {
        match err {
            CashError::InvalidDenomination | CashError::EmptyDenominationSet => {
                Self::Config(err.to_string())
            }
            _ => Self::Validation(err.to_string()),
        }
    }
}
