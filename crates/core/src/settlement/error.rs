//! Settlement error types.
//!
//! Computation itself never fails; these errors report malformed order input
//! before it reaches the calculator, and edits that reference unknown items.

use rust_decimal::Decimal;
use shinedesk_shared::AppError;
use shinedesk_shared::types::{LineItemId, ServiceId};
use thiserror::Error;

/// Errors that can occur while validating or editing settlement input.
#[derive(Debug, Error)]
pub enum SettlementError {
    /// A line item has a negative unit price.
    #[error("Line item {0} has a negative price")]
    NegativeLinePrice(LineItemId),

    /// A service has a negative price.
    #[error("Service {0} has a negative price")]
    NegativeServicePrice(ServiceId),

    /// The discount is negative.
    #[error("Discount cannot be negative: {0}")]
    NegativeDiscount(Decimal),

    /// The redeemed points are negative.
    #[error("Points used cannot be negative: {0}")]
    NegativePoints(Decimal),

    /// The VAT rate is outside `[0, 1]`.
    #[error("VAT rate must be between 0 and 1, got {0}")]
    InvalidVatRate(Decimal),

    /// Line item not found on the order.
    #[error("Line item not found: {0}")]
    LineItemNotFound(LineItemId),

    /// Service not found on the line item.
    #[error("Service {service_id} not found on line item {line_item_id}")]
    ServiceNotFound {
        /// The line item searched.
        line_item_id: LineItemId,
        /// The missing service.
        service_id: ServiceId,
    },
}

impl SettlementError {
    /// Returns the error code for the rendering layer.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NegativeLinePrice(_) => "NEGATIVE_LINE_PRICE",
            Self::NegativeServicePrice(_) => "NEGATIVE_SERVICE_PRICE",
            Self::NegativeDiscount(_) => "NEGATIVE_DISCOUNT",
            Self::NegativePoints(_) => "NEGATIVE_POINTS",
            Self::InvalidVatRate(_) => "INVALID_VAT_RATE",
            Self::LineItemNotFound(_) => "LINE_ITEM_NOT_FOUND",
            Self::ServiceNotFound { .. } => "SERVICE_NOT_FOUND",
        }
    }
}

impl From<SettlementError> for AppError {
    fn from(err: SettlementError) -> Self {
        match err {
            SettlementError::LineItemNotFound(_) | SettlementError::ServiceNotFound { .. } => {
                Self::NotFound(err.to_string())
            }
            _ => Self::Validation(err.to_string()),
        }
    }
}
