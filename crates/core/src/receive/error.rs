//! Receive flow error types.

use rust_decimal::Decimal;
use shinedesk_shared::AppError;
use shinedesk_shared::types::OrderId;
use thiserror::Error;

use super::types::{FlowAction, ReceiveStep};

/// Errors returned when a receive flow transition is refused.
///
/// A refused transition never changes the flow.
#[derive(Debug, Error)]
pub enum FlowError {
    /// Both confirmation boxes must be ticked before leaving the first step.
    #[error("Customer details and items must both be confirmed")]
    ConfirmationRequired {
        /// Whether the customer details box is ticked.
        customer_info: bool,
        /// Whether the items box is ticked.
        items: bool,
    },

    /// The order is not settled yet.
    #[error("Order still has {remaining} outstanding")]
    BalanceOutstanding {
        /// Amount still to be paid.
        remaining: Decimal,
    },

    /// The action is not available on the current step.
    #[error("Cannot {action} from step {step}")]
    InvalidTransition {
        /// The attempted action.
        action: FlowAction,
        /// The step the flow is on.
        step: ReceiveStep,
    },

    /// The flow was given a different order than the one it drives.
    #[error("Flow belongs to order {expected}, got order {actual}")]
    OrderMismatch {
        /// The flow's order.
        expected: OrderId,
        /// The order passed in.
        actual: OrderId,
    },

    /// The flow is already closed.
    #[error("Receive flow is closed")]
    FlowClosed,
}

impl FlowError {
    /// Returns the error code for the rendering layer.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ConfirmationRequired { .. } => "CONFIRMATION_REQUIRED",
            Self::BalanceOutstanding { .. } => "BALANCE_OUTSTANDING",
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::OrderMismatch { .. } => "ORDER_MISMATCH",
            Self::FlowClosed => "FLOW_CLOSED",
        }
    }

    /// Returns true if the operator can fix this by completing the step.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ConfirmationRequired { .. } | Self::BalanceOutstanding { .. }
        )
    }
}

impl From<FlowError> for AppError {
    fn from(err: FlowError) -> Self {
        match err {
            FlowError::ConfirmationRequired { .. } => Self::Validation(err.to_string()),
            FlowError::BalanceOutstanding { .. } | FlowError::InvalidTransition { .. } => {
                Self::BusinessRule(err.to_string())
            }
            FlowError::OrderMismatch { .. } => Self::Internal(err.to_string()),
            FlowError::FlowClosed => Self::Conflict(err.to_string()),
        }
    }
}
