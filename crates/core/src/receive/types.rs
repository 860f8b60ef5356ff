//! Receive flow domain types.
//!
//! The flow walks an order through four ordered steps:
//! - InfoConfirm → Payment (both confirmations given)
//! - Payment → Survey (order settled)
//! - Survey → Complete (no guard), or Survey → Complete as a complaint
//! - Complete → closed (operator confirms)

use serde::{Deserialize, Serialize};
use std::fmt;

/// One step of the receive flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReceiveStep {
    /// Customer details and items are checked with the customer.
    InfoConfirm,
    /// The owed balance is paid.
    Payment,
    /// The customer answers the satisfaction survey.
    Survey,
    /// Hand-over, either as a normal completion or as a complaint.
    Complete,
}

impl ReceiveStep {
    /// All steps, in flow order.
    pub const ALL: [Self; 4] = [Self::InfoConfirm, Self::Payment, Self::Survey, Self::Complete];

    /// Zero-based position of the step.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::InfoConfirm => 0,
            Self::Payment => 1,
            Self::Survey => 2,
            Self::Complete => 3,
        }
    }

    /// One-based step number, as shown to the operator.
    #[must_use]
    pub fn number(self) -> u8 {
        match self {
            Self::InfoConfirm => 1,
            Self::Payment => 2,
            Self::Survey => 3,
            Self::Complete => 4,
        }
    }

    /// The following step, if any.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        match self {
            Self::InfoConfirm => Some(Self::Payment),
            Self::Payment => Some(Self::Survey),
            Self::Survey => Some(Self::Complete),
            Self::Complete => None,
        }
    }

    /// The preceding step, if any.
    #[must_use]
    pub fn previous(self) -> Option<Self> {
        match self {
            Self::InfoConfirm => None,
            Self::Payment => Some(Self::InfoConfirm),
            Self::Survey => Some(Self::Payment),
            Self::Complete => Some(Self::Survey),
        }
    }

    /// Returns the string representation of the step.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InfoConfirm => "info_confirm",
            Self::Payment => "payment",
            Self::Survey => "survey",
            Self::Complete => "complete",
        }
    }
}

impl fmt::Display for ReceiveStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Progress indicator status of a single step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    /// Not reached yet.
    #[default]
    Pending,
    /// The step the operator is on.
    Active,
    /// Passed.
    Completed,
    /// Reached through the complaint branch.
    Warning,
}

impl StepStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Warning => "warning",
        }
    }
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Content shown on the final step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TerminalVariant {
    /// Normal hand-over.
    #[default]
    Complete,
    /// The customer filed a complaint during the survey.
    Complaint,
}

/// The two confirmation checkboxes of the first step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Confirmations {
    /// Customer details were checked.
    pub customer_info: bool,
    /// Items were checked against the order.
    pub items: bool,
}

impl Confirmations {
    /// True when both boxes are ticked.
    #[must_use]
    pub fn both(self) -> bool {
        self.customer_info && self.items
    }
}

/// Result of a closed receive flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowOutcome {
    /// How the flow ended.
    pub variant: TerminalVariant,
    /// Operator note attached to a complaint.
    pub complaint_note: Option<String>,
}

/// Result of a successful `advance`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// The pointer moved to this step.
    Moved(ReceiveStep),
    /// The final step was confirmed and the flow is closed.
    Closed(FlowOutcome),
}

/// Operator intents, used to describe refused transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowAction {
    /// Tick or untick the customer details box.
    ConfirmCustomerInfo,
    /// Tick or untick the items box.
    ConfirmItems,
    /// Move to the next step.
    Advance,
    /// Move back one step.
    Retreat,
    /// Take the complaint branch.
    FileComplaint,
}

impl FlowAction {
    /// Returns the string representation of the action.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ConfirmCustomerInfo => "confirm_customer_info",
            Self::ConfirmItems => "confirm_items",
            Self::Advance => "advance",
            Self::Retreat => "retreat",
            Self::FileComplaint => "file_complaint",
        }
    }
}

impl fmt::Display for FlowAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
