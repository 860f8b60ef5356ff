//! Receive flow state machine.

use serde::{Deserialize, Serialize};
use shinedesk_shared::types::OrderId;
use tracing::debug;

use super::error::FlowError;
use super::types::{
    Advance, Confirmations, FlowAction, FlowOutcome, ReceiveStep, StepStatus, TerminalVariant,
};
use crate::order::Order;

/// Drives one order through confirm → pay → survey → complete.
///
/// Step statuses are updated together with the pointer on every transition,
/// so the progress indicator can never disagree with the current step. The
/// payment guard reads the order's ledger at call time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiveFlow {
    order_id: OrderId,
    current: ReceiveStep,
    statuses: [StepStatus; 4],
    confirmations: Confirmations,
    variant: TerminalVariant,
    complaint_note: Option<String>,
    zero_balance_on_entry: bool,
    closed: bool,
}

impl ReceiveFlow {
    /// Starts a flow for `order_id` on the first step.
    #[must_use]
    pub fn new(order_id: OrderId) -> Self {
        let mut statuses = [StepStatus::Pending; 4];
        statuses[ReceiveStep::InfoConfirm.index()] = StepStatus::Active;
        Self {
            order_id,
            current: ReceiveStep::InfoConfirm,
            statuses,
            confirmations: Confirmations::default(),
            variant: TerminalVariant::Complete,
            complaint_note: None,
            zero_balance_on_entry: false,
            closed: false,
        }
    }

    /// The order this flow drives.
    #[must_use]
    pub fn order_id(&self) -> OrderId {
        self.order_id
    }

    /// The step the operator is on.
    #[must_use]
    pub fn current_step(&self) -> ReceiveStep {
        self.current
    }

    /// Status of one step.
    #[must_use]
    pub fn status(&self, step: ReceiveStep) -> StepStatus {
        self.statuses[step.index()]
    }

    /// Statuses of all steps, in flow order.
    #[must_use]
    pub fn statuses(&self) -> [StepStatus; 4] {
        self.statuses
    }

    /// State of the first step's checkboxes.
    #[must_use]
    pub fn confirmations(&self) -> Confirmations {
        self.confirmations
    }

    /// Content variant of the final step.
    #[must_use]
    pub fn variant(&self) -> TerminalVariant {
        self.variant
    }

    /// Note attached to a filed complaint.
    #[must_use]
    pub fn complaint_note(&self) -> Option<&str> {
        self.complaint_note.as_deref()
    }

    /// True once the final step has been confirmed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Ticks or unticks the customer details box.
    pub fn confirm_customer_info(&mut self, checked: bool) -> Result<(), FlowError> {
        self.ensure_on(ReceiveStep::InfoConfirm, FlowAction::ConfirmCustomerInfo)?;
        self.confirmations.customer_info = checked;
        Ok(())
    }

    /// Ticks or unticks the items box.
    pub fn confirm_items(&mut self, checked: bool) -> Result<(), FlowError> {
        self.ensure_on(ReceiveStep::InfoConfirm, FlowAction::ConfirmItems)?;
        self.confirmations.items = checked;
        Ok(())
    }

    /// Moves to the next step if the current step's guard passes.
    ///
    /// On the final step this confirms the hand-over and closes the flow.
    ///
    /// # Errors
    ///
    /// - `ConfirmationRequired` on the first step unless both boxes are ticked
    /// - `BalanceOutstanding` on the payment step unless the order is settled
    ///   or owed nothing when the step was entered
    /// - `OrderMismatch` if `order` is not the flow's order
    /// - `FlowClosed` after the flow has been closed
    pub fn advance(&mut self, order: &Order) -> Result<Advance, FlowError> {
        self.ensure_open()?;
        if order.id != self.order_id {
            return Err(FlowError::OrderMismatch {
                expected: self.order_id,
                actual: order.id,
            });
        }

        match self.current {
            ReceiveStep::InfoConfirm => {
                if !self.confirmations.both() {
                    return Err(FlowError::ConfirmationRequired {
                        customer_info: self.confirmations.customer_info,
                        items: self.confirmations.items,
                    });
                }
                self.zero_balance_on_entry = order.remaining_balance().is_zero();
                Ok(Advance::Moved(self.move_forward(ReceiveStep::Payment)))
            }
            ReceiveStep::Payment => {
                if !(order.is_settled() || self.zero_balance_on_entry) {
                    return Err(FlowError::BalanceOutstanding {
                        remaining: order.remaining_balance(),
                    });
                }
                Ok(Advance::Moved(self.move_forward(ReceiveStep::Survey)))
            }
            ReceiveStep::Survey => {
                self.variant = TerminalVariant::Complete;
                Ok(Advance::Moved(self.move_forward(ReceiveStep::Complete)))
            }
            ReceiveStep::Complete => Ok(Advance::Closed(self.close())),
        }
    }

    /// Moves back one step, restoring the step statuses.
    ///
    /// Leaving the final step clears complaint mode. Returning to the payment
    /// step drops the zero-balance pass, so moving on again needs a settled
    /// order.
    pub fn retreat(&mut self) -> Result<ReceiveStep, FlowError> {
        self.ensure_open()?;
        let Some(previous) = self.current.previous() else {
            return Err(FlowError::InvalidTransition {
                action: FlowAction::Retreat,
                step: self.current,
            });
        };

        if self.current == ReceiveStep::Complete {
            self.variant = TerminalVariant::Complete;
            self.complaint_note = None;
        }
        if previous == ReceiveStep::Payment {
            self.zero_balance_on_entry = false;
        }
        self.statuses[self.current.index()] = StepStatus::Pending;
        self.statuses[previous.index()] = StepStatus::Active;

        debug!(
            order_id = %self.order_id,
            from = %self.current,
            to = %previous,
            "Receive flow retreated"
        );
        self.current = previous;
        Ok(previous)
    }

    /// Takes the complaint branch from the survey step.
    ///
    /// A blank note is stored as no note.
    pub fn file_complaint(&mut self, note: Option<String>) -> Result<(), FlowError> {
        self.ensure_on(ReceiveStep::Survey, FlowAction::FileComplaint)?;

        self.statuses[ReceiveStep::Survey.index()] = StepStatus::Completed;
        self.statuses[ReceiveStep::Complete.index()] = StepStatus::Warning;
        self.variant = TerminalVariant::Complaint;
        self.complaint_note = note
            .map(|note| note.trim().to_string())
            .filter(|note| !note.is_empty());
        self.current = ReceiveStep::Complete;

        debug!(
            order_id = %self.order_id,
            has_note = self.complaint_note.is_some(),
            "Complaint filed"
        );
        Ok(())
    }

    fn move_forward(&mut self, next: ReceiveStep) -> ReceiveStep {
        self.statuses[self.current.index()] = StepStatus::Completed;
        self.statuses[next.index()] = StepStatus::Active;
        debug!(
            order_id = %self.order_id,
            from = %self.current,
            to = %next,
            "Receive flow advanced"
        );
        self.current = next;
        next
    }

    fn close(&mut self) -> FlowOutcome {
        if self.variant == TerminalVariant::Complete {
            self.statuses[ReceiveStep::Complete.index()] = StepStatus::Completed;
        }
        self.closed = true;
        debug!(order_id = %self.order_id, variant = ?self.variant, "Receive flow closed");
        FlowOutcome {
            variant: self.variant,
            complaint_note: self.complaint_note.clone(),
        }
    }

    fn ensure_open(&self) -> Result<(), FlowError> {
        if self.closed {
            return Err(FlowError::FlowClosed);
        }
        Ok(())
    }

    fn ensure_on(&self, step: ReceiveStep, action: FlowAction) -> Result<(), FlowError> {
        self.ensure_open()?;
        if self.current != step {
            return Err(FlowError::InvalidTransition {
                action,
                step: self.current,
            });
        }
        Ok(())
    }
}
