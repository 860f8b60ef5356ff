//! Receive flow.
//!
//! The state machine an operator walks when a customer collects an order:
//! confirm details, pay, answer the survey, then hand over. The survey step
//! can branch into a complaint, which changes the content of the last step.

pub mod error;
pub mod machine;
pub mod types;

#[cfg(test)]
mod machine_props;

pub use error::FlowError;
pub use machine::ReceiveFlow;
pub use types::{
    Advance, Confirmations, FlowAction, FlowOutcome, ReceiveStep, StepStatus, TerminalVariant,
};
