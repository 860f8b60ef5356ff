//! Property-based tests for the receive flow.
//!
//! Random operator sessions must never leave the step statuses out of step
//! with the pointer, and a refused action must never change the flow.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use shinedesk_shared::types::{BranchId, CustomerId};

use super::machine::ReceiveFlow;
use super::types::{ReceiveStep, StepStatus, TerminalVariant};
use crate::ledger::PaymentMethod;
use crate::order::Order;
use crate::settlement::{Category, LineItem, SettlementPolicy};

#[derive(Debug, Clone)]
enum Action {
    ConfirmInfo(bool),
    ConfirmItems(bool),
    Advance,
    Retreat,
    Complaint,
    PayInFull,
    AddCharge(i64),
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        any::<bool>().prop_map(Action::ConfirmInfo),
        any::<bool>().prop_map(Action::ConfirmItems),
        Just(Action::Advance),
        Just(Action::Advance),
        Just(Action::Retreat),
        Just(Action::Complaint),
        Just(Action::PayInFull),
        (1i64..=20_000i64).prop_map(Action::AddCharge),
    ]
}

fn add_charge(order: &mut Order, price: i64) {
    order
        .line_items
        .push(LineItem::new("care kit", Category::Product, Decimal::from(price)));
}

fn order(price: i64) -> Order {
    Order::new(
        CustomerId::new(),
        BranchId::new(),
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
        vec![LineItem::new("sneakers", Category::Service, Decimal::from(price))],
        SettlementPolicy::default(),
    )
}

/// Steps before the pointer are completed, steps after it are pending.
fn assert_consistent(flow: &ReceiveFlow) -> Result<(), TestCaseError> {
    let current = flow.current_step();
    for step in ReceiveStep::ALL {
        let status = flow.status(step);
        if step < current {
            prop_assert_eq!(status, StepStatus::Completed);
        } else if step > current {
            prop_assert_eq!(status, StepStatus::Pending);
        }
    }

    let current_status = flow.status(current);
    match flow.variant() {
        TerminalVariant::Complaint => {
            prop_assert_eq!(current, ReceiveStep::Complete);
            prop_assert_eq!(current_status, StepStatus::Warning);
        }
        TerminalVariant::Complete if flow.is_closed() => {
            prop_assert_eq!(current_status, StepStatus::Completed);
        }
        TerminalVariant::Complete => {
            prop_assert_eq!(current_status, StepStatus::Active);
        }
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Statuses always agree with the pointer and the complaint variant.
    #[test]
    fn prop_statuses_follow_pointer(
        price in prop_oneof![Just(0i64), 1i64..=100_000i64],
        actions in prop::collection::vec(action(), 0..40),
    ) {
        let mut order = order(price);
        let mut flow = ReceiveFlow::new(order.id);

        for action in actions {
            let before = flow.clone();
            let result = match action {
                Action::ConfirmInfo(checked) => flow.confirm_customer_info(checked),
                Action::ConfirmItems(checked) => flow.confirm_items(checked),
                Action::Advance => flow.advance(&order).map(|_| ()),
                Action::Retreat => flow.retreat().map(|_| ()),
                Action::Complaint => flow.file_complaint(None),
                Action::PayInFull => {
                    let remaining = order.remaining_balance();
                    if !remaining.is_zero() {
                        order.accept_payment(PaymentMethod::Cash, remaining).unwrap();
                    }
                    Ok(())
                }
                Action::AddCharge(price) => {
                    add_charge(&mut order, price);
                    Ok(())
                }
            };

            if result.is_err() {
                prop_assert_eq!(&flow, &before);
            }
            assert_consistent(&flow)?;
        }
    }

    /// The survey step is only reached once the order is settled, or when
    /// nothing was owed as the payment step was entered from the first step.
    /// Charges added mid-flow and trips back through the payment step must
    /// not open a way around the balance check.
    #[test]
    fn prop_survey_requires_settlement(
        price in prop_oneof![Just(0i64), 1i64..=100_000i64],
        actions in prop::collection::vec(action(), 0..40),
    ) {
        let mut order = order(price);
        let mut flow = ReceiveFlow::new(order.id);
        let mut owed_nothing_on_entry = false;

        for action in actions {
            let from = flow.current_step();
            match action {
                Action::ConfirmInfo(checked) => { let _ = flow.confirm_customer_info(checked); }
                Action::ConfirmItems(checked) => { let _ = flow.confirm_items(checked); }
                Action::Advance => {
                    let balance_zero = order.remaining_balance().is_zero();
                    if flow.advance(&order).is_ok() {
                        if from == ReceiveStep::InfoConfirm {
                            owed_nothing_on_entry = balance_zero;
                        }
                        if from == ReceiveStep::Payment {
                            prop_assert!(order.is_settled() || owed_nothing_on_entry);
                        }
                    }
                }
                Action::Retreat => {
                    if matches!(flow.retreat(), Ok(ReceiveStep::Payment)) {
                        owed_nothing_on_entry = false;
                    }
                }
                Action::Complaint => { let _ = flow.file_complaint(None); }
                Action::PayInFull => {
                    let remaining = order.remaining_balance();
                    if !remaining.is_zero() {
                        order.accept_payment(PaymentMethod::Cash, remaining).unwrap();
                    }
                }
                Action::AddCharge(price) => add_charge(&mut order, price),
            }
        }
    }

    /// A flow sent back to the payment step never moves on while money is owed.
    #[test]
    fn prop_returning_to_payment_needs_settlement(
        first in 0i64..=50_000i64,
        extra in 1i64..=50_000i64,
        pay_first in any::<bool>(),
    ) {
        let mut order = order(first);
        let mut flow = ReceiveFlow::new(order.id);
        flow.confirm_customer_info(true).unwrap();
        flow.confirm_items(true).unwrap();
        flow.advance(&order).unwrap();
        if pay_first {
            let remaining = order.remaining_balance();
            if !remaining.is_zero() {
                order.accept_payment(PaymentMethod::Cash, remaining).unwrap();
            }
        } else if !order.is_settled() {
            return Ok(());
        }
        flow.advance(&order).unwrap();

        add_charge(&mut order, extra);
        prop_assert!(matches!(flow.retreat(), Ok(ReceiveStep::Payment)));
        prop_assert!(flow.advance(&order).is_err());
        prop_assert_eq!(flow.current_step(), ReceiveStep::Payment);
    }
}
