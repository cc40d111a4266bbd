//! Wizard controller: the only owner of [`WizardState`]
//!
//! Steps run strictly `Number → Plan → Register → Payment → Confirmation`.
//! Views hand validated [`StepResult`]s upward through [`WizardController::advance`];
//! the controller trusts them and never re-validates.

use thiserror::Error;
use tracing::{debug, warn};

use super::state::*;

/// Rejected navigation request. State is left untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransitionError {
    #[error("cannot advance past the confirmation step")]
    AtTerminal,

    #[error("result for step {got} does not match current step {expected}")]
    StepMismatch { expected: Step, got: Step },

    #[error("cannot go back from step {0}")]
    CannotRetreat(Step),
}

/// What the current step should render, with its pre-fill
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepView<'a> {
    Number { selection: Option<&'a Selection> },
    Plan { selected: Option<&'a Plan> },
    Register { defaults: Option<&'a UserProfile> },
    /// Card fields are never pre-filled, only the amount due is carried
    Payment { amount: Money },
    Confirmation(Confirmation<'a>),
}

/// Read-only projection shown on the last step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation<'a> {
    pub number: &'a str,
    pub plan: &'a Plan,
    pub transaction_id: &'a str,
}

impl Confirmation<'_> {
    /// `Plan: Pro ($12/mo)`
    pub fn plan_line(&self) -> String {
        format!("Plan: {}", self.plan.summary())
    }
}

#[derive(Debug, Default)]
pub struct WizardController {
    state: WizardState,
}

impl WizardController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn current_step(&self) -> Step {
        self.state.current_step
    }

    pub fn direction(&self) -> Direction {
        self.state.direction
    }

    /// Back navigation is offered strictly between the first and last step
    pub fn can_retreat(&self) -> bool {
        !matches!(
            self.state.current_step,
            Step::Number | Step::Confirmation
        )
    }

    /// Store the result of the current step and move forward
    pub fn advance(&mut self, result: StepResult) -> Result<Step, TransitionError> {
        let current = self.state.current_step;
        let Some(next) = current.next() else {
            warn!(step = %current, "advance rejected: already at confirmation");
            return Err(TransitionError::AtTerminal);
        };
        if result.step() != current {
            warn!(
                expected = %current,
                got = %result.step(),
                "advance rejected: result does not belong to current step"
            );
            return Err(TransitionError::StepMismatch {
                expected: current,
                got: result.step(),
            });
        }

        match result {
            StepResult::Number(selection) => self.state.selection = Some(selection),
            StepResult::Plan(plan) => self.state.plan = Some(plan),
            StepResult::Register(user) => self.state.user = Some(user),
            StepResult::Payment(payment) => self.state.payment = Some(payment),
        }
        self.state.direction = Direction::Forward;
        self.state.current_step = next;

        debug!(from = %current, to = %next, "wizard advanced");
        Ok(next)
    }

    /// Step back one screen without clearing anything already stored
    pub fn retreat(&mut self) -> Result<Step, TransitionError> {
        let current = self.state.current_step;
        if !self.can_retreat() {
            warn!(step = %current, "retreat rejected");
            return Err(TransitionError::CannotRetreat(current));
        }
        let prev = current
            .prev()
            .ok_or(TransitionError::CannotRetreat(current))?;

        self.state.direction = Direction::Backward;
        self.state.current_step = prev;

        debug!(from = %current, to = %prev, "wizard retreated");
        Ok(prev)
    }

    /// Start over: clear every accumulated field and return to the first step
    pub fn reset(&mut self) {
        debug!(from = %self.state.current_step, "wizard reset");
        self.state = WizardState::default();
    }

    /// View for the current step, or `None` when the state cannot back it
    pub fn current_view(&self) -> Option<StepView<'_>> {
        match self.state.current_step {
            Step::Number => Some(StepView::Number {
                selection: self.state.selection.as_ref(),
            }),
            Step::Plan => Some(StepView::Plan {
                selected: self.state.plan.as_ref(),
            }),
            Step::Register => Some(StepView::Register {
                defaults: self.state.user.as_ref(),
            }),
            Step::Payment => self
                .state
                .plan
                .as_ref()
                .map(|plan| StepView::Payment { amount: plan.price }),
            Step::Confirmation => self.confirmation().map(StepView::Confirmation),
        }
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut WizardState {
        &mut self.state
    }

    /// Present only when selection, plan and payment are all stored
    pub fn confirmation(&self) -> Option<Confirmation<'_>> {
        let selection = self.state.selection.as_ref()?;
        let plan = self.state.plan.as_ref()?;
        let payment = self.state.payment.as_ref()?;
        Some(Confirmation {
            number: &selection.number,
            plan,
            transaction_id: &payment.transaction_id,
        })
    }
}
