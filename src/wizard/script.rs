//! Headless run of the whole wizard from a fixed set of answers
//!
//! Drives the same controller and step forms as the TUI, step by step,
//! following whatever [`WizardController::current_view`] asks for.

use serde::{Deserialize, Serialize};
use tracing::info;

use super::controller::{StepView, WizardController};
use super::forms::{
    NumberForm, PaymentField, PaymentForm, PlanForm, RegisterField, RegistrationForm,
};
use super::state::{Money, Step, StepResult};
use crate::providers::{ActionProvider, CatalogProvider};
use crate::{CooeeError, Result};

/// Answers for every step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupScript {
    pub country: String,
    pub number_index: usize,
    pub plan_id: String,
    pub name: String,
    pub email: String,
    pub password: String,
    pub address: Option<String>,
    pub card_number: String,
    pub expiry: String,
    pub cvc: String,
    pub cardholder: String,
}

impl Default for SignupScript {
    fn default() -> Self {
        Self {
            country: "US".to_string(),
            number_index: 0,
            plan_id: "pro".to_string(),
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            password: "longenough".to_string(),
            address: None,
            card_number: "4111111111111111".to_string(),
            expiry: "12/29".to_string(),
            cvc: "123".to_string(),
            cardholder: "Jane Doe".to_string(),
        }
    }
}

/// What the confirmation screen showed at the end of a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupSummary {
    pub country: String,
    pub number: String,
    pub plan_id: String,
    /// `Pro ($12/mo)`
    pub plan: String,
    pub amount: Money,
    pub user_id: String,
    pub transaction_id: String,
    pub last4: String,
}

impl SignupScript {
    /// Walk the controller from its current step to the confirmation
    pub async fn run(
        &self,
        controller: &mut WizardController,
        catalog: &dyn CatalogProvider,
        actions: &dyn ActionProvider,
    ) -> Result<SignupSummary> {
        loop {
            let step = controller.current_step();
            let view = controller.current_view().ok_or_else(|| CooeeError::StepFailed {
                step,
                message: "wizard state cannot render this step".to_string(),
            })?;

            let result = match view {
                StepView::Number { selection } => {
                    let mut form = NumberForm::new(selection);
                    self.number_step(&mut form, catalog).await?
                }
                StepView::Plan { selected } => {
                    let mut form = PlanForm::new(selected);
                    self.plan_step(&mut form, catalog).await?
                }
                StepView::Register { defaults } => {
                    let mut form = RegistrationForm::from_defaults(defaults);
                    self.register_step(&mut form, actions).await?
                }
                StepView::Payment { amount } => {
                    let mut form = PaymentForm::new(amount);
                    self.payment_step(&mut form, actions).await?
                }
                StepView::Confirmation(_) => return summarize(controller),
            };

            let next = controller.advance(result)?;
            info!(step = %next, "Scripted signup advanced");
        }
    }

    async fn number_step(
        &self,
        form: &mut NumberForm,
        catalog: &dyn CatalogProvider,
    ) -> Result<StepResult> {
        form.load_countries(catalog).await;
        let countries = form
            .countries
            .ready()
            .ok_or_else(|| failed(Step::Number, form.countries.error()))?;
        if !countries.iter().any(|c| c.code == self.country) {
            return Err(CooeeError::Validation(format!(
                "unknown country '{}'",
                self.country
            )));
        }

        form.select_country(&self.country);
        form.load_numbers(catalog).await;
        if let Some(message) = form.numbers.error() {
            return Err(failed(Step::Number, Some(message)));
        }

        let selection = form.choose_number(self.number_index).ok_or_else(|| {
            CooeeError::Validation(format!(
                "number index {} out of range ({} numbers offered)",
                self.number_index,
                form.available_numbers().len()
            ))
        })?;
        Ok(StepResult::Number(selection))
    }

    async fn plan_step(
        &self,
        form: &mut PlanForm,
        catalog: &dyn CatalogProvider,
    ) -> Result<StepResult> {
        form.load(catalog).await;
        if let Some(message) = form.plans.error() {
            return Err(failed(Step::Plan, Some(message)));
        }
        let plan = form
            .choose_id(&self.plan_id)
            .ok_or_else(|| CooeeError::Validation(format!("unknown plan '{}'", self.plan_id)))?;
        Ok(StepResult::Plan(plan))
    }

    async fn register_step(
        &self,
        form: &mut RegistrationForm,
        actions: &dyn ActionProvider,
    ) -> Result<StepResult> {
        form.set_value(RegisterField::Name, self.name.as_str());
        form.set_value(RegisterField::Email, self.email.as_str());
        form.set_value(RegisterField::Password, self.password.as_str());
        form.set_value(RegisterField::Confirm, self.password.as_str());
        form.set_value(RegisterField::Address, self.address.clone().unwrap_or_default());
        form.set_consent(true);

        if !form.is_valid() {
            return Err(CooeeError::Validation(field_errors(
                RegisterField::ALL.iter().filter_map(|f| form.field_error(*f)),
            )));
        }
        match form.submit(actions).await {
            Some(profile) => Ok(StepResult::Register(profile)),
            None => Err(failed(Step::Register, form.error())),
        }
    }

    async fn payment_step(
        &self,
        form: &mut PaymentForm,
        actions: &dyn ActionProvider,
    ) -> Result<StepResult> {
        form.set_value(PaymentField::Name, &self.cardholder);
        form.set_value(PaymentField::Number, &self.card_number);
        form.set_value(PaymentField::Expiry, &self.expiry);
        form.set_value(PaymentField::Cvc, &self.cvc);

        if !form.is_valid() {
            return Err(CooeeError::Validation(field_errors(
                PaymentField::ALL.iter().filter_map(|f| form.field_error(*f)),
            )));
        }
        match form.submit(actions).await {
            Some(payment) => Ok(StepResult::Payment(payment)),
            None => Err(failed(Step::Payment, form.error())),
        }
    }
}

fn summarize(controller: &WizardController) -> Result<SignupSummary> {
    let state = controller.state();
    let (Some(selection), Some(plan), Some(payment)) = (
        state.selection.as_ref(),
        state.plan.as_ref(),
        state.payment.as_ref(),
    ) else {
        return Err(failed(
            Step::Confirmation,
            Some("confirmation is missing its number, plan or payment"),
        ));
    };

    Ok(SignupSummary {
        country: selection.country.clone(),
        number: selection.number.clone(),
        plan_id: plan.id.clone(),
        plan: plan.summary(),
        amount: payment.amount,
        user_id: state
            .user
            .as_ref()
            .map(|u| u.user_id.clone())
            .unwrap_or_default(),
        transaction_id: payment.transaction_id.clone(),
        last4: payment.last4.clone(),
    })
}

fn failed(step: Step, message: Option<&str>) -> CooeeError {
    CooeeError::StepFailed {
        step,
        message: message.unwrap_or("unexpected state").to_string(),
    }
}

fn field_errors<'a>(errors: impl Iterator<Item = &'a str>) -> String {
    errors.collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::{Selection, StepResult};

    #[test]
    fn summary_needs_a_finished_wizard() {
        let mut controller = WizardController::new();
        controller
            .advance(StepResult::Number(Selection {
                country: "US".into(),
                number: "+1 (415) 555-0199".into(),
            }))
            .unwrap();

        match summarize(&controller) {
            Err(CooeeError::StepFailed { step, .. }) => assert_eq!(step, Step::Confirmation),
            other => panic!("expected StepFailed, got {:?}", other),
        }
    }
}
