use std::fmt;

use serde::{Deserialize, Serialize};

/// The five wizard steps, in order
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum Step {
    #[default]
    Number,
    Plan,
    Register,
    Payment,
    Confirmation,
}

impl Step {
    pub const ALL: [Step; 5] = [
        Step::Number,
        Step::Plan,
        Step::Register,
        Step::Payment,
        Step::Confirmation,
    ];

    /// One-based position of the step
    pub fn index(&self) -> u8 {
        match self {
            Step::Number => 1,
            Step::Plan => 2,
            Step::Register => 3,
            Step::Payment => 4,
            Step::Confirmation => 5,
        }
    }

    pub fn from_index(index: u8) -> Option<Step> {
        Step::ALL.get(usize::from(index).checked_sub(1)?).copied()
    }

    pub fn next(&self) -> Option<Step> {
        Step::from_index(self.index() + 1)
    }

    pub fn prev(&self) -> Option<Step> {
        Step::from_index(self.index() - 1)
    }

    /// Label used in the stepper bar
    pub fn label(&self) -> &'static str {
        match self {
            Step::Number => "Number",
            Step::Plan => "Plan",
            Step::Register => "Register",
            Step::Payment => "Payment",
            Step::Confirmation => "Done",
        }
    }

    /// Screen title
    pub fn title(&self) -> &'static str {
        match self {
            Step::Number => "Choose your number",
            Step::Plan => "Choose a subscription plan",
            Step::Register => "Create your account",
            Step::Payment => "Payment",
            Step::Confirmation => "Confirmation",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label(), self.index())
    }
}

/// Direction of the last navigation, used for presentation only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

/// Amount of money in minor units (cents)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(u64);

impl Money {
    pub const fn from_cents(cents: u64) -> Self {
        Money(cents)
    }

    pub const fn from_units(units: u64) -> Self {
        Money(units * 100)
    }

    pub fn cents(&self) -> u64 {
        self.0
    }

    /// Whole currency units, dropping cents
    pub fn units(&self) -> u64 {
        self.0 / 100
    }

    /// Always two decimals, e.g. `$12.00`
    pub fn fixed(&self) -> String {
        format!("${}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 % 100 == 0 {
            write!(f, "${}", self.0 / 100)
        } else {
            write!(f, "${}.{:02}", self.0 / 100, self.0 % 100)
        }
    }
}

/// Country offered by the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub code: String,
    pub name: String,
}

impl Country {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

/// Phone number picked on the first step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub country: String,
    pub number: String,
}

/// Subscription plan from the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    pub id: String,
    pub name: String,
    pub price: Money,
    pub features: Vec<String>,
}

impl Plan {
    /// `Pro ($12/mo)`
    pub fn summary(&self) -> String {
        format!("{} ({}/mo)", self.name, self.price)
    }
}

/// Account created on the registration step
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password: String,
    #[serde(skip_serializing, default)]
    pub confirm_password: String,
    pub address: Option<String>,
    pub consent_given: bool,
    pub user_id: String,
}

impl fmt::Debug for UserProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserProfile")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("confirm_password", &"<redacted>")
            .field("address", &self.address)
            .field("consent_given", &self.consent_given)
            .field("user_id", &self.user_id)
            .finish()
    }
}

/// Outcome of a successful payment. Raw card data never lands here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentResult {
    pub transaction_id: String,
    pub amount: Money,
    pub last4: String,
}

/// Validated payload a step view hands to the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepResult {
    Number(Selection),
    Plan(Plan),
    Register(UserProfile),
    Payment(PaymentResult),
}

impl StepResult {
    /// The step that emits this kind of result
    pub fn step(&self) -> Step {
        match self {
            StepResult::Number(_) => Step::Number,
            StepResult::Plan(_) => Step::Plan,
            StepResult::Register(_) => Step::Register,
            StepResult::Payment(_) => Step::Payment,
        }
    }
}

/// Everything the wizard has accumulated so far
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WizardState {
    pub current_step: Step,
    pub direction: Direction,
    pub selection: Option<Selection>,
    pub plan: Option<Plan>,
    pub user: Option<UserProfile>,
    pub payment: Option<PaymentResult>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_indices_round_trip() {
        for step in Step::ALL {
            assert_eq!(Step::from_index(step.index()), Some(step));
        }
        assert_eq!(Step::from_index(0), None);
        assert_eq!(Step::from_index(6), None);
        assert_eq!(Step::Confirmation.next(), None);
        assert_eq!(Step::Number.prev(), None);
    }

    #[test]
    fn default_state_starts_on_number() {
        let state = WizardState::default();
        assert_eq!(state.current_step, Step::Number);
        assert_eq!(state.direction, Direction::Forward);
    }

    #[test]
    fn money_formatting() {
        assert_eq!(Money::from_units(12).to_string(), "$12");
        assert_eq!(Money::from_units(12).fixed(), "$12.00");
        assert_eq!(Money::from_cents(1250).to_string(), "$12.50");
        assert_eq!(Money::from_cents(1205).fixed(), "$12.05");
    }

    #[test]
    fn profile_debug_hides_passwords() {
        let profile = UserProfile {
            name: "Jane".into(),
            email: "jane@example.com".into(),
            password: "hunter2hunter2".into(),
            confirm_password: "hunter2hunter2".into(),
            address: None,
            consent_given: true,
            user_id: "usr_1".into(),
        };
        let debug = format!("{:?}", profile);
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("<redacted>"));
    }
}
