use std::collections::HashMap;

use tui_input::Input;

use crate::wizard::forms::{
    NumberForm, PaymentField, PaymentForm, PlanForm, RegisterField, RegistrationForm,
};
use crate::wizard::{Step, StepView};

/// Screen for the controller's current step, with its form and cursors
#[derive(Debug)]
pub enum ScreenState {
    Number(NumberScreen),
    Plan(PlanScreen),
    Register(RegisterScreen),
    Payment(PaymentScreen),
    Confirmation,
}

impl ScreenState {
    /// Fresh screen for a controller view, pre-filled from it
    pub fn from_view(view: &StepView<'_>) -> Self {
        match view {
            StepView::Number { selection } => {
                ScreenState::Number(NumberScreen::new(NumberForm::new(*selection)))
            }
            StepView::Plan { selected } => ScreenState::Plan(PlanScreen::new(PlanForm::new(*selected))),
            StepView::Register { defaults } => {
                ScreenState::Register(RegisterScreen::new(RegistrationForm::from_defaults(*defaults)))
            }
            StepView::Payment { amount } => {
                ScreenState::Payment(PaymentScreen::new(PaymentForm::new(*amount)))
            }
            StepView::Confirmation(_) => ScreenState::Confirmation,
        }
    }

    pub fn step(&self) -> Step {
        match self {
            ScreenState::Number(_) => Step::Number,
            ScreenState::Plan(_) => Step::Plan,
            ScreenState::Register(_) => Step::Register,
            ScreenState::Payment(_) => Step::Payment,
            ScreenState::Confirmation => Step::Confirmation,
        }
    }

    /// Screens with free text entry swallow plain character keys
    pub fn takes_text(&self) -> bool {
        matches!(self, ScreenState::Register(_) | ScreenState::Payment(_))
    }

    /// A provider call whose outcome the screen still waits for
    pub fn is_busy(&self) -> bool {
        match self {
            ScreenState::Register(s) => s.form.is_submitting(),
            ScreenState::Payment(s) => s.form.is_submitting(),
            _ => false,
        }
    }
}

/// Which list on the number screen has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumberFocus {
    #[default]
    Countries,
    Numbers,
}

#[derive(Debug, Default)]
pub struct NumberScreen {
    pub form: NumberForm,
    pub focus: NumberFocus,
    pub country_cursor: usize,
    pub number_cursor: usize,
    pub countries_request: Option<u64>,
    pub numbers_request: Option<u64>,
}

impl NumberScreen {
    pub fn new(form: NumberForm) -> Self {
        // Coming back with a stored selection lands on the number list
        let focus = if form.country.is_some() {
            NumberFocus::Numbers
        } else {
            NumberFocus::Countries
        };
        Self {
            form,
            focus,
            ..Default::default()
        }
    }

    /// Country under the cursor
    pub fn highlighted_country(&self) -> Option<&str> {
        self.form
            .countries
            .ready()
            .and_then(|countries| countries.get(self.country_cursor))
            .map(|c| c.code.as_str())
    }

    /// Put the cursors back on the remembered country and number
    pub fn sync_cursors(&mut self) {
        if let (Some(countries), Some(code)) = (self.form.countries.ready(), &self.form.country) {
            if let Some(pos) = countries.iter().position(|c| &c.code == code) {
                self.country_cursor = pos;
            }
        }
        self.number_cursor = self
            .form
            .selected_number
            .as_ref()
            .and_then(|n| self.form.available_numbers().iter().position(|x| x == n))
            .unwrap_or(0);
    }
}

#[derive(Debug, Default)]
pub struct PlanScreen {
    pub form: PlanForm,
    pub cursor: usize,
    pub request: Option<u64>,
}

impl PlanScreen {
    pub fn new(form: PlanForm) -> Self {
        Self {
            form,
            ..Default::default()
        }
    }

    pub fn sync_cursor(&mut self) {
        self.cursor = self.form.selected_index().unwrap_or(0);
    }
}

#[derive(Debug)]
pub struct RegisterScreen {
    pub form: RegistrationForm,
    pub focus: usize,
    pub inputs: HashMap<RegisterField, Input>,
    pub request: Option<u64>,
}

impl RegisterScreen {
    pub fn new(form: RegistrationForm) -> Self {
        let inputs = RegisterField::ALL
            .iter()
            .filter(|f| **f != RegisterField::Consent)
            .map(|f| (*f, Input::new(form.value(*f).to_string())))
            .collect();
        Self {
            form,
            focus: 0,
            inputs,
            request: None,
        }
    }

    pub fn focused_field(&self) -> RegisterField {
        RegisterField::ALL[self.focus % RegisterField::ALL.len()]
    }

    /// Leave the focused field, marking it touched, and move one field over
    pub fn move_focus(&mut self, forward: bool) {
        self.form.touch(self.focused_field());
        let len = RegisterField::ALL.len();
        self.focus = if forward {
            (self.focus + 1) % len
        } else {
            (self.focus + len - 1) % len
        };
    }
}

#[derive(Debug)]
pub struct PaymentScreen {
    pub form: PaymentForm,
    pub focus: usize,
    pub inputs: HashMap<PaymentField, Input>,
    pub request: Option<u64>,
}

impl PaymentScreen {
    pub fn new(form: PaymentForm) -> Self {
        let inputs = PaymentField::ALL
            .iter()
            .map(|f| (*f, Input::new(form.value(*f).to_string())))
            .collect();
        Self {
            form,
            focus: 0,
            inputs,
            request: None,
        }
    }

    pub fn focused_field(&self) -> PaymentField {
        PaymentField::ALL[self.focus % PaymentField::ALL.len()]
    }

    pub fn move_focus(&mut self, forward: bool) {
        self.form.touch(self.focused_field());
        let len = PaymentField::ALL.len();
        self.focus = if forward {
            (self.focus + 1) % len
        } else {
            (self.focus + len - 1) % len
        };
    }

    /// Rebuild the inputs from the form, after it normalized or cleared values
    pub fn resync_inputs(&mut self) {
        for field in PaymentField::ALL {
            let value = self.form.value(field);
            if self.inputs.get(&field).map(Input::value) != Some(value) {
                self.inputs.insert(field, Input::new(value.to_string()));
            }
        }
    }
}
