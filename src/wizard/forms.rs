//! Step view-models
//!
//! Each form owns its inputs, touched flags and in-flight state, and yields
//! exactly one validated result for the controller. Provider failures stay
//! here as a banner message; they never reach the controller.
//!
//! Async submissions are split into `begin_submit` / `finish_submit` so the
//! TUI can run the provider call on a task and feed the outcome back later.
//! Headless callers use the `submit` / `load` helpers instead.

use std::collections::HashSet;

use tracing::{debug, warn};

use super::state::{Country, Money, PaymentResult, Plan, Selection, UserProfile};
use crate::providers::{
    ActionProvider, CatalogProvider, ProviderError, ProviderResult, Receipt, Registration,
};
use crate::validation;

pub const REGISTRATION_FAILED: &str = "Registration failed. Please try again.";
pub const PAYMENT_FAILED: &str = "Payment failed. Please retry.";
pub const COUNTRIES_FAILED: &str = "Could not load countries. Please retry.";
pub const NUMBERS_FAILED: &str = "Could not check availability. Please retry.";
pub const PLANS_FAILED: &str = "Could not load plans. Please retry.";

/// Remote data owned by a view
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Loadable<T> {
    #[default]
    Idle,
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> Loadable<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Loadable::Loading)
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Loadable::Idle)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Loadable::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Loadable::Failed(message) => Some(message),
            _ => None,
        }
    }

    fn from_result(result: ProviderResult<T>, message: &str) -> Self {
        match result {
            Ok(value) => Loadable::Ready(value),
            Err(err) => {
                warn!(error = %err, "Provider fetch failed");
                Loadable::Failed(message.to_string())
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Number step
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct NumberForm {
    pub countries: Loadable<Vec<Country>>,
    pub country: Option<String>,
    pub numbers: Loadable<Vec<String>>,
    /// Highlighted number, pre-filled from a stored selection
    pub selected_number: Option<String>,
    pub country_touched: bool,
}

impl NumberForm {
    pub fn new(prefill: Option<&Selection>) -> Self {
        Self {
            country: prefill.map(|s| s.country.clone()),
            selected_number: prefill.map(|s| s.number.clone()),
            ..Default::default()
        }
    }

    pub fn begin_countries(&mut self) {
        self.countries = Loadable::Loading;
    }

    pub fn countries_loaded(&mut self, result: ProviderResult<Vec<Country>>) {
        self.countries = Loadable::from_result(result, COUNTRIES_FAILED);
    }

    /// A chosen country whose numbers have not been requested yet
    pub fn needs_numbers(&self) -> bool {
        self.country.is_some() && self.numbers.is_idle()
    }

    /// Pick a country. Returns true when a number fetch must start.
    pub fn select_country(&mut self, code: &str) -> bool {
        self.country_touched = true;
        if self.country.as_deref() == Some(code) && !self.numbers.is_idle() {
            return false;
        }
        self.country = Some(code.to_string());
        self.begin_numbers();
        true
    }

    /// Mark the numbers as loading for the current country
    pub fn begin_numbers(&mut self) {
        self.numbers = Loadable::Loading;
    }

    /// Apply fetched numbers. Results for another country are dropped.
    pub fn numbers_loaded(&mut self, code: &str, result: ProviderResult<Vec<String>>) -> bool {
        if self.country.as_deref() != Some(code) {
            debug!(country = code, "Discarding numbers for a country no longer selected");
            return false;
        }
        self.numbers = Loadable::from_result(result, NUMBERS_FAILED);
        true
    }

    pub fn touch_country(&mut self) {
        self.country_touched = true;
    }

    pub fn country_error(&self) -> Option<&'static str> {
        if self.country_touched && self.country.is_none() {
            Some("Country is required.")
        } else {
            None
        }
    }

    pub fn available_numbers(&self) -> &[String] {
        self.numbers.ready().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Selection for the listed number at `index`
    pub fn choose_number(&self, index: usize) -> Option<Selection> {
        let number = self.available_numbers().get(index)?;
        self.choose(number)
    }

    /// Selection for a listed number; unlisted numbers are refused
    pub fn choose(&self, number: &str) -> Option<Selection> {
        let country = self.country.clone()?;
        if !self.available_numbers().iter().any(|n| n == number) {
            return None;
        }
        Some(Selection {
            country,
            number: number.to_string(),
        })
    }

    pub async fn load_countries(&mut self, provider: &dyn CatalogProvider) {
        self.begin_countries();
        let result = provider.fetch_countries().await;
        self.countries_loaded(result);
    }

    pub async fn load_numbers(&mut self, provider: &dyn CatalogProvider) {
        let Some(code) = self.country.clone() else {
            return;
        };
        self.begin_numbers();
        let result = provider.fetch_numbers_by_country(&code).await;
        self.numbers_loaded(&code, result);
    }
}

// ---------------------------------------------------------------------------
// Plan step
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct PlanForm {
    pub plans: Loadable<Vec<Plan>>,
    /// Highlighted plan, pre-filled from a stored plan
    pub selected_id: Option<String>,
}

impl PlanForm {
    pub fn new(prefill: Option<&Plan>) -> Self {
        Self {
            plans: Loadable::Idle,
            selected_id: prefill.map(|p| p.id.clone()),
        }
    }

    pub fn begin_load(&mut self) {
        self.plans = Loadable::Loading;
    }

    pub fn plans_loaded(&mut self, result: ProviderResult<Vec<Plan>>) {
        self.plans = Loadable::from_result(result, PLANS_FAILED);
    }

    pub fn available_plans(&self) -> &[Plan] {
        self.plans.ready().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Position of the highlighted plan, if it is listed
    pub fn selected_index(&self) -> Option<usize> {
        let id = self.selected_id.as_deref()?;
        self.available_plans().iter().position(|p| p.id == id)
    }

    pub fn choose(&self, index: usize) -> Option<Plan> {
        self.available_plans().get(index).cloned()
    }

    pub fn choose_id(&self, id: &str) -> Option<Plan> {
        self.available_plans().iter().find(|p| p.id == id).cloned()
    }

    pub async fn load(&mut self, provider: &dyn CatalogProvider) {
        self.begin_load();
        let result = provider.fetch_plans().await;
        self.plans_loaded(result);
    }
}

// ---------------------------------------------------------------------------
// Register step
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegisterField {
    Name,
    Email,
    Password,
    Confirm,
    Address,
    Consent,
}

impl RegisterField {
    pub const ALL: [RegisterField; 6] = [
        RegisterField::Name,
        RegisterField::Email,
        RegisterField::Password,
        RegisterField::Confirm,
        RegisterField::Address,
        RegisterField::Consent,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RegisterField::Name => "Full name",
            RegisterField::Email => "Email",
            RegisterField::Password => "Password",
            RegisterField::Confirm => "Confirm password",
            RegisterField::Address => "Address (optional)",
            RegisterField::Consent => "I agree to the Terms and Privacy Policy.",
        }
    }

    pub fn is_secret(&self) -> bool {
        matches!(self, RegisterField::Password | RegisterField::Confirm)
    }
}

#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm: String,
    pub address: String,
    pub consent: bool,
    touched: HashSet<RegisterField>,
    submit_attempted: bool,
    submitting: bool,
    error: Option<String>,
}

impl RegistrationForm {
    /// Name, email and address come back from a stored profile; passwords
    /// and consent have to be entered again.
    pub fn from_defaults(defaults: Option<&UserProfile>) -> Self {
        let mut form = Self::default();
        if let Some(profile) = defaults {
            form.name = profile.name.clone();
            form.email = profile.email.clone();
            form.address = profile.address.clone().unwrap_or_default();
        }
        form
    }

    pub fn value(&self, field: RegisterField) -> &str {
        match field {
            RegisterField::Name => &self.name,
            RegisterField::Email => &self.email,
            RegisterField::Password => &self.password,
            RegisterField::Confirm => &self.confirm,
            RegisterField::Address => &self.address,
            RegisterField::Consent => "",
        }
    }

    /// Set a text field. Ignored while a submission is in flight.
    pub fn set_value(&mut self, field: RegisterField, value: impl Into<String>) {
        if self.submitting {
            return;
        }
        let value = value.into();
        match field {
            RegisterField::Name => self.name = value,
            RegisterField::Email => self.email = value,
            RegisterField::Password => self.password = value,
            RegisterField::Confirm => self.confirm = value,
            RegisterField::Address => self.address = value,
            RegisterField::Consent => {}
        }
    }

    pub fn set_consent(&mut self, consent: bool) {
        if !self.submitting {
            self.consent = consent;
        }
    }

    pub fn toggle_consent(&mut self) {
        self.set_consent(!self.consent);
    }

    pub fn touch(&mut self, field: RegisterField) {
        self.touched.insert(field);
    }

    pub fn is_touched(&self, field: RegisterField) -> bool {
        self.touched.contains(&field)
    }

    /// Rule violated by the field, regardless of visibility
    pub fn field_error(&self, field: RegisterField) -> Option<&'static str> {
        match field {
            RegisterField::Name if self.name.is_empty() => Some("Full name is required."),
            RegisterField::Email if self.email.is_empty() => Some("Email is required."),
            RegisterField::Email if !validation::is_valid_email(&self.email) => {
                Some("Enter a valid email.")
            }
            RegisterField::Password if self.password.is_empty() => Some("Password is required."),
            RegisterField::Password if !validation::is_strong_password(&self.password) => {
                Some("Password must be at least 8 characters.")
            }
            RegisterField::Confirm if self.confirm.is_empty() => {
                Some("Please confirm your password.")
            }
            RegisterField::Confirm
                if !validation::passwords_match(&self.password, &self.confirm) =>
            {
                Some("Passwords do not match.")
            }
            RegisterField::Consent if !self.consent => Some("You must agree before continuing."),
            _ => None,
        }
    }

    /// Error shown inline: only after the field was touched or a submit was tried
    pub fn visible_error(&self, field: RegisterField) -> Option<&'static str> {
        if self.submit_attempted || self.is_touched(field) {
            self.field_error(field)
        } else {
            None
        }
    }

    pub fn is_valid(&self) -> bool {
        RegisterField::ALL
            .iter()
            .all(|field| self.field_error(*field).is_none())
    }

    pub fn can_submit(&self) -> bool {
        self.is_valid() && !self.submitting
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn submit_attempted(&self) -> bool {
        self.submit_attempted
    }

    /// Banner for a failed registration
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn submit_label(&self) -> &'static str {
        if self.submitting {
            "Creating account…"
        } else {
            "Continue"
        }
    }

    /// Start a submission. Returns the draft profile to register, or `None`
    /// when the form is invalid or already in flight.
    pub fn begin_submit(&mut self) -> Option<UserProfile> {
        if self.submitting {
            return None;
        }
        if !self.is_valid() {
            self.submit_attempted = true;
            return None;
        }
        self.submitting = true;
        self.error = None;
        Some(self.profile(String::new()))
    }

    /// Apply the outcome of the registration action
    pub fn finish_submit(&mut self, result: ProviderResult<Registration>) -> Option<UserProfile> {
        self.submitting = false;
        match result {
            Ok(registration) => Some(self.profile(registration.user_id)),
            Err(err) => {
                warn!(error = %err, "Registration failed");
                self.error = Some(REGISTRATION_FAILED.to_string());
                None
            }
        }
    }

    pub async fn submit(&mut self, provider: &dyn ActionProvider) -> Option<UserProfile> {
        let draft = self.begin_submit()?;
        let result = provider.register(&draft).await;
        self.finish_submit(result)
    }

    fn profile(&self, user_id: String) -> UserProfile {
        let address = self.address.trim();
        UserProfile {
            name: self.name.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
            confirm_password: self.confirm.clone(),
            address: (!address.is_empty()).then(|| address.to_string()),
            consent_given: self.consent,
            user_id,
        }
    }
}

// ---------------------------------------------------------------------------
// Payment step
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentField {
    Name,
    Number,
    Expiry,
    Cvc,
}

impl PaymentField {
    pub const ALL: [PaymentField; 4] = [
        PaymentField::Name,
        PaymentField::Number,
        PaymentField::Expiry,
        PaymentField::Cvc,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PaymentField::Name => "Name on card",
            PaymentField::Number => "Card number",
            PaymentField::Expiry => "Expiry (MM/YY)",
            PaymentField::Cvc => "CVC",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            PaymentField::Name => "",
            PaymentField::Number => "1234 5678 9012 3456",
            PaymentField::Expiry => "MM/YY",
            PaymentField::Cvc => "",
        }
    }
}

/// Card entry. Never pre-filled and never stored past a successful payment.
#[derive(Debug, Clone, Default)]
pub struct PaymentForm {
    amount: Money,
    pub name: String,
    pub number: String,
    pub expiry: String,
    pub cvc: String,
    touched: HashSet<PaymentField>,
    submit_attempted: bool,
    submitting: bool,
    error: Option<String>,
}

impl PaymentForm {
    pub fn new(amount: Money) -> Self {
        Self {
            amount,
            ..Default::default()
        }
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn value(&self, field: PaymentField) -> &str {
        match field {
            PaymentField::Name => &self.name,
            PaymentField::Number => &self.number,
            PaymentField::Expiry => &self.expiry,
            PaymentField::Cvc => &self.cvc,
        }
    }

    /// Set a field. Card number and CVC are normalized to digits on the way in.
    pub fn set_value(&mut self, field: PaymentField, value: &str) {
        if self.submitting {
            return;
        }
        match field {
            PaymentField::Name => self.name = value.to_string(),
            PaymentField::Number => self.number = validation::format_card_input(value),
            PaymentField::Expiry => self.expiry = value.to_string(),
            PaymentField::Cvc => self.cvc = validation::format_cvc_input(value),
        }
    }

    pub fn touch(&mut self, field: PaymentField) {
        self.touched.insert(field);
    }

    pub fn is_touched(&self, field: PaymentField) -> bool {
        self.touched.contains(&field)
    }

    pub fn field_error(&self, field: PaymentField) -> Option<&'static str> {
        match field {
            PaymentField::Name if self.name.trim().is_empty() => {
                Some("Name on card is required.")
            }
            PaymentField::Name if !validation::is_valid_cardholder(&self.name) => {
                Some("Name on card is too short.")
            }
            PaymentField::Number if validation::strip_whitespace(&self.number).is_empty() => {
                Some("Card number is required.")
            }
            PaymentField::Number if !validation::is_valid_card_number(&self.number) => {
                Some("Enter a valid 16-digit card number.")
            }
            PaymentField::Expiry if self.expiry.is_empty() => Some("Expiry is required."),
            PaymentField::Expiry if !validation::is_valid_expiry(&self.expiry) => {
                Some("Enter expiry as MM/YY.")
            }
            PaymentField::Cvc if self.cvc.is_empty() => Some("CVC is required."),
            PaymentField::Cvc if !validation::is_valid_cvc(&self.cvc) => {
                Some("Enter a valid 3 or 4 digit CVC.")
            }
            _ => None,
        }
    }

    pub fn visible_error(&self, field: PaymentField) -> Option<&'static str> {
        if self.submit_attempted || self.is_touched(field) {
            self.field_error(field)
        } else {
            None
        }
    }

    pub fn is_valid(&self) -> bool {
        PaymentField::ALL
            .iter()
            .all(|field| self.field_error(*field).is_none())
    }

    pub fn can_submit(&self) -> bool {
        self.is_valid() && !self.submitting
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Summary hint shown under the fields while anything is invalid
    pub fn hint(&self) -> Option<&'static str> {
        if self.is_valid() {
            None
        } else {
            Some("Enter a valid name, 16-digit card, expiry and CVC.")
        }
    }

    /// `Pay •••• 1111`, or `Processing…` while in flight
    pub fn pay_label(&self) -> String {
        if self.submitting {
            "Processing…".to_string()
        } else {
            format!("Pay {}", validation::mask_card(&self.number))
        }
    }

    /// Start a payment. Returns the amount to charge, or `None` when the
    /// form is invalid or already in flight.
    pub fn begin_submit(&mut self) -> Option<Money> {
        if self.submitting {
            return None;
        }
        if !self.is_valid() {
            self.submit_attempted = true;
            return None;
        }
        self.submitting = true;
        self.error = None;
        Some(self.amount)
    }

    /// Apply the outcome of the payment action. Card fields are wiped on success.
    pub fn finish_submit(&mut self, result: ProviderResult<Receipt>) -> Option<PaymentResult> {
        self.submitting = false;
        let result = result.and_then(|receipt| {
            if receipt.amount == self.amount {
                Ok(receipt)
            } else {
                Err(ProviderError::Rejected {
                    operation: "payment",
                    reason: format!("charged {} instead of {}", receipt.amount, self.amount),
                })
            }
        });

        match result {
            Ok(receipt) => {
                let payment = PaymentResult {
                    transaction_id: receipt.transaction_id,
                    amount: receipt.amount,
                    last4: validation::last4(&self.number),
                };
                self.clear_card();
                Some(payment)
            }
            Err(err) => {
                warn!(error = %err, "Payment failed");
                self.error = Some(PAYMENT_FAILED.to_string());
                None
            }
        }
    }

    pub async fn submit(&mut self, provider: &dyn ActionProvider) -> Option<PaymentResult> {
        let amount = self.begin_submit()?;
        let result = provider.pay(amount).await;
        self.finish_submit(result)
    }

    fn clear_card(&mut self) {
        self.name.clear();
        self.number.clear();
        self.expiry.clear();
        self.cvc.clear();
        self.touched.clear();
    }
}
