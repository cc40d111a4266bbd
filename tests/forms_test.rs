//! Step forms: inline errors, submission gating and provider failures

use cooee::providers::{ProviderError, Receipt, Registration};
use cooee::wizard::forms::*;
use cooee::wizard::{Country, Money, Selection, UserProfile};
use pretty_assertions::assert_eq;

fn filled_registration() -> RegistrationForm {
    let mut form = RegistrationForm::from_defaults(None);
    form.set_value(RegisterField::Name, "Jane Doe");
    form.set_value(RegisterField::Email, "jane@example.com");
    form.set_value(RegisterField::Password, "longenough");
    form.set_value(RegisterField::Confirm, "longenough");
    form.set_consent(true);
    form
}

fn filled_payment() -> PaymentForm {
    let mut form = PaymentForm::new(Money::from_units(12));
    form.set_value(PaymentField::Name, "Jane Doe");
    form.set_value(PaymentField::Number, "4111111111111111");
    form.set_value(PaymentField::Expiry, "12/29");
    form.set_value(PaymentField::Cvc, "123");
    form
}

fn unavailable(operation: &'static str) -> ProviderError {
    ProviderError::Unavailable { operation }
}

#[test]
fn test_number_form_requires_country_after_blur() {
    let mut form = NumberForm::new(None);
    assert_eq!(form.country_error(), None);
    form.touch_country();
    assert_eq!(form.country_error(), Some("Country is required."));

    form.countries_loaded(Ok(vec![Country::new("US", "USA")]));
    form.select_country("US");
    assert_eq!(form.country_error(), None);
}

#[test]
fn test_number_form_only_offers_listed_numbers() {
    let mut form = NumberForm::new(None);
    form.select_country("US");
    assert!(form.numbers_loaded("US", Ok(vec!["+1 (212) 555-0100".into()])));

    assert_eq!(
        form.choose_number(0),
        Some(Selection {
            country: "US".into(),
            number: "+1 (212) 555-0100".into()
        })
    );
    assert_eq!(form.choose_number(1), None);
    assert_eq!(form.choose("+1 (999) 000-0000"), None);
}

#[test]
fn test_number_form_reselecting_same_country_keeps_numbers() {
    let mut form = NumberForm::new(None);
    assert!(form.select_country("AU"));
    form.numbers_loaded("AU", Ok(vec!["+61 4 1234 5678".into()]));
    assert!(!form.select_country("AU"));
    assert_eq!(form.available_numbers().len(), 1);
}

#[test]
fn test_number_fetch_failure_is_recoverable() {
    let mut form = NumberForm::new(None);
    form.select_country("IN");
    form.numbers_loaded("IN", Err(unavailable("fetch numbers")));
    assert_eq!(form.numbers.error(), Some(NUMBERS_FAILED));
    assert!(form.available_numbers().is_empty());
}

#[test]
fn test_registration_errors_hidden_until_touched() {
    let mut form = RegistrationForm::from_defaults(None);
    form.set_value(RegisterField::Email, "a@b");
    assert_eq!(form.visible_error(RegisterField::Email), None);
    assert_eq!(form.field_error(RegisterField::Email), Some("Enter a valid email."));

    form.touch(RegisterField::Email);
    assert_eq!(
        form.visible_error(RegisterField::Email),
        Some("Enter a valid email.")
    );
}

#[test]
fn test_registration_messages() {
    let mut form = filled_registration();
    form.set_value(RegisterField::Password, "short");
    assert_eq!(
        form.field_error(RegisterField::Password),
        Some("Password must be at least 8 characters.")
    );
    form.set_value(RegisterField::Password, "longenough");
    form.set_value(RegisterField::Confirm, "longenougH");
    assert_eq!(
        form.field_error(RegisterField::Confirm),
        Some("Passwords do not match.")
    );
    form.set_value(RegisterField::Confirm, "longenough");
    form.set_consent(false);
    assert_eq!(
        form.field_error(RegisterField::Consent),
        Some("You must agree before continuing.")
    );
    assert!(!form.can_submit());
}

#[test]
fn test_invalid_submit_reveals_errors() {
    let mut form = RegistrationForm::from_defaults(None);
    assert_eq!(form.begin_submit(), None);
    assert!(form.submit_attempted());
    assert_eq!(
        form.visible_error(RegisterField::Name),
        Some("Full name is required.")
    );
    assert!(!form.is_submitting());
}

#[test]
fn test_registration_success_fills_user_id() {
    let mut form = filled_registration();
    let draft = form.begin_submit().expect("valid form");
    assert!(draft.user_id.is_empty());
    assert!(form.is_submitting());
    assert_eq!(form.submit_label(), "Creating account…");

    // Edits are ignored while in flight
    form.set_value(RegisterField::Name, "Someone Else");
    assert_eq!(form.name, "Jane Doe");
    assert_eq!(form.begin_submit(), None);

    let profile: UserProfile = form
        .finish_submit(Ok(Registration {
            user_id: "usr_42".into(),
        }))
        .expect("profile");
    assert_eq!(profile.user_id, "usr_42");
    assert_eq!(profile.address, None);
    assert!(profile.consent_given);
}

#[test]
fn test_registration_failure_shows_banner_and_allows_retry() {
    let mut form = filled_registration();
    form.begin_submit().unwrap();
    assert_eq!(form.finish_submit(Err(unavailable("registration"))), None);
    assert_eq!(form.error(), Some(REGISTRATION_FAILED));
    assert!(!form.is_submitting());
    assert_eq!(form.name, "Jane Doe");

    assert!(form.begin_submit().is_some());
    assert_eq!(form.error(), None);
}

#[test]
fn test_payment_messages() {
    let mut form = filled_payment();
    form.set_value(PaymentField::Number, "123");
    assert_eq!(
        form.field_error(PaymentField::Number),
        Some("Enter a valid 16-digit card number.")
    );
    form.set_value(PaymentField::Expiry, "13/29");
    assert_eq!(
        form.field_error(PaymentField::Expiry),
        Some("Enter expiry as MM/YY.")
    );
    form.set_value(PaymentField::Name, "J");
    assert_eq!(
        form.field_error(PaymentField::Name),
        Some("Name on card is too short.")
    );
    assert_eq!(
        form.hint(),
        Some("Enter a valid name, 16-digit card, expiry and CVC.")
    );
}

#[test]
fn test_payment_success_masks_and_clears_card() {
    let mut form = filled_payment();
    assert_eq!(form.pay_label(), "Pay •••• 1111");
    assert_eq!(form.begin_submit(), Some(Money::from_units(12)));
    assert_eq!(form.pay_label(), "Processing…");

    let payment = form
        .finish_submit(Ok(Receipt {
            transaction_id: "txn_9".into(),
            amount: Money::from_units(12),
        }))
        .expect("payment");
    assert_eq!(payment.last4, "1111");
    assert_eq!(payment.amount, Money::from_units(12));
    assert_eq!(payment.transaction_id, "txn_9");
    assert!(form.number.is_empty());
    assert!(form.cvc.is_empty());
}

#[test]
fn test_payment_failure_keeps_card_for_retry() {
    let mut form = filled_payment();
    form.begin_submit().unwrap();
    assert_eq!(form.finish_submit(Err(unavailable("payment"))), None);
    assert_eq!(form.error(), Some(PAYMENT_FAILED));
    assert_eq!(form.number, "4111 1111 1111 1111");
    assert!(form.can_submit());
}

#[test]
fn test_payment_with_wrong_amount_fails() {
    let mut form = filled_payment();
    form.begin_submit().unwrap();
    let result = form.finish_submit(Ok(Receipt {
        transaction_id: "txn_9".into(),
        amount: Money::from_units(5),
    }));
    assert_eq!(result, None);
    assert_eq!(form.error(), Some(PAYMENT_FAILED));
}
