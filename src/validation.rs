//! Field validation predicates shared by the registration and payment forms

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:[a-zA-Z0-9_'^&/+-])+(?:\.(?:[a-zA-Z0-9_'^&/+-])+)*@(?:(?:[a-zA-Z0-9-]+\.)+[a-zA-Z]{2,})$",
    )
    .expect("email pattern is valid")
});

static CARD_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{16}$").expect("card pattern is valid"));

static EXPIRY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(0[1-9]|1[0-2])/([0-9]{2})$").expect("expiry pattern is valid"));

static CVC: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{3,4}$").expect("cvc pattern is valid"));

pub const MIN_PASSWORD_LEN: usize = 8;
pub const CARD_DIGITS: usize = 16;
pub const MAX_CVC_DIGITS: usize = 4;

pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

pub fn is_strong_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LEN
}

pub fn passwords_match(password: &str, confirm: &str) -> bool {
    password == confirm
}

/// Card number with all whitespace removed
pub fn strip_whitespace(input: &str) -> String {
    input.chars().filter(|c| !c.is_whitespace()).collect()
}

pub fn is_valid_card_number(number: &str) -> bool {
    CARD_NUMBER.is_match(&strip_whitespace(number))
}

pub fn is_valid_expiry(expiry: &str) -> bool {
    EXPIRY.is_match(expiry)
}

pub fn is_valid_cvc(cvc: &str) -> bool {
    CVC.is_match(cvc)
}

pub fn is_valid_cardholder(name: &str) -> bool {
    name.trim().chars().count() > 1
}

/// Keep digits only and group them by four, capped at 16 digits
pub fn format_card_input(input: &str) -> String {
    let digits: Vec<char> = input
        .chars()
        .filter(|c| c.is_ascii_digit())
        .take(CARD_DIGITS)
        .collect();
    digits
        .chunks(4)
        .map(|chunk| chunk.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Keep digits only, capped at four
pub fn format_cvc_input(input: &str) -> String {
    input
        .chars()
        .filter(|c| c.is_ascii_digit())
        .take(MAX_CVC_DIGITS)
        .collect()
}

/// Last four characters of the card digits, left-padded with bullets
pub fn last4(number: &str) -> String {
    let digits = strip_whitespace(number);
    let tail: String = digits
        .chars()
        .rev()
        .take(4)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    format!("{:•>4}", tail)
}

/// `•••• 1111`
pub fn mask_card(number: &str) -> String {
    format!("•••• {}", last4(number))
}
