use cooee::validation::*;

#[test]
fn test_email_rules() {
    assert!(is_valid_email("a@b.co"));
    assert!(is_valid_email("jane.doe+signup@example.com"));
    assert!(!is_valid_email("a@b"));
    assert!(!is_valid_email("a b@c.co"));
    assert!(!is_valid_email(""));
}

#[test]
fn test_password_rules() {
    assert!(!is_strong_password("short"));
    assert!(is_strong_password("longenough"));
    assert!(is_strong_password("12345678"));
    assert!(!is_strong_password("1234567"));

    assert!(passwords_match("longenough", "longenough"));
    assert!(!passwords_match("longenough", "Longenough"));
    assert!(!passwords_match("longenough", "longenough "));
}

#[test]
fn test_card_rules() {
    assert!(is_valid_card_number("4111111111111111"));
    assert!(is_valid_card_number("4111 1111 1111 1111"));
    assert!(!is_valid_card_number("123"));
    assert!(!is_valid_card_number("41111111111111112"));

    assert!(is_valid_expiry("12/29"));
    assert!(is_valid_expiry("01/00"));
    assert!(!is_valid_expiry("13/29"));
    assert!(!is_valid_expiry("00/29"));
    assert!(!is_valid_expiry("1/29"));

    assert!(is_valid_cvc("123"));
    assert!(is_valid_cvc("1234"));
    assert!(!is_valid_cvc("12"));
    assert!(!is_valid_cvc("12345"));

    assert!(is_valid_cardholder("Jane Doe"));
    assert!(is_valid_cardholder("Jo"));
    assert!(!is_valid_cardholder(" J "));
}

#[test]
fn test_card_input_formatting() {
    assert_eq!(format_card_input("4111111111111111"), "4111 1111 1111 1111");
    assert_eq!(format_card_input("41-11 11ab"), "4111 11");
    assert_eq!(format_card_input("41111111111111119999"), "4111 1111 1111 1111");
    assert_eq!(format_cvc_input("1a2b3c4d5"), "1234");
}

#[test]
fn test_masking() {
    assert_eq!(last4("4111 1111 1111 1234"), "1234");
    assert_eq!(mask_card("4111 1111 1111 1234"), "•••• 1234");
}
