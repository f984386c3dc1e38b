use super::*;

#[test]
fn validate_login_input_trims_email() {
    assert_eq!(
        validate_login_input("  ann@example.com ", "secret123"),
        Ok(Credentials { email: "ann@example.com".to_owned(), password: "secret123".to_owned() })
    );
}

#[test]
fn validate_login_input_keeps_password_verbatim() {
    let creds = validate_login_input("a@b.com", " pad ").unwrap();
    assert_eq!(creds.password, " pad ");
}

#[test]
fn validate_login_input_requires_both_fields() {
    assert_eq!(validate_login_input("   ", "pw"), Err("Enter both email and password."));
    assert_eq!(validate_login_input("a@b.com", ""), Err("Enter both email and password."));
}
