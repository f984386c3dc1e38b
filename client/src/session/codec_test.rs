use super::*;
use crate::test_support::{make_token, user_claims};

#[test]
fn decodes_full_claim_set() {
    let token = make_token(&serde_json::json!({
        "user_id": 12,
        "email": "ann@example.com",
        "first_name": "Ann",
        "last_name": "Lee",
        "is_admin": true,
        "is_active": true,
        "is_staff": false,
        "date_joined": "2024-01-02T03:04:05Z",
        "exp": 1_700_000_000
    }));
    let claims = decode_claims(&token).unwrap();
    assert_eq!(claims.user_id, "12");
    assert_eq!(claims.email.as_deref(), Some("ann@example.com"));
    assert!(claims.is_admin);
    assert!(claims.is_active);
    assert!(!claims.is_staff);
    assert_eq!(claims.exp, Some(1_700_000_000.0));
}

#[test]
fn missing_role_flags_default_to_false() {
    let token = make_token(&serde_json::json!({ "user_id": "u-1", "exp": 10 }));
    let claims = decode_claims(&token).unwrap();
    assert!(!claims.is_admin);
    assert!(!claims.is_active);
    assert_eq!(claims.first_name, None);
}

#[test]
fn padded_payload_is_accepted() {
    let token = make_token(&user_claims(100.0, false));
    let mut parts: Vec<String> = token.split('.').map(str::to_owned).collect();
    parts[1].push_str("==");
    let padded = parts.join(".");
    assert!(decode_claims(&padded).is_ok());
}

#[test]
fn signature_is_not_verified() {
    let token = make_token(&user_claims(100.0, true));
    let tampered = format!("{}.not-a-real-signature", token.rsplit_once('.').unwrap().0);
    assert!(decode_claims(&tampered).unwrap().is_admin);
}

#[test]
fn token_without_payload_segment_errors() {
    assert_eq!(decode_claims("justonepart"), Err(DecodeError::MissingPayload));
    assert_eq!(decode_claims("header."), Err(DecodeError::MissingPayload));
    assert_eq!(decode_claims(""), Err(DecodeError::MissingPayload));
}

#[test]
fn non_base64_payload_errors() {
    assert!(matches!(decode_claims("h.!!!.s"), Err(DecodeError::Base64(_))));
}

#[test]
fn non_json_payload_errors() {
    let payload = URL_SAFE_NO_PAD.encode(b"hello");
    assert!(matches!(decode_claims(&format!("h.{payload}.s")), Err(DecodeError::Json(_))));
}

#[test]
fn expiry_comparison() {
    let claims = decode_claims(&make_token(&user_claims(100.0, false))).unwrap();
    assert!(!claims.is_expired(99.5));
    assert!(claims.is_expired(100.0));
    assert!(claims.is_expired(101.0));
}

#[test]
fn missing_exp_counts_as_expired() {
    let claims = decode_claims(&make_token(&serde_json::json!({ "user_id": 1 }))).unwrap();
    assert!(claims.is_expired(0.0));
}
