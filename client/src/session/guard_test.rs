use super::*;
use crate::session::store::{ACCESS_KEY, MemoryStorage, REFRESH_KEY, Storage, TOKENS_KEY};
use crate::test_support::{
    MockBackend, NOW, login_response, make_token, network_error, rejected, test_session, user_claims,
};

fn seeded(access: &str, refresh: Option<&str>) -> MemoryStorage {
    let storage = MemoryStorage::new();
    storage.set_item(ACCESS_KEY, access);
    if let Some(refresh) = refresh {
        storage.set_item(REFRESH_KEY, refresh);
    }
    storage
}

// =============================================================
// check_session: no token / valid token
// =============================================================

#[tokio::test]
async fn no_access_token_is_unauthenticated_without_network() {
    let session = test_session(MemoryStorage::new(), MockBackend::new());
    assert_eq!(session.check_session().await, Ok(AuthStatus::Unauthenticated));
    assert_eq!(session.api().calls.get(), 0);
}

#[tokio::test]
async fn unexpired_token_authenticates_without_refresh() {
    let access = make_token(&user_claims(NOW + 300.0, false));
    let session = test_session(seeded(&access, Some("ref")), MockBackend::new());

    let status = session.check_session().await.unwrap();

    let user = status.session().expect("authenticated");
    assert!(user.is_authenticated);
    assert_eq!(user.user_id, "5");
    assert_eq!(user.first_name.as_deref(), Some("Ann"));
    assert!(user.is_active);
    assert_eq!(session.api().calls.get(), 0);
}

#[tokio::test]
async fn undecodable_access_token_surfaces_decode_error() {
    let session = test_session(seeded("garbage", Some("ref")), MockBackend::new());
    assert!(matches!(session.check_session().await, Err(SessionError::Decode(_))));
    assert_eq!(session.api().calls.get(), 0);
}

#[tokio::test]
async fn get_session_downgrades_decode_error() {
    let session = test_session(seeded("garbage", None), MockBackend::new());
    assert_eq!(session.get_session().await, AuthStatus::Unauthenticated);
}

// =============================================================
// check_session: expiry and refresh
// =============================================================

#[tokio::test]
async fn expired_token_refreshes_once_and_replaces_pair() {
    let old_access = make_token(&user_claims(NOW - 1.0, false));
    let new_access = make_token(&user_claims(NOW + 600.0, true));
    let backend = MockBackend::with_refresh(Ok(TokenPair { access: new_access.clone(), refresh: "ref-2".into() }));
    let storage = seeded(&old_access, Some("ref-1"));
    let session = test_session(storage.clone(), backend);

    let status = session.check_session().await.unwrap();

    assert!(status.is_authenticated());
    assert!(status.session().unwrap().is_admin);
    assert_eq!(*session.api().refresh_calls.borrow(), vec!["ref-1".to_owned()]);
    assert_eq!(storage.get_item(ACCESS_KEY), Some(new_access));
    assert_eq!(storage.get_item(REFRESH_KEY).as_deref(), Some("ref-2"));
}

#[tokio::test]
async fn expiry_equal_to_now_counts_as_expired() {
    let access = make_token(&user_claims(NOW, false));
    let session = test_session(seeded(&access, Some("ref")), MockBackend::with_refresh(Err(network_error())));
    assert_eq!(session.check_session().await, Ok(AuthStatus::Unauthenticated));
    assert_eq!(session.api().refresh_calls.borrow().len(), 1);
}

#[tokio::test]
async fn expired_without_refresh_token_is_unauthenticated_and_keeps_storage() {
    let access = make_token(&user_claims(NOW - 10.0, false));
    let storage = seeded(&access, None);
    let session = test_session(storage.clone(), MockBackend::new());

    assert_eq!(session.check_session().await, Ok(AuthStatus::Unauthenticated));
    assert_eq!(session.api().calls.get(), 0);
    assert!(storage.get_item(ACCESS_KEY).is_some());
}

#[tokio::test]
async fn refresh_network_failure_clears_storage() {
    let access = make_token(&user_claims(NOW - 10.0, false));
    let storage = seeded(&access, Some("ref"));
    storage.set_item(TOKENS_KEY, "{}");
    let session = test_session(storage.clone(), MockBackend::with_refresh(Err(network_error())));

    assert_eq!(session.check_session().await, Ok(AuthStatus::Unauthenticated));
    assert!(storage.is_empty());
}

#[tokio::test]
async fn refresh_rejection_clears_storage() {
    let access = make_token(&user_claims(NOW - 10.0, false));
    let storage = seeded(&access, Some("ref"));
    let backend = MockBackend::with_refresh(Err(rejected(401, r#"{"detail": "Token is blacklisted"}"#)));
    let session = test_session(storage.clone(), backend);

    assert_eq!(session.check_session().await, Ok(AuthStatus::Unauthenticated));
    assert!(storage.is_empty());
    assert_eq!(session.api().refresh_calls.borrow().len(), 1);
}

#[tokio::test]
async fn refreshed_token_that_cannot_be_decoded_clears_storage() {
    let access = make_token(&user_claims(NOW - 10.0, false));
    let storage = seeded(&access, Some("ref"));
    let backend = MockBackend::with_refresh(Ok(TokenPair { access: "broken".into(), refresh: "ref-2".into() }));
    let session = test_session(storage.clone(), backend);

    assert_eq!(session.check_session().await, Ok(AuthStatus::Unauthenticated));
    assert!(storage.is_empty());
}

#[tokio::test]
async fn token_without_exp_goes_through_refresh() {
    let access = make_token(&serde_json::json!({ "user_id": 1 }));
    let session = test_session(seeded(&access, Some("ref")), MockBackend::with_refresh(Err(network_error())));
    assert_eq!(session.check_session().await, Ok(AuthStatus::Unauthenticated));
    assert_eq!(session.api().refresh_calls.borrow().len(), 1);
}

#[tokio::test]
async fn each_check_is_independent() {
    let access = make_token(&user_claims(NOW + 60.0, false));
    let storage = seeded(&access, Some("ref"));
    let session = test_session(storage.clone(), MockBackend::new());

    assert!(session.check_session().await.unwrap().is_authenticated());
    storage.clear();
    assert_eq!(session.check_session().await, Ok(AuthStatus::Unauthenticated));
}

// =============================================================
// login / logout / stored metadata
// =============================================================

#[tokio::test]
async fn login_persists_payload_and_tokens() {
    let access = make_token(&user_claims(NOW + 300.0, false));
    let login = login_response(&access, "ref", false);
    let storage = MemoryStorage::new();
    let session = test_session(storage.clone(), MockBackend::with_login(Ok(login.clone())));

    let result = session
        .login(&Credentials { email: "ann@example.com".into(), password: "secret123".into() })
        .await
        .unwrap();

    assert_eq!(result, login);
    assert_eq!(storage.get_item(ACCESS_KEY), Some(access));
    assert_eq!(storage.get_item(REFRESH_KEY).as_deref(), Some("ref"));
    assert_eq!(session.store().login_payload(), Some(login));
    assert!(!session.stored_is_admin());
}

#[tokio::test]
async fn failed_login_leaves_storage_untouched() {
    let storage = MemoryStorage::new();
    let session = test_session(storage.clone(), MockBackend::new());

    let err = session
        .login(&Credentials { email: "ann@example.com".into(), password: "wrong".into() })
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Rejected { status: 401, .. }));
    assert!(storage.is_empty());
}

#[tokio::test]
async fn logout_clears_storage() {
    let storage = MemoryStorage::new();
    let session = test_session(storage.clone(), MockBackend::new());
    session.store().store_login(&login_response("a", "r", true));

    session.logout();

    assert!(storage.is_empty());
    assert!(!session.stored_is_admin());
}

#[test]
fn stored_is_admin_reads_login_payload_not_claims() {
    let storage = MemoryStorage::new();
    let session = test_session(storage.clone(), MockBackend::new());
    let non_admin_token = make_token(&user_claims(NOW + 60.0, false));
    session.store().store_login(&login_response(&non_admin_token, "r", true));
    assert!(session.stored_is_admin());
}

#[test]
fn system_clock_is_after_2020() {
    assert!(SystemClock.now_secs() > 1_577_836_800.0);
}
