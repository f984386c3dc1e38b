use super::*;
use crate::test_support::login_response;

#[test]
fn empty_store_has_no_tokens() {
    let store = TokenStore::new(MemoryStorage::new());
    assert_eq!(store.access(), None);
    assert_eq!(store.refresh(), None);
    assert_eq!(store.login_payload(), None);
}

#[test]
fn store_login_writes_all_three_keys() {
    let storage = MemoryStorage::new();
    let store = TokenStore::new(storage.clone());
    let login = login_response("acc-1", "ref-1", true);

    store.store_login(&login);

    assert_eq!(storage.len(), 3);
    assert_eq!(store.access().as_deref(), Some("acc-1"));
    assert_eq!(store.refresh().as_deref(), Some("ref-1"));
    assert_eq!(store.login_payload(), Some(login));
}

#[test]
fn store_login_keeps_body_as_received() {
    let body = r#"{"access":"acc-1","refresh":"ref-1","user_id":5,"is_admin":false,"is_staff":true,"message":"Login successful"}"#;
    let storage = MemoryStorage::new();
    let store = TokenStore::new(storage.clone());

    store.store_login(&LoginResponse::from_body(body).unwrap());

    assert_eq!(storage.get_item(TOKENS_KEY).as_deref(), Some(body));
    assert_eq!(store.access().as_deref(), Some("acc-1"));
    let payload = store.login_payload().unwrap();
    assert_eq!(payload.user_id, "5");
    assert!(!payload.is_admin);
}

#[test]
fn store_pair_overwrites_tokens_but_keeps_login_payload() {
    let store = TokenStore::new(MemoryStorage::new());
    store.store_login(&login_response("acc-1", "ref-1", true));

    store.store_pair(&TokenPair { access: "acc-2".into(), refresh: "ref-2".into() });

    assert_eq!(store.access().as_deref(), Some("acc-2"));
    assert_eq!(store.refresh().as_deref(), Some("ref-2"));
    assert_eq!(store.login_payload().map(|l| l.access), Some("acc-1".to_owned()));
}

#[test]
fn clear_removes_everything() {
    let storage = MemoryStorage::new();
    let store = TokenStore::new(storage.clone());
    store.store_login(&login_response("a", "r", false));
    storage.set_item("unrelated", "x");

    store.clear();

    assert!(storage.is_empty());
}

#[test]
fn empty_token_values_read_as_absent() {
    let storage = MemoryStorage::new();
    storage.set_item(ACCESS_KEY, "");
    storage.set_item(REFRESH_KEY, "");
    let store = TokenStore::new(storage);
    assert_eq!(store.access(), None);
    assert_eq!(store.refresh(), None);
}

#[test]
fn malformed_login_payload_reads_as_absent() {
    let storage = MemoryStorage::new();
    storage.set_item(TOKENS_KEY, "{not json");
    let store = TokenStore::new(storage);
    assert_eq!(store.login_payload(), None);
}

#[test]
fn memory_storage_clones_share_state() {
    let a = MemoryStorage::new();
    let b = a.clone();
    a.set_item("k", "v");
    assert_eq!(b.get_item("k").as_deref(), Some("v"));
    b.remove_item("k");
    assert_eq!(a.get_item("k"), None);
}
