use super::*;
use crate::net::api::PortalApi;
use crate::test_support::{MockBackend, catalog_app};

#[test]
fn screenshot_at_limit_is_accepted() {
    assert_eq!(validate_screenshot(MAX_SCREENSHOT_BYTES), Ok(()));
    assert_eq!(validate_screenshot(0), Ok(()));
}

#[test]
fn screenshot_over_limit_is_rejected() {
    assert_eq!(
        validate_screenshot(MAX_SCREENSHOT_BYTES + 1),
        Err("Screenshot size should be less than 5MB")
    );
}

#[test]
fn claim_requires_app_and_screenshot() {
    let msg = "Please select a task and upload a screenshot";
    assert_eq!(validate_claim(None, Some(Upload::named("a.png", 1))).unwrap_err(), msg);
    assert_eq!(validate_claim(Some(3), None).unwrap_err(), msg);
    let (id, upload) = validate_claim(Some(3), Some(Upload::named("a.png", 1))).unwrap();
    assert_eq!(id, 3);
    assert_eq!(upload.name, "a.png");
}

#[tokio::test]
async fn successful_claim_hides_app_locally() {
    let backend = MockBackend::with_catalog(vec![catalog_app(1, "Notes"), catalog_app(2, "Chess")]);
    let mut state = CatalogState::default();
    state.apply(backend.available_apps().await, FETCH_FAILED);

    let (id, upload) = validate_claim(Some(2), Some(Upload::named("proof.jpg", 1024))).unwrap();
    backend.submit_task(id, &upload).await.unwrap();
    state.remove(id);

    assert_eq!(*backend.submissions.borrow(), vec![(2, "proof.jpg".to_owned())]);
    assert_eq!(state.apps.len(), 1);
    assert!(state.find(2).is_none());
}
