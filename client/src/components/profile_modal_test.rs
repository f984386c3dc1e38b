use super::*;
use crate::net::api::PortalApi;
use crate::net::types::TaskApp;
use crate::test_support::MockBackend;

fn accepted(id: i64, points: i64) -> AcceptedApp {
    AcceptedApp { id, app: TaskApp { name: format!("App {id}"), app_icon: None }, points_earned: points }
}

#[test]
fn total_points_of_empty_history_is_zero() {
    assert_eq!(total_points(&[]), 0);
}

#[test]
fn total_points_sums_points_earned() {
    assert_eq!(total_points(&[accepted(1, 10), accepted(2, 25), accepted(3, 5)]), 40);
}

#[tokio::test]
async fn total_points_over_fetched_history() {
    let backend = MockBackend::new();
    backend.accepted.borrow_mut().extend([accepted(1, 15), accepted(2, 30)]);

    let apps = backend.accepted_apps().await.unwrap();

    assert_eq!(total_points(&apps), 45);
}
