//! BDD step definitions for the check dispatch feature

use cucumber::{given, then, when};

use statusboard::notifier::NoticeLevel;

use crate::world::StatusboardWorld;

#[given("a backend with no endpoints")]
fn backend_without_endpoints(_world: &mut StatusboardWorld) {}

#[given(expr = "a backend with {int} {string} endpoints")]
fn backend_with_endpoints(world: &mut StatusboardWorld, count: usize, status: String) {
    world.backend.add_endpoints(count, &status);
}

#[given(expr = "the check route fails with status {int}")]
fn check_route_fails(world: &mut StatusboardWorld, status: u16) {
    world.backend.set_check_status(status);
}

#[given("the backend is unreachable")]
fn backend_unreachable(world: &mut StatusboardWorld) {
    world.backend.set_reachable(false);
}

#[when("all endpoints are checked")]
async fn check_all(world: &mut StatusboardWorld) {
    let results = world.statusboard().check().await;
    world.check_results = Some(results);
}

#[then("no check request is sent")]
fn no_check_request(world: &mut StatusboardWorld) {
    assert!(world.backend.check_requests().is_empty());
}

#[then(expr = "exactly {int} check request(s) is/are sent containing {int} ids")]
fn check_requests_sent(world: &mut StatusboardWorld, requests: usize, ids: usize) {
    let sent = world.backend.check_requests();
    assert_eq!(sent.len(), requests);
    for body in sent {
        let sent_ids = body["endpoint_ids"].as_array().expect("endpoint_ids array");
        assert_eq!(sent_ids.len(), ids);
    }
}

#[then(expr = "{int} check results are returned")]
fn check_results_returned(world: &mut StatusboardWorld, count: usize) {
    let results = world.check_results.as_ref().expect("no check was run");
    assert_eq!(results.len(), count);
}

#[then(expr = "an info notice {string} is raised")]
async fn info_notice_raised(world: &mut StatusboardWorld, message: String) {
    let messages = world.notice_messages(NoticeLevel::Info).await;
    assert!(
        messages.contains(&message),
        "expected info notice {:?}, got {:?}",
        message,
        messages
    );
}

#[then(expr = "an error notice {string} is raised")]
async fn error_notice_raised(world: &mut StatusboardWorld, message: String) {
    let messages = world.notice_messages(NoticeLevel::Error).await;
    assert!(
        messages.contains(&message),
        "expected error notice {:?}, got {:?}",
        message,
        messages
    );
}

#[then("nothing is rendered")]
fn nothing_rendered(world: &mut StatusboardWorld) {
    assert_eq!(world.target.render_count(), 0);
}
