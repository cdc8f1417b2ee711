//! BDD step definitions for the auto-refresh feature

use std::sync::Arc;
use std::time::Duration;

use cucumber::{given, then, when};

use statusboard::refresh::{AutoRefresh, RefreshTarget, Visibility, DEFAULT_INTERVAL};

use crate::world::StatusboardWorld;

#[given(expr = "auto-refresh every {int} second(s)")]
fn auto_refresh_every(world: &mut StatusboardWorld, seconds: u64) {
    let target: Arc<dyn RefreshTarget> = world.statusboard().dashboard().clone();
    let mut auto = AutoRefresh::new(target);
    auto.start(Duration::from_secs(seconds));
    world.auto_refresh = Some(auto);
}

#[when(expr = "{int} milliseconds pass")]
async fn time_passes(_world: &mut StatusboardWorld, ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

#[when("the dashboard is hidden")]
fn dashboard_hidden(world: &mut StatusboardWorld) {
    world
        .auto_refresh
        .as_mut()
        .expect("auto-refresh not set up")
        .set_visibility(Visibility::Hidden);
}

#[when("the dashboard becomes visible")]
fn dashboard_visible(world: &mut StatusboardWorld) {
    world
        .auto_refresh
        .as_mut()
        .expect("auto-refresh not set up")
        .set_visibility(Visibility::Visible);
}

#[when("auto-refresh is stopped twice")]
fn stopped_twice(world: &mut StatusboardWorld) {
    let auto = world.auto_refresh.as_mut().expect("auto-refresh not set up");
    auto.stop();
    auto.stop();
}

#[then(expr = "at least {int} check requests are sent")]
fn at_least_checks(world: &mut StatusboardWorld, count: usize) {
    let sent = world.backend.check_requests().len();
    assert!(sent >= count, "expected at least {count} checks, got {sent}");
}

#[then("auto-refresh is not running")]
fn not_running(world: &mut StatusboardWorld) {
    let auto = world.auto_refresh.as_ref().expect("auto-refresh not set up");
    assert!(!auto.is_running());
}

#[then("auto-refresh runs at the default interval")]
fn runs_at_default(world: &mut StatusboardWorld) {
    let auto = world.auto_refresh.as_ref().expect("auto-refresh not set up");
    assert_eq!(auto.interval(), Some(DEFAULT_INTERVAL));
}

#[then(expr = "the endpoint list was fetched at least {int} times")]
fn list_fetched(world: &mut StatusboardWorld, count: usize) {
    let fetched = world.backend.list_requests();
    assert!(fetched >= count, "expected at least {count} fetches, got {fetched}");
}
