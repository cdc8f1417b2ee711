//! BDD step definitions for the presentation feature

use chrono::{Duration, Utc};
use cucumber::{then, when};

use statusboard::present::{format_response_time, format_time_ago};

use crate::world::StatusboardWorld;

#[when("the dashboard refreshes")]
async fn dashboard_refreshes(world: &mut StatusboardWorld) {
    world.statusboard().list().await;
}

#[when(expr = "a response time of {float} ms is formatted")]
fn format_time(world: &mut StatusboardWorld, ms: f64) {
    let (text, _) = format_response_time(Some(ms));
    world.formatted = Some(text);
}

#[when("a missing response time is formatted")]
fn format_missing_time(world: &mut StatusboardWorld) {
    let (text, _) = format_response_time(None);
    world.formatted = Some(text);
}

#[when(expr = "a check {int} minutes ago is described")]
fn describe_minutes_ago(world: &mut StatusboardWorld, minutes: i64) {
    let now = Utc::now();
    world.formatted = Some(format_time_ago(Some(now - Duration::minutes(minutes)), now));
}

#[then(expr = "the text is {string}")]
fn text_is(world: &mut StatusboardWorld, expected: String) {
    assert_eq!(world.formatted.as_deref(), Some(expected.as_str()));
}

#[then(expr = "the stat cards show {int} operational, {int} down and {int} total")]
fn stat_cards_show(world: &mut StatusboardWorld, operational: usize, down: usize, total: usize) {
    let stats = world.target.last_stats().expect("nothing rendered");
    assert_eq!(stats.operational, operational);
    assert_eq!(stats.down, down);
    assert_eq!(stats.total, total);
}

#[then(expr = "the table has {int} rows")]
fn table_has_rows(world: &mut StatusboardWorld, rows: usize) {
    let table = world.target.last_table().expect("nothing rendered");
    assert_eq!(table.len(), rows);
}

#[then(expr = "the charts have been updated {int} time(s)")]
fn charts_updated(world: &mut StatusboardWorld, times: u64) {
    let updates = world.target.chart_updates.lock().unwrap();
    assert_eq!(updates.last().copied(), Some(times));
}
