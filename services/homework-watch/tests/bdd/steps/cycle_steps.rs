//! BDD step definitions for the polling cycle

use std::time::Duration;

use cucumber::{given, then, when};
use tokio_util::sync::CancellationToken;

use homework_watch::engine::{CycleOutcome, Engine};
use homework_watch::state::PollState;
use homework_watch::WatchError;

use crate::world::WatchWorld;

fn engine(world: &mut WatchWorld) -> &mut Engine {
    let source = world.source.clone();
    let notifier = world.notifier.clone();
    let cursor = world.start_cursor;
    world.engine.get_or_insert_with(|| {
        Engine::new(
            source,
            notifier,
            PollState::new(cursor),
            Duration::from_millis(10),
            CancellationToken::new(),
        )
    })
}

fn last_outcome(world: &WatchWorld) -> &CycleOutcome {
    world.outcomes.last().expect("no cycle has run")
}

#[given(expr = "the watcher starts with cursor {int}")]
fn watcher_starts(world: &mut WatchWorld, cursor: i64) {
    world.start_cursor = cursor;
}

#[given(expr = "the status API reports homework {string} as {string} at {int}")]
fn api_reports_homework(world: &mut WatchWorld, name: String, status: String, date: i64) {
    world.source.push(Ok(serde_json::json!({
        "homeworks": [{"homework_name": name, "status": status}],
        "current_date": date
    })));
}

#[given("the status API reports no homeworks")]
fn api_reports_nothing(world: &mut WatchWorld) {
    world.source.push(Ok(serde_json::json!({"homeworks": []})));
}

#[given(expr = "the status API returns the body {string}")]
fn api_returns_body(world: &mut WatchWorld, body: String) {
    let raw = serde_json::from_str(&body).expect("step body must be JSON");
    world.source.push(Ok(raw));
}

#[given(expr = "the status API is unavailable with {string}")]
fn api_unavailable(world: &mut WatchWorld, detail: String) {
    world.source.push(Err(WatchError::ApiUnavailable(detail)));
}

#[given("the notification channel is down")]
fn channel_down(world: &mut WatchWorld) {
    *world.notifier.failing.lock().unwrap() = true;
}

#[when("a polling cycle runs")]
async fn cycle_runs(world: &mut WatchWorld) {
    let outcome = engine(world).run_cycle().await;
    world.outcomes.push(outcome);
}

#[when(expr = "{int} polling cycles run")]
async fn cycles_run(world: &mut WatchWorld, count: usize) {
    for _ in 0..count {
        let outcome = engine(world).run_cycle().await;
        world.outcomes.push(outcome);
    }
}

#[then(expr = "{int} notification(s) should have been sent")]
fn notifications_sent(world: &mut WatchWorld, count: usize) {
    let sent = world.notifier.sent();
    assert_eq!(sent.len(), count, "sent: {:?}", sent);
}

#[then(expr = "notification {int} should be {string}")]
fn notification_is(world: &mut WatchWorld, index: usize, expected: String) {
    let sent = world.notifier.sent();
    assert_eq!(sent.get(index - 1), Some(&expected), "sent: {:?}", sent);
}

#[then(expr = "notification {int} should contain {string}")]
fn notification_contains(world: &mut WatchWorld, index: usize, expected: String) {
    let sent = world.notifier.sent();
    let text = sent
        .get(index - 1)
        .unwrap_or_else(|| panic!("only {} notifications were sent", sent.len()));
    assert!(text.contains(&expected), "'{}' lacks '{}'", text, expected);
}

#[then(expr = "the next fetch should use cursor {int}")]
fn next_cursor(world: &mut WatchWorld, cursor: i64) {
    let engine = world.engine.as_ref().expect("engine not started");
    assert_eq!(engine.state().cursor, cursor);
}

#[then(expr = "the fetches should have used cursors {string}")]
fn fetch_cursors(world: &mut WatchWorld, expected: String) {
    let expected: Vec<i64> = expected
        .split(',')
        .map(|c| c.trim().parse().expect("cursor must be an integer"))
        .collect();
    assert_eq!(*world.source.cursors.lock().unwrap(), expected);
}

#[then(expr = "the cycle should fail with {string}")]
fn cycle_fails(world: &mut WatchWorld, expected: String) {
    match last_outcome(world) {
        CycleOutcome::Failed(message) => {
            assert!(message.contains(&expected), "'{}' lacks '{}'", message, expected)
        }
        other => panic!("expected failure, got {:?}", other),
    }
}

#[then("the cycle should report no submissions")]
fn cycle_reports_nothing(world: &mut WatchWorld) {
    assert_eq!(last_outcome(world), &CycleOutcome::NoSubmissions);
}

#[then("the cycle should report an unchanged status")]
fn cycle_unchanged(world: &mut WatchWorld) {
    assert_eq!(last_outcome(world), &CycleOutcome::Unchanged);
}

#[then("no status should have been recorded")]
fn no_status_recorded(world: &mut WatchWorld) {
    let engine = world.engine.as_ref().expect("engine not started");
    assert_eq!(engine.state().last_status, None);
}
