//! Group-hook interleaving and stop semantics for the suite runner.

use std::sync::{Arc, Mutex};
use testcompat::{Case, Group, RunResult, Suite, TestFailure};

type EventLog = Arc<Mutex<Vec<String>>>;

fn log(events: &EventLog, entry: impl Into<String>) {
    events.lock().unwrap().push(entry.into());
}

fn hooked_group(name: &str, events: &EventLog) -> Arc<Group> {
    let up = Arc::clone(events);
    let up_entry = format!("set_up {name}");
    let down = Arc::clone(events);
    let down_entry = format!("tear_down {name}");
    Arc::new(
        Group::new(name)
            .with_set_up(move || log(&up, up_entry.clone()))
            .with_tear_down(move || log(&down, down_entry.clone())),
    )
}

fn logged_case(name: &str, group: &Arc<Group>, events: &EventLog) -> Case {
    let body_events = Arc::clone(events);
    let entry = name.to_string();
    Case::new(name, group, move || {
        log(&body_events, entry.clone());
        Ok(())
    })
}

#[test]
fn hooks_fire_on_every_group_transition() {
    // Sequence [A, A, B, B, B, A]: A's hooks fire twice, once per
    // contiguous run, not once per group overall.
    let events: EventLog = Arc::default();
    let group_a = hooked_group("a", &events);
    let group_b = hooked_group("b", &events);

    let mut suite = Suite::new();
    suite.push(logged_case("a1", &group_a, &events));
    suite.push(logged_case("a2", &group_a, &events));
    suite.push(logged_case("b1", &group_b, &events));
    suite.push(logged_case("b2", &group_b, &events));
    suite.push(logged_case("b3", &group_b, &events));
    suite.push(logged_case("a3", &group_a, &events));

    let mut result = RunResult::new();
    suite.run(&mut result);

    assert_eq!(
        *events.lock().unwrap(),
        vec![
            "set_up a",
            "a1",
            "a2",
            "tear_down a",
            "set_up b",
            "b1",
            "b2",
            "b3",
            "tear_down b",
            "set_up a",
            "a3",
            "tear_down a",
        ]
    );
    assert_eq!(result.run_count(), 6);
    assert!(result.was_successful());
}

#[test]
fn stop_request_skips_remaining_cases_but_tears_down_active_group() {
    let events: EventLog = Arc::default();
    let group_a = hooked_group("a", &events);
    let group_b = hooked_group("b", &events);

    let mut suite = Suite::new();
    suite.push(logged_case("a1", &group_a, &events));
    suite.push(logged_case("a2", &group_a, &events));

    let result = RunResult::new();
    let stop = result.stop_handle();
    let stop_events = Arc::clone(&events);
    suite.push(Case::new("b1", &group_b, move || {
        log(&stop_events, "b1");
        stop.request_stop();
        Ok(())
    }));
    suite.push(logged_case("b2", &group_b, &events));
    suite.push(logged_case("b3", &group_b, &events));

    let mut result = result;
    suite.run(&mut result);

    assert_eq!(
        *events.lock().unwrap(),
        vec![
            "set_up a",
            "a1",
            "a2",
            "tear_down a",
            "set_up b",
            "b1",
            "tear_down b",
        ]
    );
    assert_eq!(result.run_count(), 3);
    assert!(result.stop_requested());
}

#[test]
fn stop_requested_before_run_executes_nothing() {
    let events: EventLog = Arc::default();
    let group = hooked_group("a", &events);

    let mut suite = Suite::new();
    suite.push(logged_case("a1", &group, &events));

    let mut result = RunResult::new();
    result.request_stop();
    suite.run(&mut result);

    assert!(events.lock().unwrap().is_empty());
    assert_eq!(result.run_count(), 0);
}

#[test]
fn groups_without_hooks_interleave_with_hooked_groups() {
    let events: EventLog = Arc::default();
    let hooked = hooked_group("hooked", &events);
    let bare = Arc::new(Group::new("bare"));

    let mut suite = Suite::new();
    suite.push(logged_case("h1", &hooked, &events));
    suite.push(logged_case("n1", &bare, &events));
    suite.push(logged_case("h2", &hooked, &events));

    let mut result = RunResult::new();
    suite.run(&mut result);

    assert_eq!(
        *events.lock().unwrap(),
        vec![
            "set_up hooked",
            "h1",
            "tear_down hooked",
            "n1",
            "set_up hooked",
            "h2",
            "tear_down hooked",
        ]
    );
}

#[test]
fn failing_case_fails_the_case_not_the_run() {
    let events: EventLog = Arc::default();
    let group = hooked_group("g", &events);

    let mut suite = Suite::new();
    suite.push(logged_case("ok1", &group, &events));
    suite.push(Case::new("bad", &group, || {
        Err(TestFailure::message("expected 2, got 3"))
    }));
    suite.push(logged_case("ok2", &group, &events));

    let mut result = RunResult::new();
    suite.run(&mut result);

    assert_eq!(result.run_count(), 3);
    assert_eq!(result.failed_count(), 1);
    assert_eq!(result.failures()[0].case, "bad");
    assert_eq!(result.failures()[0].failure.to_string(), "expected 2, got 3");
    // Hooks still wrapped the whole contiguous run.
    assert_eq!(events.lock().unwrap().first().unwrap(), "set_up g");
    assert_eq!(events.lock().unwrap().last().unwrap(), "tear_down g");
}

#[test]
fn fail_fast_stop_still_runs_trailing_teardown() {
    let events: EventLog = Arc::default();
    let group = hooked_group("g", &events);

    let mut suite = Suite::new();
    suite.push(Case::new("bad", &group, || {
        Err(TestFailure::message("boom"))
    }));
    suite.push(logged_case("never", &group, &events));

    let mut result = RunResult::fail_fast();
    suite.run(&mut result);

    assert_eq!(
        *events.lock().unwrap(),
        vec!["set_up g", "tear_down g"]
    );
    assert_eq!(result.run_count(), 1);
    assert_eq!(result.failed_count(), 1);
}
