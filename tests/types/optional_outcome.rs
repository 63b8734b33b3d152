use std::cell::Cell;

use outcome_rail::{Error, NotificationChannel, OptionalOutcome, Outcome, OutcomeState};

fn lookup(key: &str) -> OptionalOutcome<u32> {
    match key {
        "" => OptionalOutcome::fail("empty key"),
        "answer" => OptionalOutcome::success(42),
        _ => OptionalOutcome::none(),
    }
}

#[test]
fn none_get_value_or_returns_fallback() {
    assert_eq!(OptionalOutcome::<String>::none().get_value_or("x".to_owned()), "x");
}

#[test]
fn none_is_distinct_from_fail() {
    let none = lookup("missing");

    assert_eq!(none.state(), OutcomeState::None);
    assert!(none.is_none());
    assert!(!none.is_fail());
    assert!(none.try_error().is_err());
    assert_ne!(none, lookup(""));
}

#[test]
fn none_exposes_a_no_value_error_on_demand() {
    let none = lookup("missing");
    let error = none.error_or_no_value().expect("none reports an error on demand");

    assert!(error.is_no_value());
    assert!(lookup("answer").error_or_no_value().is_none());
    assert_eq!(lookup("").error_or_no_value().map(|e| e.message().to_owned()).as_deref(), Some("empty key"));
}

#[test]
#[should_panic(expected = "cannot access the error of an outcome in the None state")]
fn error_of_none_panics() {
    let _ = lookup("missing").error();
}

#[test]
#[should_panic(expected = "cannot access the value of an outcome in the None state")]
fn value_of_none_panics() {
    let _ = lookup("missing").value();
}

#[test]
fn match_with_dispatches_on_all_three_states() {
    let describe = |outcome: OptionalOutcome<u32>| {
        outcome.match_with(|v| format!("value {v}"), || "none".to_owned(), |e| e.message().to_owned())
    };

    assert_eq!(describe(lookup("answer")), "value 42");
    assert_eq!(describe(lookup("missing")), "none");
    assert_eq!(describe(lookup("")), "empty key");
}

#[test]
fn none_flat_map_is_none_and_skips_the_function() {
    let called = Cell::new(false);
    let result = lookup("missing").flat_map(|v| {
        called.set(true);
        OptionalOutcome::success(v + 1)
    });

    assert!(result.is_none());
    assert!(!called.get());
}

#[test]
fn flat_map_identity_law() {
    let step = |v: u32| if v > 10 { OptionalOutcome::success(v - 10) } else { OptionalOutcome::none() };

    assert_eq!(OptionalOutcome::success(42).flat_map(step), step(42));
    assert_eq!(OptionalOutcome::success(3).flat_map(step), step(3));
}

#[test]
fn fail_propagates_through_value_combinators() {
    let channel = NotificationChannel::new();
    channel.set_capture_traces(false);
    let error = Error::new("store offline");
    let failed: OptionalOutcome<u32> = OptionalOutcome::fail_in(&channel, error.clone());

    let result = failed.map(|v| v + 1).filter(|_| true).to_none_if(|_| true);

    assert!(result.error().ptr_eq(&error));
}

#[test]
fn cross_map_from_none_fails_a_plain_outcome_with_no_value() {
    let outcome: Outcome<u32> = lookup("missing").cross_map(Outcome::success);

    assert!(outcome.error().is_no_value());
}

#[test]
fn cross_map_from_none_to_optional_stays_none() {
    let outcome: OptionalOutcome<String> = lookup("missing").cross_map(|v| OptionalOutcome::success(v.to_string()));

    assert!(outcome.is_none());
}

#[test]
fn rescue_leaves_none_untouched_and_rescue_none_replaces_it() {
    assert!(lookup("missing").rescue(|_| OptionalOutcome::success(0)).is_none());
    assert_eq!(lookup("").rescue(|_| OptionalOutcome::success(0)).into_value(), Some(0));
    assert_eq!(lookup("missing").rescue_none(|| OptionalOutcome::success(7)).into_value(), Some(7));
    assert_eq!(lookup("answer").rescue_none(|| OptionalOutcome::success(7)).into_value(), Some(42));
}

#[test]
fn on_none_runs_only_for_none() {
    let hits = Cell::new(0);

    let _ = lookup("missing").on_none(|| hits.set(hits.get() + 1));
    let _ = lookup("answer").on_none(|| hits.set(hits.get() + 1));
    let _ = lookup("").on_none(|| hits.set(hits.get() + 1));

    assert_eq!(hits.get(), 1);
}

#[test]
fn on_none_fault_becomes_failure() {
    let outcome = lookup("missing").on_none(|| panic!("metrics sink down"));

    assert_eq!(outcome.error().message(), "metrics sink down");
}

#[test]
fn filter_demotes_to_none_when_predicate_is_false() {
    assert!(lookup("answer").filter(|v| *v > 100).is_none());
    assert_eq!(lookup("answer").filter(|v| *v > 10).into_value(), Some(42));
}

#[test]
fn to_none_if_and_to_fail_if_demote_successes() {
    assert!(lookup("answer").to_none_if(|v| *v == 42).is_none());

    let failed = lookup("answer").to_fail_if(|v| *v == 42, |v| Error::new(format!("{v} is reserved")));
    assert_eq!(failed.error().message(), "42 is reserved");
}

#[test]
fn predicate_fault_becomes_failure() {
    let outcome = lookup("answer").filter(|_| panic!("predicate exploded"));

    assert!(outcome.is_fail());
}

#[test]
fn with_error_only_touches_failures() {
    let replaced = lookup("").with_error(|e| e.with_code(400));

    assert_eq!(replaced.error().error_code(), Some(400));
    assert!(lookup("missing").with_error(|e| e.with_code(400)).is_none());
}

#[test]
fn into_result_maps_all_three_states() {
    assert_eq!(lookup("answer").into_result().ok(), Some(Some(42)));
    assert_eq!(lookup("missing").into_result().ok(), Some(None));
    assert!(lookup("").into_result().is_err());
}

#[test]
fn default_is_an_implicit_failure() {
    let outcome: OptionalOutcome<u8> = OptionalOutcome::default();

    assert!(outcome.is_fail());
    assert!(outcome.error().ptr_eq(&Error::default()));
}

#[test]
fn get_value_or_else_computes_fallback_lazily() {
    let calls = Cell::new(0);
    let value = lookup("answer").get_value_or_else(|| {
        calls.set(calls.get() + 1);
        0
    });

    assert_eq!(value, 42);
    assert_eq!(calls.get(), 0);
}
