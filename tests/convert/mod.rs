use std::cell::Cell;

use outcome_rail::convert::{attempt, attempt_optional, OutcomeIterExt};
use outcome_rail::traits::{OptionExt, ResultExt};
use outcome_rail::{Error, OptionalOutcome, Outcome};

#[test]
fn result_conversions_preserve_states() {
    let ok: Outcome<u8> = Ok::<u8, Error>(4).into();
    let err: Outcome<u8> = Err::<u8, Error>(Error::new("bad")).into();

    assert_eq!(ok.into_value(), Some(4));
    let back: Result<u8, Error> = err.into();
    assert_eq!(back.unwrap_err().message(), "bad");
}

#[test]
fn optional_conversions_preserve_states() {
    let some: OptionalOutcome<u8> = Some(1).into();
    let none: OptionalOutcome<u8> = None.into();

    assert!(some.is_success());
    assert!(none.is_none());

    let as_result: Result<Option<u8>, Error> = none.into();
    assert_eq!(as_result.ok(), Some(None));

    let failed: OptionalOutcome<u8> = Err::<Option<u8>, _>(Error::new("lookup failed")).into();
    assert!(failed.is_fail());
}

#[test]
fn outcome_widens_into_optional_outcome_without_renotifying() {
    let outcome: Outcome<u8> = Outcome::fail("narrow");
    let stored = outcome.error().clone();

    let widened: OptionalOutcome<u8> = outcome.into();

    assert!(widened.error().ptr_eq(&stored));
}

#[test]
fn result_ext_adapts_std_errors() {
    let parsed = "42".parse::<u32>().into_outcome();
    let broken = "4x2".parse::<u32>().into_outcome();

    assert_eq!(parsed.into_value(), Some(42));
    assert_eq!(broken.error().title(), "ParseIntError");
}

#[test]
fn result_ext_overrides_adjust_the_adapted_error() {
    let outcome = "x".parse::<f64>().into_outcome_with(|b| b.title("BadRatio").identifier("cfg-ratio"));

    assert_eq!(outcome.error().title(), "BadRatio");
    assert_eq!(outcome.error().identifier(), Some("cfg-ratio"));
}

#[test]
fn option_ext_builds_both_outcome_kinds() {
    assert!(Some(3).into_optional_outcome().is_success());
    assert!(None::<u8>.into_optional_outcome().is_none());
    assert_eq!(None::<u8>.into_outcome_or("missing").error().message(), "missing");
    assert_eq!(Some(3).into_outcome_or("missing").into_value(), Some(3));
    assert_eq!(
        None::<u8>.into_outcome_or_else(|| Error::new("lazy").with_code(1)).error().error_code(),
        Some(1)
    );
}

#[test]
fn attempt_adapts_declared_errors() {
    let outcome = attempt(|| std::fs::read_to_string("/this/path/does/not/exist"));

    assert_eq!(outcome.error().title(), "IoError");
}

#[test]
fn attempt_optional_maps_absence_to_none() {
    let absent = attempt_optional(|| Ok::<Option<u8>, std::num::ParseIntError>(None));
    let present = attempt_optional(|| "7".parse::<u8>().map(Some));
    let failed = attempt_optional(|| "z".parse::<u8>().map(Some));

    assert!(absent.is_none());
    assert_eq!(present.into_value(), Some(7));
    assert!(failed.is_fail());
}

#[test]
fn collect_stops_at_the_first_failure() {
    let pulled = Cell::new(0);
    let outcomes = (1..=5).map(|v| {
        pulled.set(pulled.get() + 1);
        if v == 3 { Outcome::fail(format!("item {v} rejected")) } else { Outcome::success(v) }
    });

    let collected: Outcome<Vec<i32>> = outcomes.collect();

    assert_eq!(collected.error().message(), "item 3 rejected");
    assert_eq!(pulled.get(), 3);
}

#[test]
fn collect_gathers_all_successes() {
    let collected: Outcome<Vec<i32>> = (1..=3).map(Outcome::success).collect();

    assert_eq!(collected.into_value(), Some(vec![1, 2, 3]));
}

#[test]
fn optional_collect_stops_at_none() {
    let items = vec![OptionalOutcome::success(1), OptionalOutcome::none(), OptionalOutcome::fail("late")];
    let collected: OptionalOutcome<Vec<i32>> = items.into_iter().collect();

    assert!(collected.is_none());
}

#[test]
fn fold_outcome_threads_the_accumulator() {
    let total = ["1", "2", "3"].into_iter().fold_outcome(0u32, |sum, raw| {
        raw.parse::<u32>().into_outcome().map(|v| sum + v)
    });

    assert_eq!(total.into_value(), Some(6));
}

#[test]
fn fold_outcome_stops_at_the_first_failure() {
    let visited = Cell::new(0);
    let total = ["1", "x", "3"].into_iter().fold_outcome(0u32, |sum, raw| {
        visited.set(visited.get() + 1);
        raw.parse::<u32>().into_outcome().map(|v| sum + v)
    });

    assert!(total.is_fail());
    assert_eq!(visited.get(), 2);
}

#[test]
fn try_each_converts_step_panics() {
    let outcome = [1, 2].into_iter().try_each(|v| {
        if v == 2 {
            panic!("step {v} crashed");
        }
        Outcome::ok()
    });

    assert_eq!(outcome.error().message(), "step 2 crashed");
}
