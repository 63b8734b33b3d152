use std::collections::HashSet;

use outcome_rail::{Error, Extension};

#[test]
fn empty_title_and_message_fall_back_to_defaults() {
    let error = Error::builder().title("   ").message("").build();

    assert_eq!(error.title(), "Error");
    assert_eq!(error.message(), "An unexpected error has occurred.");
}

#[test]
fn default_error_is_one_shared_instance() {
    let first = Error::default();
    let second = Error::default();

    assert!(first.ptr_eq(&second));
    assert_eq!(first.title(), "Error");
}

#[test]
fn equality_ignores_trace_and_extensions() {
    let plain = Error::new("timeout").with_code(504).with_identifier("req-1");
    let decorated = plain
        .with_stack_trace("   at app::call in src/app.rs:3:1")
        .with_extension("attempt", 3);

    assert_eq!(plain, decorated);
    assert!(!plain.ptr_eq(&decorated));

    let set: HashSet<Error> = [plain, decorated].into_iter().collect();
    assert_eq!(set.len(), 1);
}

#[test]
fn equality_is_structural_over_identifying_fields() {
    let base = Error::new("timeout").with_code(504);

    assert_ne!(base, base.with_code(503));
    assert_ne!(base, base.with_identifier("req-9"));
    assert_ne!(base, base.with_title("Gateway"));
}

#[test]
fn with_methods_leave_the_receiver_untouched() {
    let original = Error::new("first");
    let changed = original.with_message("second");

    assert_eq!(original.message(), "first");
    assert_eq!(changed.message(), "second");
}

#[test]
fn extensions_keep_insertion_order_and_replace_in_place() {
    let error = Error::builder()
        .extension("b", 1)
        .extension("a", "text")
        .extension("b", true)
        .build();

    let keys: Vec<&str> = error.extensions().keys().collect();
    assert_eq!(keys, ["b", "a"]);
    assert_eq!(error.extension("b"), Some(&Extension::Bool(true)));
}

#[test]
fn chain_walks_inner_errors_outermost_first() {
    let root = Error::new("disk unplugged");
    let middle = Error::new("write failed").with_inner(root.clone());
    let top = Error::new("save failed").with_inner(middle.clone());

    let messages: Vec<&str> = top.chain().map(Error::message).collect();
    assert_eq!(messages, ["save failed", "write failed", "disk unplugged"]);
    assert_eq!(top.root_cause(), &root);
    assert_eq!(top.inner_errors().count(), 2);
}

#[test]
fn std_error_source_follows_inner_error() {
    let top = Error::new("outer").with_inner(Error::new("inner"));
    let source = std::error::Error::source(&top).map(ToString::to_string);

    assert!(source.is_some_and(|s| s.starts_with("Error: inner")));
}

#[test]
fn cancelled_errors_are_classified() {
    let error = Error::cancelled(Some("shutdown"));

    assert!(error.is_cancellation());
    assert_eq!(error.title(), Error::CANCELLED_TITLE);
    assert_eq!(error.message(), "The operation was cancelled: shutdown");
}

#[test]
fn no_value_errors_are_fresh_instances() {
    let first = Error::no_value();
    let second = Error::no_value();

    assert!(first.is_no_value());
    assert_eq!(first, second);
    assert!(!first.ptr_eq(&second));
}

#[test]
fn fingerprint_ignores_identifier_by_default() {
    let a = Error::new("quota exceeded").with_code(429).with_identifier("req-1");
    let b = Error::new("quota exceeded").with_code(429).with_identifier("req-2");

    assert_eq!(a.fingerprint(), b.fingerprint());
    assert_ne!(
        a.fingerprint_config().include_identifier(true).compute(),
        b.fingerprint_config().include_identifier(true).compute()
    );
    assert_eq!(a.fingerprint_hex().len(), 16);
}

#[test]
fn fingerprint_can_include_selected_extensions() {
    let a = Error::new("quota exceeded").with_extension("tenant", "acme");
    let b = Error::new("quota exceeded").with_extension("tenant", "globex");

    assert_eq!(a.fingerprint(), b.fingerprint());
    assert_ne!(
        a.fingerprint_config().include_extensions(&["tenant"]).compute(),
        b.fingerprint_config().include_extensions(&["tenant"]).compute()
    );
}

#[test]
fn error_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Error>();
    assert_send_sync::<outcome_rail::Outcome<String>>();
    assert_send_sync::<outcome_rail::OptionalOutcome<String>>();
}
