use outcome_rail::tracing_ext::{self, attach_span, OutcomeSpanExt, SPAN_KEY};
use outcome_rail::{Error, NotificationChannel, OptionalOutcome, Outcome};
use tracing::Span;

fn span_text(error: &Error) -> Option<String> {
    error.extension(SPAN_KEY).map(ToString::to_string)
}

#[test]
fn disabled_span_is_recorded_as_unknown() {
    let error = attach_span(&Error::new("no subscriber"), &Span::none());

    assert_eq!(span_text(&error).as_deref(), Some("in span 'unknown'"));
}

#[test]
fn attach_span_leaves_the_original_untouched() {
    let original = Error::new("kept");
    let _ = attach_span(&original, &Span::none());

    assert!(original.extension(SPAN_KEY).is_none());
}

#[test]
fn with_current_span_only_touches_failures() {
    let ok = Outcome::success(1).with_current_span();
    let none = OptionalOutcome::<u8>::none().with_current_span();
    let failed: Outcome<u8> = Outcome::fail("spanned").with_current_span();

    assert!(ok.is_success());
    assert!(none.is_none());
    assert!(span_text(failed.error()).is_some());
}

#[test]
fn log_failure_handles_sensitive_and_plain_errors() {
    tracing_ext::log_failure(&Error::new("plain"));
    tracing_ext::log_failure(&Error::new("secret").with_sensitive(true));
}

#[test]
fn installed_logger_runs_as_an_observe_hook() {
    let channel = NotificationChannel::new();
    channel.set_capture_traces(false);
    tracing_ext::install(&channel);

    let outcome: Outcome<()> = Outcome::fail_in(&channel, "logged");

    assert!(outcome.is_fail());
}
