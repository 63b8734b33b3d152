use outcome_rail::{Error, Outcome, Redaction, ReportConfig};

#[test]
fn failed_outcome_renders_default_title_and_message() {
    let outcome: Outcome<i32> = Outcome::fail("divisor must not be zero");
    let rendered = outcome.error().to_string();

    assert!(rendered.starts_with("Error: divisor must not be zero"), "{rendered}");
}

#[test]
fn full_report_lists_fields_extensions_and_causes() {
    let error = Error::builder()
        .title("Storage")
        .message("save failed")
        .code(507)
        .identifier("req-5")
        .extension("bucket", "invoices")
        .stack_trace("   at app::save in src/save.rs:10:5")
        .inner(Error::new("disk full").with_stack_trace("   at app::write in src/io.rs:2:1"))
        .build();

    let expected = "\
Storage: save failed
Error code: 507
Identifier: req-5
bucket: invoices
   at app::save in src/save.rs:10:5
 ---> Error: disk full
   at app::write in src/io.rs:2:1";
    assert_eq!(error.to_string(), expected);
}

#[test]
fn sensitive_errors_render_only_title_code_and_identifier() {
    let error = Error::builder()
        .title("AuthFailure")
        .message("password for alice was wrong")
        .code(401)
        .identifier("req-8")
        .extension("user", "alice")
        .sensitive(true)
        .build();

    assert_eq!(error.to_string(), "AuthFailure: code 401 - req-8");
    assert_eq!(Error::new("m").with_sensitive(true).to_string(), "Error");
}

#[test]
fn sensitive_inner_errors_show_only_their_title() {
    let error = Error::new("login failed")
        .with_inner(Error::new("token abc123 rejected").with_title("Token").with_sensitive(true));

    let rendered = error.to_string();
    assert!(rendered.contains(" ---> Token"));
    assert!(!rendered.contains("abc123"));
}

#[test]
fn error_valued_extensions_render_as_nested_reports() {
    let error = Error::new("batch failed")
        .with_extension("first", Error::new("row 1 invalid"))
        .with_extension("others", vec![Error::new("row 2 invalid"), Error::new("row 3 invalid")]);

    let expected = "\
Error: batch failed
first:
  Error: row 1 invalid
others[0]:
  Error: row 2 invalid
others[1]:
  Error: row 3 invalid";
    assert_eq!(error.to_string(), expected);
}

#[test]
fn report_config_can_force_or_lift_redaction() {
    let error = Error::new("secret detail").with_sensitive(true);

    assert_eq!(error.report().redaction(Redaction::Never).to_string(), "Error: secret detail");
    assert_eq!(ReportConfig::redacted().render(&Error::new("visible")), "Error");
}

#[test]
fn compact_report_is_the_headline_only() {
    let error = Error::new("outer")
        .with_extension("key", "value")
        .with_inner(Error::new("inner"));

    assert_eq!(error.report().compact().to_string(), "Error: outer");
    assert_eq!(
        error.report().show_traces(false).causal_marker(" => ").show_extensions(false).to_string(),
        "Error: outer\n => Error: inner"
    );
}
