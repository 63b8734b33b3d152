use std::fmt;
use std::io;

use outcome_rail::adapter::{ExceptionAdapter, HarvestFields};
use outcome_rail::{Error, Extensions};

#[derive(Debug)]
struct LoadConfig {
    path: &'static str,
    source: io::Error,
}

impl fmt::Display for LoadConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "could not load {}", self.path)
    }
}

impl std::error::Error for LoadConfig {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

#[derive(Debug)]
struct Startup {
    source: LoadConfig,
}

impl fmt::Display for Startup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("service failed to start")
    }
}

impl std::error::Error for Startup {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

#[derive(Debug)]
struct Noisy;

impl fmt::Display for Noisy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("noisy failure")
    }
}

impl std::error::Error for Noisy {}

impl HarvestFields for Noisy {
    fn title(&self) -> std::borrow::Cow<'static, str> {
        "NoisyFailure".into()
    }

    fn harvest(&self, fields: &mut Extensions) {
        fields.insert("shard", 3);
        fields.insert("message", "duplicate of the message");
        fields.insert("stackTrace", "frames");
        fields.insert("Source", "cause pointer");
        fields.insert("nested", Error::new("flows through inner_error"));
    }
}

#[derive(Debug)]
struct Wrapper {
    inner: Error,
}

impl fmt::Display for Wrapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("wrapper")
    }
}

impl std::error::Error for Wrapper {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.inner)
    }
}

fn startup_error() -> Startup {
    Startup {
        source: LoadConfig {
            path: "app.toml",
            source: io::Error::new(io::ErrorKind::PermissionDenied, "access denied"),
        },
    }
}

#[test]
fn inner_errors_mirror_the_source_chain() {
    let error = Error::from_exception(&startup_error());

    let levels: Vec<(&str, &str)> = error.chain().map(|e| (e.title(), e.message())).collect();
    assert_eq!(
        levels,
        [
            ("Startup", "service failed to start"),
            ("Error", "could not load app.toml"),
            ("IoError", "access denied"),
        ]
    );
    assert_eq!(
        error.root_cause().extension("kind").map(ToString::to_string).as_deref(),
        Some("PermissionDenied")
    );
}

#[test]
fn dyn_exception_uses_default_title_for_unregistered_types() {
    let startup = startup_error();
    let error = Error::from_dyn_exception(&startup);

    assert_eq!(error.title(), "Error");
    assert_eq!(error.inner_errors().count(), 2);
}

#[test]
fn io_errors_carry_the_os_error_code() {
    let error = Error::from_exception(&io::Error::from_raw_os_error(2));

    assert_eq!(error.title(), "IoError");
    assert_eq!(error.error_code(), Some(2));
    assert_eq!(error.extension("kind").map(ToString::to_string).as_deref(), Some("NotFound"));
}

#[test]
fn utf8_errors_report_the_valid_prefix() {
    let bytes = vec![b'o', b'k', 0xff];
    let utf8 = String::from_utf8(bytes).unwrap_err();
    let error = Error::from_exception(&utf8);

    assert_eq!(error.title(), "FromUtf8Error");
    assert_eq!(error.extension("valid_up_to").map(ToString::to_string).as_deref(), Some("2"));
}

#[test]
fn excluded_and_error_valued_fields_are_dropped() {
    let adapter = ExceptionAdapter::new();
    adapter.register::<Noisy>();

    let error = adapter.adapt(&Noisy);

    assert_eq!(error.title(), "NoisyFailure");
    let keys: Vec<&str> = error.extensions().keys().collect();
    assert_eq!(keys, ["shard"]);
}

#[test]
fn custom_exclusions_extend_the_default_list() {
    let adapter = ExceptionAdapter::new();
    adapter.register::<Noisy>();
    adapter.exclude("shard");

    assert!(adapter.is_excluded("SHARD"));
    assert!(adapter.adapt(&Noisy).extensions().is_empty());
}

#[test]
fn existing_errors_in_the_chain_are_reused() {
    let inner = Error::new("already structured").with_inner(Error::new("deeper"));
    let error = Error::from_exception(&Wrapper { inner: inner.clone() });

    assert_eq!(error.title(), "Wrapper");
    assert!(error.inner_error().is_some_and(|e| e.ptr_eq(&inner)));
    assert_eq!(error.chain().count(), 3);
}

#[test]
fn adapting_an_error_returns_it_unchanged() {
    let error = Error::new("structured");

    assert!(Error::from_exception(&error).ptr_eq(&error));
}

#[test]
fn overrides_apply_to_the_top_level_only() {
    let error = Error::from_exception_with(&startup_error(), |builder| {
        builder.title("BootFailure").message("boot aborted").code(78).identifier("boot-1")
    });

    assert_eq!(error.title(), "BootFailure");
    assert_eq!(error.message(), "boot aborted");
    assert_eq!(error.error_code(), Some(78));
    assert_eq!(error.identifier(), Some("boot-1"));
    assert_eq!(error.inner_error().map(Error::message), Some("could not load app.toml"));
}

#[test]
fn empty_adapter_has_no_builtin_harvesters() {
    let adapter = ExceptionAdapter::empty();
    let error = adapter.adapt(&io::Error::from_raw_os_error(2));

    assert_eq!(error.title(), "Error");
    assert!(error.extensions().is_empty());
}
