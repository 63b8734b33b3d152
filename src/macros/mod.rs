//! Macros for building failing outcomes.
//!
//! - [`macro@crate::fail`] - Builds the failing state of whichever outcome
//!   kind the surrounding code expects, either from a format string or from
//!   anything convertible into [`Error`](crate::Error).
//!
//! # Examples
//!
//! ```
//! use outcome_rail::{fail, Error, OptionalOutcome, Outcome};
//!
//! fn parse_port(raw: &str) -> Outcome<u16> {
//!     match raw.parse() {
//!         Ok(port) => Outcome::success(port),
//!         Err(_) => fail!("`{raw}` is not a port number"),
//!     }
//! }
//!
//! fn lookup(key: &str) -> OptionalOutcome<String> {
//!     if key.is_empty() {
//!         return fail!(Error::new("empty key").with_code(400));
//!     }
//!     OptionalOutcome::none()
//! }
//!
//! assert_eq!(parse_port("80x").error().message(), "`80x` is not a port number");
//! assert_eq!(lookup("").error().error_code(), Some(400));
//! ```

/// Builds a failing outcome of the expected kind.
///
/// # Syntax
///
/// - `fail!("format {}", args)` - an [`Error`](crate::Error) with the
///   formatted message and the default title
/// - `fail!(error)` - any value implementing `Into<Error>`
///
/// The error is routed through the global notification channel.
#[macro_export]
macro_rules! fail {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::OutcomeKind::from_error($crate::Error::new(::std::format!($fmt $(, $arg)*)))
    };
    ($error:expr $(,)?) => {
        $crate::OutcomeKind::from_error(::std::convert::Into::<$crate::Error>::into($error))
    };
}

/// Emits a `tracing` event under the `tracing` feature, nothing otherwise.
macro_rules! rail_trace {
    ($level:ident, $($arg:tt)+) => {{
        #[cfg(feature = "tracing")]
        ::tracing::$level!(target: "outcome_rail", $($arg)+);
    }};
}
