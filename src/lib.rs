//! Explicit outcome types for operations that can succeed, come back empty,
//! or fail with a structured error, plus a combinator algebra that keeps
//! failure handling in ordinary control flow.
//!
//! Each submodule re-exports its public surface from here, so consumers can
//! simply depend on `outcome_rail::*` or pick focused pieces as needed.
//!
//! # Examples
//!
//! ## Chaining Outcomes
//!
//! ```
//! use outcome_rail::{Error, Outcome};
//!
//! fn divide(a: i32, b: i32) -> Outcome<i32> {
//!     if b == 0 {
//!         return Outcome::fail(Error::new("divisor must not be zero").with_code(22));
//!     }
//!     Outcome::success(a / b)
//! }
//!
//! let answer = divide(84, 2).flat_map(|v| divide(v, 1)).map(|v| v.to_string());
//! assert_eq!(answer.into_value().as_deref(), Some("42"));
//!
//! let failed = divide(1, 0).map(|v| v + 1);
//! assert_eq!(failed.error().error_code(), Some(22));
//! ```
//!
//! ## Optional Values
//!
//! ```
//! use outcome_rail::OptionalOutcome;
//!
//! let nickname: OptionalOutcome<String> = OptionalOutcome::none();
//! assert_eq!(nickname.get_value_or("x".to_owned()), "x");
//! ```
//!
//! ## Observing Failures
//!
//! ```
//! use outcome_rail::{NotificationChannel, Outcome};
//!
//! let channel = NotificationChannel::new();
//! channel.on_replace(|e| e.with_identifier("req-42"));
//!
//! let failed: Outcome<u8> = Outcome::fail_in(&channel, "timeout talking to billing");
//! assert_eq!(failed.error().identifier(), Some("req-42"));
//! ```

#[macro_use]
mod macros;

/// Conversion of `std::error::Error` values into [`Error`]
pub mod adapter;
/// Conversions between outcomes, `Result` and `Option`
pub mod convert;
/// Call-site capture and frame filtering
pub mod diagnostics;
/// Classification of panics raised by combinator callbacks
pub mod fault;
/// The at-most-once failure notification channel
pub mod notify;
/// Convenience re-exports for quick starts
pub mod prelude;
/// Traits shared by the outcome kinds
pub mod traits;
/// Outcome types and the error model
pub mod types;

/// Async combinators (requires `async` feature)
#[cfg(feature = "async")]
pub mod async_ext;

/// Tracing integration (requires `tracing` feature)
#[cfg(feature = "tracing")]
pub mod tracing_ext;

pub use adapter::{ExceptionAdapter, HarvestFields};
pub use diagnostics::FrameFilter;
pub use fault::{cancel, cancel_with, raise, Cancelled};
pub use notify::NotificationChannel;
pub use traits::{OptionExt, OutcomeKind, ResultExt};
pub use types::{
    CauseRole, Error, ErrorBuilder, ErrorReport, Extension, Extensions, InvalidState,
    OptionalOutcome, Outcome, OutcomeState, Redaction, ReportConfig,
};
