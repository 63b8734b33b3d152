//! Outcome types and the error record they carry.
//!
//! - [`Outcome<T>`](Outcome): success with a value (or `()`), or failure
//! - [`OptionalOutcome<T>`](OptionalOutcome): success, legitimate absence, or failure
//! - [`Error`]: the immutable diagnostic record of a failure
//!
//! # Examples
//!
//! ```
//! use outcome_rail::{Error, OptionalOutcome, Outcome};
//!
//! let saved: Outcome = Outcome::ok();
//! assert!(saved.is_success());
//!
//! let cached: OptionalOutcome<u32> = OptionalOutcome::none();
//! let loaded: Outcome<u32> = cached.cross_map(Outcome::success).rescue(|e| {
//!     assert!(e.is_no_value());
//!     Outcome::success(7)
//! });
//! assert_eq!(loaded.into_value(), Some(7));
//!
//! let failed: Outcome<u32> = Outcome::fail(Error::new("cache offline"));
//! assert_eq!(failed.get_value_or(0), 0);
//! ```

pub mod error;
pub mod invalid_state;
pub mod optional;
pub mod outcome;
pub mod report;

pub use error::{CauseRole, Chain, Error, ErrorBuilder, Extension, Extensions, FingerprintConfig};
pub use invalid_state::{InvalidState, OutcomeState};
pub use optional::OptionalOutcome;
pub use outcome::Outcome;
pub use report::{ErrorReport, Redaction, ReportConfig};
