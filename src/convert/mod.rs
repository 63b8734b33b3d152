//! Conversions between outcomes and the standard `Result`/`Option` types.
//!
//! These adapters make it straightforward to adopt outcomes incrementally:
//! wrap existing fallible calls with [`attempt`], or flatten outcomes back
//! into `Result` when handing values to external APIs.
//!
//! # Examples
//!
//! ```
//! use outcome_rail::convert::attempt;
//! use outcome_rail::{Error, Outcome};
//!
//! let port = attempt(|| "8080".parse::<u16>());
//! assert_eq!(port.into_value(), Some(8080));
//!
//! let from_result: Outcome<u8> = Err::<u8, _>(Error::new("offline")).into();
//! let back: Result<u8, Error> = from_result.into();
//! assert_eq!(back.unwrap_err().message(), "offline");
//! ```

use std::error::Error as StdError;

mod iter;

pub use iter::OutcomeIterExt;

use crate::traits::ResultExt;
use crate::types::error::Error;
use crate::types::{OptionalOutcome, Outcome};

/// Runs a fallible closure and adapts its declared error type.
///
/// Only the `Err` values of `f` are converted; a panic inside `f` is not
/// intercepted.
#[inline]
pub fn attempt<T, E, F>(f: F) -> Outcome<T>
where
    E: StdError + 'static,
    F: FnOnce() -> Result<T, E>,
{
    f().into_outcome()
}

/// Runs a fallible lookup: `Ok(None)` becomes the empty optional outcome.
///
/// ```
/// use outcome_rail::convert::attempt_optional;
///
/// let env = attempt_optional(|| Ok::<_, std::io::Error>(None::<String>));
/// assert!(env.is_none());
/// ```
pub fn attempt_optional<T, E, F>(f: F) -> OptionalOutcome<T>
where
    E: StdError + 'static,
    F: FnOnce() -> Result<Option<T>, E>,
{
    match f() {
        Ok(value) => OptionalOutcome::from_option(value),
        Err(error) => OptionalOutcome::fail(Error::from_exception(&error)),
    }
}

impl<T> From<Result<T, Error>> for Outcome<T> {
    #[inline]
    fn from(result: Result<T, Error>) -> Self {
        match result {
            Ok(value) => Outcome::success(value),
            Err(error) => Outcome::fail(error),
        }
    }
}

impl<T> From<Outcome<T>> for Result<T, Error> {
    #[inline]
    fn from(outcome: Outcome<T>) -> Self {
        outcome.into_result()
    }
}

impl<T> From<Option<T>> for OptionalOutcome<T> {
    #[inline]
    fn from(value: Option<T>) -> Self {
        OptionalOutcome::from_option(value)
    }
}

impl<T> From<OptionalOutcome<T>> for Result<Option<T>, Error> {
    #[inline]
    fn from(outcome: OptionalOutcome<T>) -> Self {
        outcome.into_result()
    }
}

impl<T> From<Result<Option<T>, Error>> for OptionalOutcome<T> {
    #[inline]
    fn from(result: Result<Option<T>, Error>) -> Self {
        match result {
            Ok(value) => OptionalOutcome::from_option(value),
            Err(error) => OptionalOutcome::fail(error),
        }
    }
}

impl<T> From<Outcome<T>> for OptionalOutcome<T> {
    /// A failure keeps its error without being routed again.
    #[inline]
    fn from(outcome: Outcome<T>) -> Self {
        match outcome.into_result() {
            Ok(value) => OptionalOutcome::success(value),
            Err(error) => OptionalOutcome::failed(error),
        }
    }
}
