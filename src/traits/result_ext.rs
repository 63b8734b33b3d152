//! Extension traits bridging `Result` and `Option` into outcomes.
//!
//! # Examples
//!
//! ```
//! use outcome_rail::traits::{OptionExt, ResultExt};
//!
//! let port = "80a".parse::<u16>().into_outcome();
//! assert_eq!(port.error().title(), "ParseIntError");
//!
//! let name = Some("ada").into_optional_outcome();
//! assert!(name.is_success());
//! ```

use std::error::Error as StdError;

use crate::types::error::{Error, ErrorBuilder};
use crate::types::{OptionalOutcome, Outcome};

/// Converts a `Result` with a standard error into an [`Outcome`].
pub trait ResultExt<T, E> {
    /// `Ok` becomes success; `Err` is adapted with [`Error::from_exception`]
    /// and routed through the global channel.
    fn into_outcome(self) -> Outcome<T>;

    /// Like [`into_outcome`](ResultExt::into_outcome), then lets `overrides`
    /// adjust the adapted error.
    fn into_outcome_with<F>(self, overrides: F) -> Outcome<T>
    where
        F: FnOnce(ErrorBuilder) -> ErrorBuilder;
}

impl<T, E> ResultExt<T, E> for Result<T, E>
where
    E: StdError + 'static,
{
    #[inline]
    fn into_outcome(self) -> Outcome<T> {
        match self {
            Ok(value) => Outcome::success(value),
            Err(error) => Outcome::fail(Error::from_exception(&error)),
        }
    }

    #[inline]
    fn into_outcome_with<F>(self, overrides: F) -> Outcome<T>
    where
        F: FnOnce(ErrorBuilder) -> ErrorBuilder,
    {
        match self {
            Ok(value) => Outcome::success(value),
            Err(error) => Outcome::fail(Error::from_exception_with(&error, overrides)),
        }
    }
}

/// Converts an `Option` into an outcome.
pub trait OptionExt<T> {
    /// `Some` becomes success, `None` the empty optional outcome.
    fn into_optional_outcome(self) -> OptionalOutcome<T>;

    /// `Some` becomes success, `None` a failure with `error`.
    fn into_outcome_or(self, error: impl Into<Error>) -> Outcome<T>;

    /// `Some` becomes success, `None` a failure built lazily by `error`.
    fn into_outcome_or_else<F>(self, error: F) -> Outcome<T>
    where
        F: FnOnce() -> Error;
}

impl<T> OptionExt<T> for Option<T> {
    #[inline]
    fn into_optional_outcome(self) -> OptionalOutcome<T> {
        OptionalOutcome::from_option(self)
    }

    #[inline]
    fn into_outcome_or(self, error: impl Into<Error>) -> Outcome<T> {
        match self {
            Some(value) => Outcome::success(value),
            None => Outcome::fail(error),
        }
    }

    #[inline]
    fn into_outcome_or_else<F>(self, error: F) -> Outcome<T>
    where
        F: FnOnce() -> Error,
    {
        Outcome::from_option(self, error)
    }
}
