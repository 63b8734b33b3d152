//! Callback faults: panics raised by caller-supplied combinator functions.
//!
//! Combinators run their callbacks under [`catch`], which turns a panic into
//! an [`Error`] instead of letting it unwind through the chain. The payload
//! decides the classification:
//!
//! | payload                                   | resulting error                    |
//! |-------------------------------------------|------------------------------------|
//! | [`Cancelled`] (via [`cancel`])            | `OperationCancelled`               |
//! | [`Error`] (via [`raise`])                 | that error                         |
//! | `&str` / `String` (`panic!("...")`)       | `Panic` with the panic message     |
//! | `Box<dyn std::error::Error + Send + Sync>`| adapted with [`Error::from_dyn_exception`] |
//! | anything else                             | `Panic` with a generic message     |
//!
//! Panics raised outside a combinator callback are never intercepted.
//!
//! A `panic!` inside a callback still goes through the process panic hook,
//! which prints the usual `thread '…' panicked at …` report (and a backtrace
//! when `RUST_BACKTRACE` is set) before the panic is converted. [`raise`],
//! [`cancel`] and [`cancel_with`] unwind with `resume_unwind`, which skips
//! the hook, so they stay silent.
//!
//! # Examples
//!
//! ```
//! use outcome_rail::{fault, Outcome};
//!
//! let stopped: Outcome<u32> = Outcome::success(1).map(|_| fault::cancel());
//! assert!(stopped.error().is_cancellation());
//!
//! let panicked: Outcome<u32> = Outcome::success(1).map(|_| panic!("index out of range"));
//! assert_eq!(panicked.error().title(), "Panic");
//! assert_eq!(panicked.error().message(), "index out of range");
//! ```

use std::any::Any;
use std::borrow::Cow;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use crate::types::error::Error;

const NON_STRING_PAYLOAD: &str = "A callback panicked with a non-string payload.";

/// Panic payload signalling cooperative cancellation from inside a callback.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cancelled {
    reason: Option<Cow<'static, str>>,
}

impl Cancelled {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_reason(reason: impl Into<Cow<'static, str>>) -> Self {
        Self { reason: Some(reason.into()) }
    }

    #[inline]
    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }
}

impl fmt::Display for Cancelled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reason {
            Some(reason) => write!(f, "operation cancelled: {reason}"),
            None => f.write_str("operation cancelled"),
        }
    }
}

impl std::error::Error for Cancelled {}

/// Aborts the running callback with a cancellation signal.
pub fn cancel() -> ! {
    panic::resume_unwind(Box::new(Cancelled::new()))
}

/// Aborts the running callback with a cancellation signal and a reason.
pub fn cancel_with(reason: impl Into<Cow<'static, str>>) -> ! {
    panic::resume_unwind(Box::new(Cancelled::with_reason(reason)))
}

/// Aborts the running callback; the enclosing combinator fails with `error`.
///
/// ```
/// use outcome_rail::{fault, Error, Outcome};
///
/// let outcome: Outcome<i32> = Outcome::success(2).map(|_| fault::raise(Error::new("quota exceeded").with_code(429)));
/// assert_eq!(outcome.error().error_code(), Some(429));
/// ```
pub fn raise(error: Error) -> ! {
    panic::resume_unwind(Box::new(error))
}

/// Runs `f`, converting a panic into a classified [`Error`].
///
/// The panic hook is left in place: a `panic!` in `f` is still reported on
/// stderr. Use [`raise`] or [`cancel`] to fail a callback without that
/// report.
///
/// ```
/// use outcome_rail::{fault, Error};
///
/// let quiet = fault::catch(|| -> u8 { fault::raise(Error::new("no stock")) });
/// assert_eq!(quiet.unwrap_err().message(), "no stock");
/// ```
pub fn catch<R, F>(f: F) -> Result<R, Error>
where
    F: FnOnce() -> R,
{
    panic::catch_unwind(AssertUnwindSafe(f)).map_err(classify)
}

/// Converts a panic payload into an [`Error`].
pub fn classify(payload: Box<dyn Any + Send>) -> Error {
    let error = match payload.downcast::<Cancelled>() {
        Ok(cancelled) => Error::cancelled(cancelled.reason()),
        Err(payload) => match payload.downcast::<Error>() {
            Ok(error) => *error,
            Err(payload) => classify_panic(payload),
        },
    };
    rail_trace!(debug, title = error.title(), "callback fault converted to error");
    error
}

fn classify_panic(payload: Box<dyn Any + Send>) -> Error {
    let message: Cow<'static, str> = if let Some(message) = payload.downcast_ref::<&'static str>() {
        Cow::Borrowed(message)
    } else if let Some(message) = payload.downcast_ref::<String>() {
        Cow::Owned(message.clone())
    } else if let Some(source) =
        payload.downcast_ref::<Box<dyn std::error::Error + Send + Sync>>()
    {
        return Error::from_dyn_exception(source.as_ref());
    } else {
        Cow::Borrowed(NON_STRING_PAYLOAD)
    };

    Error::builder().title(Error::PANIC_TITLE).message(message).build()
}
