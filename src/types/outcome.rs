use std::fmt;

use crate::fault;
use crate::notify::NotificationChannel;
use crate::traits::OutcomeKind;
use crate::types::error::Error;
use crate::types::invalid_state::{InvalidState, OutcomeState};

/// Success-or-failure outcome of an operation.
///
/// `Outcome<T>` either holds a success value of type `T` or a failing
/// [`Error`]. The default type parameter makes `Outcome` (written without
/// arguments) the valueless variant, constructed with [`Outcome::ok`].
///
/// Outcomes are immutable: every combinator consumes the receiver and returns
/// a new outcome. A default-constructed outcome reads as an implicit failure
/// carrying the process-wide default error.
///
/// # Examples
///
/// ```
/// use outcome_rail::Outcome;
///
/// fn divide(a: i32, b: i32) -> Outcome<i32> {
///     if b == 0 {
///         return Outcome::fail("divisor must not be zero");
///     }
///     Outcome::success(a / b)
/// }
///
/// let halved = divide(10, 2).map(|v| v * 10);
/// assert_eq!(halved.into_value(), Some(50));
///
/// let failed = divide(1, 0);
/// assert!(failed.is_fail());
/// assert!(failed.error().to_string().starts_with("Error: divisor must not be zero"));
/// ```
#[must_use]
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Outcome<T = ()> {
    state: State<T>,
}

#[derive(Clone, PartialEq, Eq, Hash)]
enum State<T> {
    Success(T),
    Fail(Error),
}

impl<T> Outcome<T> {
    /// Creates a successful outcome.
    #[inline]
    pub fn success(value: T) -> Self {
        Self { state: State::Success(value) }
    }

    /// Creates a failing outcome, routing the error through the global
    /// [`NotificationChannel`].
    ///
    /// # Examples
    ///
    /// ```
    /// use outcome_rail::{Error, Outcome};
    ///
    /// let outcome: Outcome<u8> = Outcome::fail(Error::new("disk full").with_code(28));
    /// assert_eq!(outcome.error().error_code(), Some(28));
    /// ```
    #[inline]
    pub fn fail(error: impl Into<Error>) -> Self {
        Self::fail_in(NotificationChannel::global(), error)
    }

    /// Creates a failing outcome, routing the error through `channel`.
    pub fn fail_in(channel: &NotificationChannel, error: impl Into<Error>) -> Self {
        Self { state: State::Fail(channel.notify(error.into())) }
    }

    /// Creates a failing outcome carrying the process-wide default error.
    #[inline]
    pub fn fail_default() -> Self {
        Self::fail(Error::default())
    }

    /// Moves an already routed error into a new outcome without notifying again.
    #[inline]
    pub(crate) fn failed(error: Error) -> Self {
        Self { state: State::Fail(error) }
    }

    /// Converts `Some` into success and `None` into a failure built by `missing`.
    pub fn from_option<F>(value: Option<T>, missing: F) -> Self
    where
        F: FnOnce() -> Error,
    {
        match value {
            Some(value) => Self::success(value),
            None => Self::fail(missing()),
        }
    }

    #[inline]
    pub fn state(&self) -> OutcomeState {
        match self.state {
            State::Success(_) => OutcomeState::Success,
            State::Fail(_) => OutcomeState::Fail,
        }
    }

    #[inline]
    pub fn is_success(&self) -> bool {
        matches!(self.state, State::Success(_))
    }

    #[inline]
    pub fn is_fail(&self) -> bool {
        !self.is_success()
    }

    /// Returns the success value, or [`InvalidState`] for a failure.
    #[inline]
    pub fn try_value(&self) -> Result<&T, InvalidState> {
        match &self.state {
            State::Success(value) => Ok(value),
            State::Fail(_) => Err(InvalidState::value(OutcomeState::Fail)),
        }
    }

    /// Returns the success value.
    ///
    /// # Panics
    ///
    /// Panics with an [`InvalidState`] message if the outcome failed.
    #[track_caller]
    pub fn value(&self) -> &T {
        match self.try_value() {
            Ok(value) => value,
            Err(invalid) => panic!("{invalid}"),
        }
    }

    /// Returns the error, or [`InvalidState`] for a success.
    #[inline]
    pub fn try_error(&self) -> Result<&Error, InvalidState> {
        match &self.state {
            State::Fail(error) => Ok(error),
            State::Success(_) => Err(InvalidState::error(OutcomeState::Success)),
        }
    }

    /// Returns the error.
    ///
    /// # Panics
    ///
    /// Panics with an [`InvalidState`] message if the outcome succeeded.
    #[track_caller]
    pub fn error(&self) -> &Error {
        match self.try_error() {
            Ok(error) => error,
            Err(invalid) => panic!("{invalid}"),
        }
    }

    #[inline]
    pub fn into_value(self) -> Option<T> {
        match self.state {
            State::Success(value) => Some(value),
            State::Fail(_) => None,
        }
    }

    #[inline]
    pub fn into_error(self) -> Option<Error> {
        match self.state {
            State::Success(_) => None,
            State::Fail(error) => Some(error),
        }
    }

    #[inline]
    pub fn into_result(self) -> Result<T, Error> {
        match self.state {
            State::Success(value) => Ok(value),
            State::Fail(error) => Err(error),
        }
    }

    /// Borrows the success value, keeping the error shared.
    #[inline]
    pub fn as_ref(&self) -> Outcome<&T> {
        match &self.state {
            State::Success(value) => Outcome::success(value),
            State::Fail(error) => Outcome::failed(error.clone()),
        }
    }

    /// Exhaustive visitor over both states.
    ///
    /// # Examples
    ///
    /// ```
    /// use outcome_rail::Outcome;
    ///
    /// let text = Outcome::success(3).match_with(|v| format!("got {v}"), |e| e.to_string());
    /// assert_eq!(text, "got 3");
    /// ```
    #[inline]
    pub fn match_with<R, S, F>(self, on_success: S, on_fail: F) -> R
    where
        S: FnOnce(T) -> R,
        F: FnOnce(Error) -> R,
    {
        match self.state {
            State::Success(value) => on_success(value),
            State::Fail(error) => on_fail(error),
        }
    }

    /// Replaces the success value with `f(value)`.
    ///
    /// A panic raised by `f` becomes a failing outcome.
    pub fn map<U, F>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> U,
    {
        match self.state {
            State::Success(value) => match fault::catch(|| f(value)) {
                Ok(mapped) => Outcome::success(mapped),
                Err(fault) => Outcome::fail(fault),
            },
            State::Fail(error) => Outcome::failed(error),
        }
    }

    /// Chains an operation that produces another outcome.
    ///
    /// `Outcome::success(v).flat_map(f)` equals `f(v)`; a failure propagates
    /// without calling `f`.
    ///
    /// # Examples
    ///
    /// ```
    /// use outcome_rail::Outcome;
    ///
    /// fn parse(input: &str) -> Outcome<i32> {
    ///     match input.parse() {
    ///         Ok(v) => Outcome::success(v),
    ///         Err(_) => Outcome::fail("not a number"),
    ///     }
    /// }
    ///
    /// assert_eq!(Outcome::success("21").flat_map(parse).map(|v| v * 2).into_value(), Some(42));
    /// assert!(Outcome::success("x").flat_map(parse).is_fail());
    /// ```
    pub fn flat_map<U, F>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> Outcome<U>,
    {
        self.cross_map(f)
    }

    /// Chains an operation producing any outcome kind, e.g. an
    /// [`OptionalOutcome`](crate::OptionalOutcome).
    pub fn cross_map<R, F>(self, f: F) -> R
    where
        R: OutcomeKind,
        F: FnOnce(T) -> R,
    {
        match self.state {
            State::Success(value) => fault::catch(|| f(value)).unwrap_or_else(R::from_error),
            State::Fail(error) => R::propagate(error),
        }
    }

    /// Replaces a failure with the outcome computed from its error.
    ///
    /// If `f` panics, the result fails with a composite of the original error
    /// and the fault.
    pub fn rescue<F>(self, f: F) -> Self
    where
        F: FnOnce(Error) -> Self,
    {
        match self.state {
            State::Success(value) => Self::success(value),
            State::Fail(error) => {
                let original = error.clone();
                fault::catch(|| f(error))
                    .unwrap_or_else(|fault| Self::fail(original.with_incidental(fault)))
            },
        }
    }

    /// Runs a side effect on success; the outcome is returned unchanged.
    ///
    /// A panic raised by `f` turns the outcome into a failure.
    pub fn on_success<F>(self, f: F) -> Self
    where
        F: FnOnce(&T),
    {
        match self.state {
            State::Success(value) => match fault::catch(|| f(&value)) {
                Ok(()) => Self::success(value),
                Err(fault) => Self::fail(fault),
            },
            State::Fail(error) => Self::failed(error),
        }
    }

    /// Runs a side effect on failure; the outcome is returned unchanged.
    ///
    /// A panic raised by `f` is combined with the existing error into a
    /// composite failure, the original error first.
    pub fn on_fail<F>(self, f: F) -> Self
    where
        F: FnOnce(&Error),
    {
        match self.state {
            State::Success(value) => Self::success(value),
            State::Fail(error) => match fault::catch(|| f(&error)) {
                Ok(()) => Self::failed(error),
                Err(fault) => Self::fail(error.with_incidental(fault)),
            },
        }
    }

    /// Demotes a success to a failure when `predicate` holds.
    ///
    /// # Examples
    ///
    /// ```
    /// use outcome_rail::{Error, Outcome};
    ///
    /// let age = Outcome::success(-3)
    ///     .to_fail_if(|v| *v < 0, |v| Error::new(format!("{v} is negative")));
    /// assert_eq!(age.error().message(), "-3 is negative");
    /// ```
    pub fn to_fail_if<P, E>(self, predicate: P, error: E) -> Self
    where
        P: FnOnce(&T) -> bool,
        E: FnOnce(&T) -> Error,
    {
        match self.state {
            State::Success(value) => {
                match fault::catch(|| predicate(&value).then(|| error(&value))) {
                    Ok(None) => Self::success(value),
                    Ok(Some(error)) => Self::fail(error),
                    Err(fault) => Self::fail(fault),
                }
            },
            State::Fail(error) => Self::failed(error),
        }
    }

    /// Replaces the error of a failure; a success passes through.
    pub fn with_error<F>(self, f: F) -> Self
    where
        F: FnOnce(Error) -> Error,
    {
        match self.state {
            State::Success(value) => Self::success(value),
            State::Fail(error) => {
                let original = error.clone();
                match fault::catch(|| f(error)) {
                    Ok(replaced) => Self::fail(replaced),
                    Err(fault) => Self::fail(original.with_incidental(fault)),
                }
            },
        }
    }

    /// Returns the success value or `fallback`.
    #[inline]
    pub fn get_value_or(self, fallback: T) -> T {
        match self.state {
            State::Success(value) => value,
            State::Fail(_) => fallback,
        }
    }

    /// Returns the success value or computes one from the error.
    #[inline]
    pub fn get_value_or_else<F>(self, f: F) -> T
    where
        F: FnOnce(Error) -> T,
    {
        match self.state {
            State::Success(value) => value,
            State::Fail(error) => f(error),
        }
    }
}

impl Outcome<()> {
    /// The successful valueless outcome.
    #[inline]
    pub fn ok() -> Self {
        Self::success(())
    }
}

impl<T> Default for Outcome<T> {
    /// An implicit failure carrying [`Error::default`].
    ///
    /// The notification channel is not consulted.
    fn default() -> Self {
        Self::failed(Error::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Outcome<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.state {
            State::Success(value) => f.debug_tuple("Success").field(value).finish(),
            State::Fail(error) => f.debug_tuple("Fail").field(error).finish(),
        }
    }
}

impl<T> OutcomeKind for Outcome<T> {
    #[inline]
    fn from_error(error: Error) -> Self {
        Self::fail(error)
    }

    #[inline]
    fn from_absence() -> Self {
        Self::fail(Error::no_value())
    }

    #[inline]
    fn propagate(error: Error) -> Self {
        Self::failed(error)
    }
}
