use std::fmt;

use crate::fault;
use crate::notify::NotificationChannel;
use crate::traits::OutcomeKind;
use crate::types::error::Error;
use crate::types::invalid_state::{InvalidState, OutcomeState};

/// Three-state outcome: a value, legitimate absence, or failure.
///
/// `None` is not an error. It propagates through value combinators like a
/// failure does, but it never carries a stored error and never reaches the
/// notification channel. [`error_or_no_value`](Self::error_or_no_value)
/// exposes a "no value" error on demand.
///
/// # Examples
///
/// ```
/// use outcome_rail::OptionalOutcome;
///
/// fn find_user(id: u32) -> OptionalOutcome<String> {
///     match id {
///         0 => OptionalOutcome::fail("user store offline"),
///         1 => OptionalOutcome::success("ada".to_owned()),
///         _ => OptionalOutcome::none(),
///     }
/// }
///
/// assert_eq!(find_user(1).map(|name| name.len()).into_value(), Some(3));
/// assert!(find_user(7).is_none());
/// assert_eq!(find_user(7).get_value_or("guest".into()), "guest");
/// assert!(find_user(0).is_fail());
/// ```
#[must_use]
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct OptionalOutcome<T> {
    state: State<T>,
}

#[derive(Clone, PartialEq, Eq, Hash)]
enum State<T> {
    Success(T),
    None,
    Fail(Error),
}

impl<T> OptionalOutcome<T> {
    #[inline]
    pub fn success(value: T) -> Self {
        Self { state: State::Success(value) }
    }

    /// The legitimately empty outcome.
    #[inline]
    pub fn none() -> Self {
        Self { state: State::None }
    }

    /// Creates a failing outcome through the global [`NotificationChannel`].
    #[inline]
    pub fn fail(error: impl Into<Error>) -> Self {
        Self::fail_in(NotificationChannel::global(), error)
    }

    pub fn fail_in(channel: &NotificationChannel, error: impl Into<Error>) -> Self {
        Self { state: State::Fail(channel.notify(error.into())) }
    }

    #[inline]
    pub fn fail_default() -> Self {
        Self::fail(Error::default())
    }

    #[inline]
    pub(crate) fn failed(error: Error) -> Self {
        Self { state: State::Fail(error) }
    }

    /// `Some` becomes success, `None` becomes the empty outcome.
    #[inline]
    pub fn from_option(value: Option<T>) -> Self {
        match value {
            Some(value) => Self::success(value),
            None => Self::none(),
        }
    }

    #[inline]
    pub fn state(&self) -> OutcomeState {
        match self.state {
            State::Success(_) => OutcomeState::Success,
            State::None => OutcomeState::None,
            State::Fail(_) => OutcomeState::Fail,
        }
    }

    #[inline]
    pub fn is_success(&self) -> bool {
        matches!(self.state, State::Success(_))
    }

    #[inline]
    pub fn is_none(&self) -> bool {
        matches!(self.state, State::None)
    }

    #[inline]
    pub fn is_fail(&self) -> bool {
        matches!(self.state, State::Fail(_))
    }

    pub fn try_value(&self) -> Result<&T, InvalidState> {
        match &self.state {
            State::Success(value) => Ok(value),
            _ => Err(InvalidState::value(self.state())),
        }
    }

    /// # Panics
    ///
    /// Panics with an [`InvalidState`] message unless the outcome succeeded.
    #[track_caller]
    pub fn value(&self) -> &T {
        match self.try_value() {
            Ok(value) => value,
            Err(invalid) => panic!("{invalid}"),
        }
    }

    /// The stored error. `None` has no stored error and reports
    /// [`InvalidState`] like `Success` does.
    pub fn try_error(&self) -> Result<&Error, InvalidState> {
        match &self.state {
            State::Fail(error) => Ok(error),
            _ => Err(InvalidState::error(self.state())),
        }
    }

    /// # Panics
    ///
    /// Panics with an [`InvalidState`] message unless the outcome failed.
    #[track_caller]
    pub fn error(&self) -> &Error {
        match self.try_error() {
            Ok(error) => error,
            Err(invalid) => panic!("{invalid}"),
        }
    }

    /// The stored error for `Fail`, a fresh "no value" error for `None`.
    ///
    /// The "no value" error is not routed through the notification channel.
    pub fn error_or_no_value(&self) -> Option<Error> {
        match &self.state {
            State::Success(_) => None,
            State::None => Some(Error::no_value()),
            State::Fail(error) => Some(error.clone()),
        }
    }

    #[inline]
    pub fn into_value(self) -> Option<T> {
        match self.state {
            State::Success(value) => Some(value),
            _ => None,
        }
    }

    #[inline]
    pub fn into_error(self) -> Option<Error> {
        match self.state {
            State::Fail(error) => Some(error),
            _ => None,
        }
    }

    /// `Success(v)` → `Ok(Some(v))`, `None` → `Ok(None)`, `Fail(e)` → `Err(e)`.
    #[inline]
    pub fn into_result(self) -> Result<Option<T>, Error> {
        match self.state {
            State::Success(value) => Ok(Some(value)),
            State::None => Ok(None),
            State::Fail(error) => Err(error),
        }
    }

    #[inline]
    pub fn as_ref(&self) -> OptionalOutcome<&T> {
        match &self.state {
            State::Success(value) => OptionalOutcome::success(value),
            State::None => OptionalOutcome::none(),
            State::Fail(error) => OptionalOutcome::failed(error.clone()),
        }
    }

    #[inline]
    pub fn match_with<R, S, N, F>(self, on_success: S, on_none: N, on_fail: F) -> R
    where
        S: FnOnce(T) -> R,
        N: FnOnce() -> R,
        F: FnOnce(Error) -> R,
    {
        match self.state {
            State::Success(value) => on_success(value),
            State::None => on_none(),
            State::Fail(error) => on_fail(error),
        }
    }

    pub fn map<U, F>(self, f: F) -> OptionalOutcome<U>
    where
        F: FnOnce(T) -> U,
    {
        match self.state {
            State::Success(value) => match fault::catch(|| f(value)) {
                Ok(mapped) => OptionalOutcome::success(mapped),
                Err(fault) => OptionalOutcome::fail(fault),
            },
            State::None => OptionalOutcome::none(),
            State::Fail(error) => OptionalOutcome::failed(error),
        }
    }

    /// Chains an operation producing another optional outcome.
    ///
    /// `None` and `Fail` propagate without calling `f`.
    pub fn flat_map<U, F>(self, f: F) -> OptionalOutcome<U>
    where
        F: FnOnce(T) -> OptionalOutcome<U>,
    {
        self.cross_map(f)
    }

    /// Chains into any outcome kind; `None` becomes `R::from_absence()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use outcome_rail::{OptionalOutcome, Outcome};
    ///
    /// let absent: Outcome<u8> = OptionalOutcome::<u8>::none().cross_map(Outcome::success);
    /// assert!(absent.error().is_no_value());
    /// ```
    pub fn cross_map<R, F>(self, f: F) -> R
    where
        R: OutcomeKind,
        F: FnOnce(T) -> R,
    {
        match self.state {
            State::Success(value) => fault::catch(|| f(value)).unwrap_or_else(R::from_error),
            State::None => R::from_absence(),
            State::Fail(error) => R::propagate(error),
        }
    }

    /// Replaces a failure with the outcome computed from its error.
    /// `None` passes through; see [`rescue_none`](Self::rescue_none).
    pub fn rescue<F>(self, f: F) -> Self
    where
        F: FnOnce(Error) -> Self,
    {
        match self.state {
            State::Fail(error) => {
                let original = error.clone();
                fault::catch(|| f(error))
                    .unwrap_or_else(|fault| Self::fail(original.with_incidental(fault)))
            },
            state => Self { state },
        }
    }

    /// Replaces an absent outcome with the one computed by `f`.
    pub fn rescue_none<F>(self, f: F) -> Self
    where
        F: FnOnce() -> Self,
    {
        match self.state {
            State::None => fault::catch(f).unwrap_or_else(Self::fail),
            state => Self { state },
        }
    }

    pub fn on_success<F>(self, f: F) -> Self
    where
        F: FnOnce(&T),
    {
        match self.state {
            State::Success(value) => match fault::catch(|| f(&value)) {
                Ok(()) => Self::success(value),
                Err(fault) => Self::fail(fault),
            },
            state => Self { state },
        }
    }

    pub fn on_none<F>(self, f: F) -> Self
    where
        F: FnOnce(),
    {
        match self.state {
            State::None => match fault::catch(f) {
                Ok(()) => Self::none(),
                Err(fault) => Self::fail(fault),
            },
            state => Self { state },
        }
    }

    /// Runs a side effect on failure. A panic raised by `f` is composited with
    /// the existing error, the original first.
    pub fn on_fail<F>(self, f: F) -> Self
    where
        F: FnOnce(&Error),
    {
        match self.state {
            State::Fail(error) => match fault::catch(|| f(&error)) {
                Ok(()) => Self::failed(error),
                Err(fault) => Self::fail(error.with_incidental(fault)),
            },
            state => Self { state },
        }
    }

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
            state => Self { state },
        }
    }

    /// Demotes a success to `None` when `predicate` holds.
    pub fn to_none_if<P>(self, predicate: P) -> Self
    where
        P: FnOnce(&T) -> bool,
    {
        match self.state {
            State::Success(value) => match fault::catch(|| predicate(&value)) {
                Ok(true) => Self::none(),
                Ok(false) => Self::success(value),
                Err(fault) => Self::fail(fault),
            },
            state => Self { state },
        }
    }

    /// Keeps a success only when `predicate` holds, otherwise yields `None`.
    ///
    /// ```
    /// use outcome_rail::OptionalOutcome;
    ///
    /// assert!(OptionalOutcome::success(3).filter(|v| v % 2 == 0).is_none());
    /// assert!(OptionalOutcome::success(4).filter(|v| v % 2 == 0).is_success());
    /// ```
    #[inline]
    pub fn filter<P>(self, predicate: P) -> Self
    where
        P: FnOnce(&T) -> bool,
    {
        self.to_none_if(|value| !predicate(value))
    }

    pub fn with_error<F>(self, f: F) -> Self
    where
        F: FnOnce(Error) -> Error,
    {
        match self.state {
            State::Fail(error) => {
                let original = error.clone();
                match fault::catch(|| f(error)) {
                    Ok(replaced) => Self::fail(replaced),
                    Err(fault) => Self::fail(original.with_incidental(fault)),
                }
            },
            state => Self { state },
        }
    }

    #[inline]
    pub fn get_value_or(self, fallback: T) -> T {
        match self.state {
            State::Success(value) => value,
            _ => fallback,
        }
    }

    #[inline]
    pub fn get_value_or_else<F>(self, f: F) -> T
    where
        F: FnOnce() -> T,
    {
        match self.state {
            State::Success(value) => value,
            _ => f(),
        }
    }
}

impl<T> Default for OptionalOutcome<T> {
    /// An implicit failure carrying [`Error::default`], without notification.
    fn default() -> Self {
        Self::failed(Error::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for OptionalOutcome<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.state {
            State::Success(value) => f.debug_tuple("Success").field(value).finish(),
            State::None => f.write_str("None"),
            State::Fail(error) => f.debug_tuple("Fail").field(error).finish(),
        }
    }
}

impl<T> OutcomeKind for OptionalOutcome<T> {
    #[inline]
    fn from_error(error: Error) -> Self {
        Self::fail(error)
    }

    #[inline]
    fn from_absence() -> Self {
        Self::none()
    }

    #[inline]
    fn propagate(error: Error) -> Self {
        Self::failed(error)
    }
}
