use crate::types::error::Error;

/// Common constructor surface of [`Outcome`](crate::Outcome) and
/// [`OptionalOutcome`](crate::OptionalOutcome).
///
/// Lets combinators such as `cross_map` and macros such as
/// [`fail!`](crate::fail) produce whichever outcome kind the caller expects.
///
/// # Examples
///
/// ```
/// use outcome_rail::{Error, OptionalOutcome, Outcome, OutcomeKind};
///
/// fn rejected<R: OutcomeKind>() -> R {
///     R::from_error(Error::new("rejected"))
/// }
///
/// let a: Outcome<u8> = rejected();
/// let b: OptionalOutcome<u8> = rejected();
/// assert!(a.is_fail() && b.is_fail());
/// ```
pub trait OutcomeKind: Sized {
    /// The failing state, routed through the global notification channel.
    fn from_error(error: Error) -> Self;

    /// The state representing a missing value: `None` where the kind has
    /// one, otherwise a failure carrying [`Error::no_value`].
    fn from_absence() -> Self;

    /// Moves an error that already went through the channel.
    #[doc(hidden)]
    fn propagate(error: Error) -> Self;
}
