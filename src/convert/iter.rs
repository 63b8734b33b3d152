use crate::types::{OptionalOutcome, Outcome};

/// Collects successes; the first failure stops iteration and becomes the result.
///
/// ```
/// use outcome_rail::Outcome;
///
/// let all: Outcome<Vec<i32>> = vec![Outcome::success(1), Outcome::success(2)].into_iter().collect();
/// assert_eq!(all.into_value(), Some(vec![1, 2]));
/// ```
impl<T, C> FromIterator<Outcome<T>> for Outcome<C>
where
    C: FromIterator<T>,
{
    fn from_iter<I: IntoIterator<Item = Outcome<T>>>(iter: I) -> Self {
        let mut failure = None;
        let collected: C = iter
            .into_iter()
            .map_while(|outcome| match outcome.into_result() {
                Ok(value) => Some(value),
                Err(error) => {
                    failure = Some(error);
                    None
                },
            })
            .collect();

        match failure {
            Some(error) => Outcome::failed(error),
            None => Outcome::success(collected),
        }
    }
}

/// Collects successes; the first `None` or `Fail` stops iteration and
/// becomes the result.
impl<T, C> FromIterator<OptionalOutcome<T>> for OptionalOutcome<C>
where
    C: FromIterator<T>,
{
    fn from_iter<I: IntoIterator<Item = OptionalOutcome<T>>>(iter: I) -> Self {
        let mut stop: Option<OptionalOutcome<C>> = None;
        let collected: C = iter
            .into_iter()
            .map_while(|outcome| match outcome.into_result() {
                Ok(Some(value)) => Some(value),
                Ok(None) => {
                    stop = Some(OptionalOutcome::none());
                    None
                },
                Err(error) => {
                    stop = Some(OptionalOutcome::failed(error));
                    None
                },
            })
            .collect();

        stop.unwrap_or_else(|| OptionalOutcome::success(collected))
    }
}

/// Chains outcome-producing steps over an iterator.
///
/// Each step runs like a `flat_map` continuation: a panic inside it becomes a
/// failure, and the first failure ends the iteration.
///
/// # Examples
///
/// ```
/// use outcome_rail::convert::OutcomeIterExt;
/// use outcome_rail::Outcome;
///
/// let total = [1, 2, 3].into_iter().fold_outcome(0, |sum, v| Outcome::success(sum + v));
/// assert_eq!(total.into_value(), Some(6));
///
/// let mut seen = Vec::new();
/// let stopped = [1, 2, 3].into_iter().try_each(|v| {
///     seen.push(v);
///     if v == 2 { Outcome::fail("two is not allowed") } else { Outcome::ok() }
/// });
/// assert!(stopped.is_fail());
/// assert_eq!(seen, [1, 2]);
/// ```
pub trait OutcomeIterExt: Iterator + Sized {
    /// Folds with an outcome-producing step, stopping at the first failure.
    fn fold_outcome<A, F>(self, init: A, mut step: F) -> Outcome<A>
    where
        F: FnMut(A, Self::Item) -> Outcome<A>,
    {
        let mut acc = Outcome::success(init);
        for item in self {
            acc = acc.flat_map(|value| step(value, item));
            if acc.is_fail() {
                break;
            }
        }
        acc
    }

    /// Runs `step` for every item, stopping at the first failure.
    fn try_each<F>(self, mut step: F) -> Outcome
    where
        F: FnMut(Self::Item) -> Outcome,
    {
        self.fold_outcome((), |(), item| step(item))
    }
}

impl<I: Iterator> OutcomeIterExt for I {}
