//! Async counterparts of `map`, `flat_map` and `rescue`.
//!
//! The callback itself and the future it returns are both guarded: a panic
//! in either place is handled exactly like a panic in a synchronous
//! callback.

use std::future::Future;

use super::future_ext::FutureFaultExt;
use crate::fault;
use crate::types::error::Error;
use crate::types::{OptionalOutcome, Outcome};

/// Runs `f(input)` and awaits the returned future, classifying panics from
/// either step.
async fn guarded<I, R, F, Fut>(input: I, f: F) -> Result<R, Error>
where
    F: FnOnce(I) -> Fut,
    Fut: Future<Output = R>,
{
    let future = fault::catch(|| f(input))?;
    future.catch_fault().await
}

impl<T> Outcome<T> {
    /// Replaces the success value with the output of an async function.
    ///
    /// # Examples
    ///
    /// ```
    /// use outcome_rail::Outcome;
    ///
    /// # tokio::runtime::Runtime::new().unwrap().block_on(async {
    /// let doubled = Outcome::success(21).map_async(|v| async move { v * 2 }).await;
    /// assert_eq!(doubled.into_value(), Some(42));
    /// # });
    /// ```
    pub async fn map_async<U, F, Fut>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> Fut,
        Fut: Future<Output = U>,
    {
        match self.into_result() {
            Ok(value) => match guarded(value, f).await {
                Ok(mapped) => Outcome::success(mapped),
                Err(fault) => Outcome::fail(fault),
            },
            Err(error) => Outcome::failed(error),
        }
    }

    /// Chains an async operation producing another outcome.
    pub async fn flat_map_async<U, F, Fut>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> Fut,
        Fut: Future<Output = Outcome<U>>,
    {
        match self.into_result() {
            Ok(value) => guarded(value, f).await.unwrap_or_else(Outcome::fail),
            Err(error) => Outcome::failed(error),
        }
    }

    /// Replaces a failure with the outcome of an async recovery.
    pub async fn rescue_async<F, Fut>(self, f: F) -> Outcome<T>
    where
        F: FnOnce(Error) -> Fut,
        Fut: Future<Output = Outcome<T>>,
    {
        match self.into_result() {
            Ok(value) => Outcome::success(value),
            Err(error) => {
                let original = error.clone();
                guarded(error, f)
                    .await
                    .unwrap_or_else(|fault| Outcome::fail(original.with_incidental(fault)))
            },
        }
    }
}

impl<T> OptionalOutcome<T> {
    pub async fn map_async<U, F, Fut>(self, f: F) -> OptionalOutcome<U>
    where
        F: FnOnce(T) -> Fut,
        Fut: Future<Output = U>,
    {
        match self.into_result() {
            Ok(Some(value)) => match guarded(value, f).await {
                Ok(mapped) => OptionalOutcome::success(mapped),
                Err(fault) => OptionalOutcome::fail(fault),
            },
            Ok(None) => OptionalOutcome::none(),
            Err(error) => OptionalOutcome::failed(error),
        }
    }

    pub async fn flat_map_async<U, F, Fut>(self, f: F) -> OptionalOutcome<U>
    where
        F: FnOnce(T) -> Fut,
        Fut: Future<Output = OptionalOutcome<U>>,
    {
        match self.into_result() {
            Ok(Some(value)) => guarded(value, f).await.unwrap_or_else(OptionalOutcome::fail),
            Ok(None) => OptionalOutcome::none(),
            Err(error) => OptionalOutcome::failed(error),
        }
    }

    /// Replaces a failure with the outcome of an async recovery; `None`
    /// passes through.
    pub async fn rescue_async<F, Fut>(self, f: F) -> OptionalOutcome<T>
    where
        F: FnOnce(Error) -> Fut,
        Fut: Future<Output = OptionalOutcome<T>>,
    {
        match self.into_result() {
            Ok(Some(value)) => OptionalOutcome::success(value),
            Ok(None) => OptionalOutcome::none(),
            Err(error) => {
                let original = error.clone();
                guarded(error, f)
                    .await
                    .unwrap_or_else(|fault| OptionalOutcome::fail(original.with_incidental(fault)))
            },
        }
    }
}
