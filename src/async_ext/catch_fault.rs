//! Future wrapper converting panics raised while polling into [`Error`]s.

use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use std::pin::Pin;
use std::task::{Context, Poll};

use futures_core::future::FusedFuture;
use pin_project_lite::pin_project;

use crate::fault;
use crate::types::error::Error;

pin_project! {
    /// A future that resolves to `Err(Error)` instead of unwinding when the
    /// inner future panics.
    ///
    /// The panic payload is classified the same way combinator callbacks
    /// are: cancellation, raised errors and plain panics each get their own
    /// error. After a fault the inner future is never polled again.
    ///
    /// # Cancel Safety
    ///
    /// `CatchFault` is cancel-safe if the inner future is cancel-safe.
    #[must_use = "futures do nothing unless polled"]
    pub struct CatchFault<Fut> {
        #[pin]
        future: Fut,
        done: bool,
    }
}

impl<Fut> CatchFault<Fut> {
    #[inline]
    pub fn new(future: Fut) -> Self {
        Self { future, done: false }
    }
}

impl<Fut: Future> Future for CatchFault<Fut> {
    type Output = Result<Fut::Output, Error>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();
        if *this.done {
            return Poll::Pending;
        }

        let future = this.future;
        match panic::catch_unwind(AssertUnwindSafe(|| future.poll(cx))) {
            Ok(Poll::Pending) => Poll::Pending,
            Ok(Poll::Ready(output)) => {
                *this.done = true;
                Poll::Ready(Ok(output))
            },
            Err(payload) => {
                *this.done = true;
                Poll::Ready(Err(fault::classify(payload)))
            },
        }
    }
}

impl<Fut: Future> FusedFuture for CatchFault<Fut> {
    fn is_terminated(&self) -> bool {
        self.done
    }
}
