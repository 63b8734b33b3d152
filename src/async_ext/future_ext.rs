//! Extension trait adding [`catch_fault`](FutureFaultExt::catch_fault) to
//! every future.

use std::future::Future;

use super::catch_fault::CatchFault;

/// Extension trait for guarding futures against panics.
///
/// # Examples
///
/// ```
/// use outcome_rail::async_ext::FutureFaultExt;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let fine = async { 21 * 2 }.catch_fault().await;
/// assert_eq!(fine.ok(), Some(42));
///
/// let broken = async { panic!("socket closed") }.catch_fault().await;
/// let error: outcome_rail::Error = broken.err().unwrap();
/// assert_eq!(error.message(), "socket closed");
/// # });
/// ```
pub trait FutureFaultExt: Future + Sized {
    /// Resolves to `Err(Error)` if polling the future panics.
    #[inline]
    fn catch_fault(self) -> CatchFault<Self> {
        CatchFault::new(self)
    }
}

impl<F: Future> FutureFaultExt for F {}
