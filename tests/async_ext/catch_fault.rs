use outcome_rail::async_ext::{CatchFault, FutureFaultExt};
use outcome_rail::fault;
use outcome_rail::Error;

#[test]
fn catch_fault_is_send_and_sync_for_send_sync_futures() {
    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}

    assert_send::<CatchFault<std::future::Ready<u8>>>();
    assert_sync::<CatchFault<std::future::Ready<u8>>>();
}

#[tokio::test]
async fn ready_output_passes_through() {
    let output = async { "fine" }.catch_fault().await;

    assert_eq!(output.ok(), Some("fine"));
}

#[tokio::test]
async fn panic_after_an_await_becomes_an_error() {
    let output = async {
        tokio::task::yield_now().await;
        panic!("connection reset");
    }
    .catch_fault()
    .await;

    let error: Error = output.map(|()| ()).unwrap_err();
    assert_eq!(error.title(), "Panic");
    assert_eq!(error.message(), "connection reset");
}

#[tokio::test]
async fn cancellation_inside_a_future_is_classified() {
    let output = async { fault::cancel_with("shutdown") }.catch_fault().await;

    let error = output.unwrap_err();
    assert!(error.is_cancellation());
    assert_eq!(error.title(), "OperationCancelled");
}

#[tokio::test]
async fn raised_errors_keep_their_identity() {
    let raised = Error::new("raised in async").with_code(9);
    let expected = raised.clone();

    let output = async move { fault::raise(raised) }.catch_fault().await;

    assert!(output.unwrap_err().ptr_eq(&expected));
}
