use quill_interface::CancellationToken;
use std::time::Duration;

#[tokio::test]
async fn test_run_until_cancelled_completes_when_not_cancelled() {
    let token = CancellationToken::new();
    let output = token.run_until_cancelled(async { 42 }).await;
    assert_eq!(output, Some(42));
}

#[tokio::test]
async fn test_run_until_cancelled_drops_in_flight_future() {
    let token = CancellationToken::new();
    let canceller = token.clone();

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        canceller.cancel();
    });

    let output = token
        .run_until_cancelled(std::future::pending::<u32>())
        .await;
    assert_eq!(output, None);
}

#[tokio::test]
async fn test_already_cancelled_token_short_circuits() {
    let token = CancellationToken::new();
    token.cancel();
    token.cancel();

    assert!(token.is_cancelled());
    assert_eq!(token.run_until_cancelled(async { 1 }).await, None);
    token.cancelled().await;
}

#[test]
fn test_check_reports_step() {
    let token = CancellationToken::default();
    token.cancel();
    let err = token.check("Saving sequel").unwrap_err();
    assert!(err.kind.to_string().contains("Saving sequel"));
}
