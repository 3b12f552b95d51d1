//! Integration tests for the suspending executor

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tryable::Try;

#[tokio::test(start_paused = true)]
async fn test_ready_on_third_poll() {
    let responses = Arc::new(Mutex::new(vec!["pending", "pending", "ready"].into_iter()));
    let calls = Arc::new(AtomicU32::new(0));

    let start = Instant::now();
    let outcome = Try::to_execute_async(|| {
        let responses = Arc::clone(&responses);
        let calls = Arc::clone(&calls);
        async move {
            calls.fetch_add(1, Ordering::SeqCst);
            responses.lock().await.next().unwrap_or("ready")
        }
    })
    .until(|status| *status == "ready")
    .with_interval(Duration::from_millis(10))
    .with_retries(3)
    .run_async_with_outcome()
    .await;

    assert_eq!(outcome.value, "ready");
    assert!(outcome.satisfied);
    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert!(start.elapsed() >= Duration::from_millis(20));
    assert!(start.elapsed() < Duration::from_millis(30));
}

#[tokio::test(start_paused = true)]
async fn test_exhaustion_pays_final_wait() {
    let calls = Arc::new(AtomicU32::new(0));

    let start = Instant::now();
    let value = Try::to_execute_async(|| {
        let calls = Arc::clone(&calls);
        async move {
            calls.fetch_add(1, Ordering::SeqCst);
            "x"
        }
    })
    .until(|_| false)
    .with_interval(Duration::from_millis(100))
    .with_retries(2)
    .run_async()
    .await;

    assert_eq!(value, "x");
    assert_eq!(calls.load(Ordering::SeqCst), 3);
    // Two waits, the last one after the final retry.
    assert!(start.elapsed() >= Duration::from_millis(200));
    assert!(start.elapsed() < Duration::from_millis(300));
}

#[tokio::test(start_paused = true)]
async fn test_zero_retries_never_waits() {
    let start = Instant::now();
    let value = Try::to_execute_async(|| async { None::<String> })
        .with_retries(0)
        .run_async()
        .await;

    assert_eq!(value, None);
    assert_eq!(start.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn test_first_success_never_waits() {
    let start = Instant::now();
    let value = Try::to_execute_async(|| async { vec![1, 2, 3] })
        .run_async()
        .await;

    assert_eq!(value, vec![1, 2, 3]);
    assert_eq!(start.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn test_err_on_second_invocation_stops_the_loop() {
    let calls = Arc::new(AtomicU32::new(0));

    let result: Result<Option<u8>, std::io::Error> = Try::to_try_execute_async(|| {
        let calls = Arc::clone(&calls);
        async move {
            match calls.fetch_add(1, Ordering::SeqCst) {
                1 => Err(std::io::Error::other("timed out")),
                _ => Ok(None),
            }
        }
    })
    .with_interval(Duration::from_millis(10))
    .with_retries(5)
    .try_run_async()
    .await;

    assert_eq!(result.unwrap_err().to_string(), "timed out");
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn test_invocations_never_overlap() {
    let in_flight = Arc::new(AtomicU32::new(0));
    let overlap_seen = Arc::new(AtomicU32::new(0));

    let outcome = Try::to_execute_async(|| {
        let in_flight = Arc::clone(&in_flight);
        let overlap_seen = Arc::clone(&overlap_seen);
        async move {
            if in_flight.fetch_add(1, Ordering::SeqCst) > 0 {
                overlap_seen.fetch_add(1, Ordering::SeqCst);
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
            in_flight.fetch_sub(1, Ordering::SeqCst);
            None::<()>
        }
    })
    .with_interval(Duration::from_millis(1))
    .with_retries(4)
    .run_async_with_outcome()
    .await;

    assert_eq!(outcome.invocations, 5);
    assert_eq!(overlap_seen.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_runs_on_spawned_task() {
    let handle = tokio::spawn(async {
        Try::to_execute_async(|| async { Some("spawned") })
            .with_interval(Duration::from_millis(1))
            .run_async()
            .await
    });

    assert_eq!(handle.await.unwrap(), Some("spawned"));
}
