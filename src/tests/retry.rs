use std::sync::atomic::{AtomicU32, Ordering};

use crate::resilience::retry::RetrySettings;

fn settings(attempts: u32, base_delay_ms: u64, max_delay_ms: u64) -> RetrySettings {
    RetrySettings {
        attempts,
        base_delay_ms,
        max_delay_ms,
    }
}

#[test]
fn backoff_doubles_up_to_the_cap() {
    let retry = settings(5, 200, 1000);
    assert_eq!(retry.next_delay(200), 400);
    assert_eq!(retry.next_delay(400), 800);
    assert_eq!(retry.next_delay(800), 1000);
    assert_eq!(retry.next_delay(1000), 1000);
}

#[test]
fn backoff_saturates_near_the_top_of_the_range() {
    let retry = settings(5, u64::MAX / 2 + 1, u64::MAX);
    assert_eq!(retry.next_delay(u64::MAX / 2 + 1), u64::MAX);
    assert_eq!(retry.next_delay(u64::MAX), u64::MAX);
}

#[tokio::test]
async fn non_retryable_errors_stop_immediately() {
    let counter = AtomicU32::new(0);
    let calls = &counter;
    let result: Result<(), String> = settings(3, 1, 1)
        .run_with_retry(
            move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err("fatal".to_owned())
            },
            |e: &String| e != "fatal",
        )
        .await;

    assert_eq!(result.unwrap_err(), "fatal");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn retryable_errors_use_every_attempt() {
    let counter = AtomicU32::new(0);
    let calls = &counter;
    let result: Result<u32, String> = settings(4, 1, 2)
        .run_with_retry(
            move || async move {
                let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
                if n < 4 { Err(format!("attempt {n}")) } else { Ok(n) }
            },
            |_| true,
        )
        .await;

    assert_eq!(result.unwrap(), 4);
    assert_eq!(calls.load(Ordering::SeqCst), 4);
}
