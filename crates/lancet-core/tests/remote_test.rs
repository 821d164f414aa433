//! Timeout/retry policy tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use lancet_core::config::RemoteCallConfig;
use lancet_core::errors::{LancetError, RetrievalError};
use lancet_core::remote::RemotePolicy;

fn fast_config() -> RemoteCallConfig {
    RemoteCallConfig {
        call_timeout_ms: 25,
        store_attempts: 3,
        generation_attempts: 2,
        retry_base_delay_ms: 1,
    }
}

#[tokio::test]
async fn returns_first_success() {
    let policy = RemotePolicy::store(&fast_config());
    let calls = AtomicUsize::new(0);
    let result = policy
        .run("op", || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Ok::<_, LancetError>(42) }
        })
        .await;
    assert_eq!(result.unwrap(), 42);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn retries_until_budget_is_exhausted() {
    let policy = RemotePolicy::store(&fast_config());
    let calls = AtomicUsize::new(0);
    let result: Result<(), _> = policy
        .run("op", || {
            calls.fetch_add(1, Ordering::SeqCst);
            async {
                Err(RetrievalError::SearchFailed {
                    reason: "down".into(),
                }
                .into())
            }
        })
        .await;
    assert!(result.is_err());
    assert_eq!(calls.load(Ordering::SeqCst), 3, "store calls get 3 attempts");
}

#[tokio::test]
async fn recovers_on_a_later_attempt() {
    let policy = RemotePolicy::store(&fast_config());
    let calls = AtomicUsize::new(0);
    let result = policy
        .run("op", || {
            let attempt = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if attempt == 0 {
                    Err(RetrievalError::SearchFailed {
                        reason: "transient".into(),
                    }
                    .into())
                } else {
                    Ok(7)
                }
            }
        })
        .await;
    assert_eq!(result.unwrap(), 7);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn slow_calls_become_timeouts() {
    let policy = RemotePolicy::generation(&fast_config());
    let calls = AtomicUsize::new(0);
    let result: Result<(), _> = policy
        .run("slow_op", || {
            calls.fetch_add(1, Ordering::SeqCst);
            async {
                tokio::time::sleep(Duration::from_millis(200)).await;
                Ok(())
            }
        })
        .await;

    match result {
        Err(LancetError::Timeout { operation, .. }) => assert_eq!(operation, "slow_op"),
        other => panic!("expected timeout, got {other:?}"),
    }
    // Generation policy: one retry at most.
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}
