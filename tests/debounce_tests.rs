use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use foodgrid::debounce::Debouncer;
use futures::future::BoxFuture;
use tokio::sync::Mutex;

mod test_helpers {
    use super::*;

    /// Debouncer that counts runs and remembers every value it ran with.
    pub fn recording_debouncer(
        delay_ms: u64,
    ) -> (Debouncer<String>, Arc<AtomicUsize>, Arc<Mutex<Vec<String>>>) {
        let runs = Arc::new(AtomicUsize::new(0));
        let seen = Arc::new(Mutex::new(Vec::new()));

        let (runs_clone, seen_clone) = (runs.clone(), seen.clone());
        let debouncer = Debouncer::new(Duration::from_millis(delay_ms), move |value: String| {
            let runs = runs_clone.clone();
            let seen = seen_clone.clone();
            Box::pin(async move {
                runs.fetch_add(1, Ordering::SeqCst);
                seen.lock().await.push(value);
            }) as BoxFuture<'static, ()>
        });
        (debouncer, runs, seen)
    }

    pub async fn advance(ms: u64) {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }
}

use test_helpers::*;

#[tokio::test(start_paused = true)]
async fn test_burst_runs_once_with_last_value() {
    let (debouncer, runs, seen) = recording_debouncer(500);

    for term in ["p", "pi", "piz", "pizz", "pizza"] {
        debouncer.schedule(term.to_string());
        advance(100).await;
    }
    assert_eq!(runs.load(Ordering::SeqCst), 0);

    advance(600).await;
    assert_eq!(runs.load(Ordering::SeqCst), 1);
    assert_eq!(*seen.lock().await, vec!["pizza".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn test_does_not_fire_before_quiet_window() {
    let (debouncer, runs, _) = recording_debouncer(500);

    debouncer.schedule("burger".to_string());
    advance(499).await;
    assert_eq!(runs.load(Ordering::SeqCst), 0);
    assert!(debouncer.is_pending());

    advance(2).await;
    assert_eq!(runs.load(Ordering::SeqCst), 1);
    assert!(!debouncer.is_pending());
}

#[tokio::test(start_paused = true)]
async fn test_separate_quiet_windows_each_fire() {
    let (debouncer, runs, seen) = recording_debouncer(500);

    debouncer.schedule("kfc".to_string());
    advance(600).await;
    debouncer.schedule("subway".to_string());
    advance(600).await;

    assert_eq!(runs.load(Ordering::SeqCst), 2);
    assert_eq!(*seen.lock().await, vec!["kfc".to_string(), "subway".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn test_cancel_drops_pending_run() {
    let (debouncer, runs, _) = recording_debouncer(500);

    debouncer.schedule("dosa".to_string());
    advance(200).await;
    debouncer.cancel();
    advance(1_000).await;

    assert_eq!(runs.load(Ordering::SeqCst), 0);
    assert!(!debouncer.is_pending());
}

#[tokio::test(start_paused = true)]
async fn test_drop_aborts_pending_run() {
    let (debouncer, runs, _) = recording_debouncer(500);

    debouncer.schedule("idli".to_string());
    drop(debouncer);
    advance(1_000).await;

    assert_eq!(runs.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn test_pending_until_action_finishes() {
    let gate = Arc::new(Mutex::new(()));
    let held = gate.clone().lock_owned().await;

    let runs = Arc::new(AtomicUsize::new(0));
    let (gate_clone, runs_clone) = (gate.clone(), runs.clone());
    let debouncer = Debouncer::new(Duration::from_millis(500), move |_: String| {
        let gate = gate_clone.clone();
        let runs = runs_clone.clone();
        Box::pin(async move {
            let _guard = gate.lock().await;
            runs.fetch_add(1, Ordering::SeqCst);
        }) as BoxFuture<'static, ()>
    });

    debouncer.schedule("thali".to_string());
    advance(600).await;
    // Timer has fired but the action is blocked on the gate.
    assert!(debouncer.is_pending());
    assert_eq!(runs.load(Ordering::SeqCst), 0);

    drop(held);
    advance(10).await;
    assert_eq!(runs.load(Ordering::SeqCst), 1);
    assert!(!debouncer.is_pending());
}
