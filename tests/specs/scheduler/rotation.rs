//! Scheduler behavior through the public API.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use sv_core::{CancelToken, ScheduledTask, Scheduler};

fn counter_task(fire_at: Instant, counter: &Arc<AtomicUsize>) -> (ScheduledTask, CancelToken) {
    let cancel = CancelToken::new();
    let counter = Arc::clone(counter);
    let task = ScheduledTask::once(
        fire_at,
        cancel.clone(),
        Arc::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }),
    );
    (task, cancel)
}

#[tokio::test]
async fn a_submitted_task_runs_exactly_once() {
    let scheduler = Scheduler::spawn();
    let runs = Arc::new(AtomicUsize::new(0));
    let (task, _cancel) = counter_task(Instant::now(), &runs);

    scheduler.submit(task).await;
    tokio::time::sleep(Duration::from_millis(200)).await;

    assert_eq!(runs.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn a_cancelled_task_never_runs() {
    let scheduler = Scheduler::spawn();
    let runs = Arc::new(AtomicUsize::new(0));
    let (task, cancel) = counter_task(Instant::now() + Duration::from_millis(100), &runs);

    scheduler.submit(task).await;
    cancel.cancel();
    tokio::time::sleep(Duration::from_millis(300)).await;

    assert_eq!(runs.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn a_repeating_task_keeps_firing_until_cancelled() {
    let scheduler = Scheduler::spawn();
    let runs = Arc::new(AtomicUsize::new(0));
    let cancel = CancelToken::new();
    let counter = Arc::clone(&runs);
    let task = ScheduledTask::repeating(
        Instant::now(),
        Duration::from_millis(50),
        cancel.clone(),
        Arc::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }),
    );

    scheduler.submit(task).await;
    tokio::time::sleep(Duration::from_millis(400)).await;
    cancel.cancel();
    let at_cancel = runs.load(Ordering::SeqCst);
    assert!(at_cancel >= 2, "expected repeated runs, saw {at_cancel}");

    // One more interval may already be in flight; after that, silence.
    tokio::time::sleep(Duration::from_millis(300)).await;
    let settled = runs.load(Ordering::SeqCst);
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(runs.load(Ordering::SeqCst), settled);
}
