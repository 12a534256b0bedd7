// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scheduler control loop
//!
//! One spawned loop exclusively owns the [`TaskQueue`]; submissions cross
//! into it through a bounded channel, and each due task is dispatched onto
//! its own execution so a slow task never delays the loop or other tasks.

use crate::queue::{ScheduledTask, TaskQueue};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Cap on buffered submissions; a full buffer blocks submitters. This is
/// the sole backpressure mechanism.
const SUBMIT_BUFFER: usize = 100;

/// Wait ceiling for the control loop when the queue is empty.
const IDLE_CEILING: Duration = Duration::from_secs(24 * 60 * 60);

/// Handle to a running scheduler loop.
#[derive(Clone)]
pub struct Scheduler {
    submit_tx: mpsc::Sender<ScheduledTask>,
    stop_tx: mpsc::Sender<()>,
}

impl Scheduler {
    /// Start the control loop on the current tokio runtime.
    pub fn spawn() -> Self {
        let (submit_tx, submit_rx) = mpsc::channel(SUBMIT_BUFFER);
        let (stop_tx, stop_rx) = mpsc::channel(1);
        let resubmit_tx = submit_tx.clone();
        tokio::spawn(control_loop(submit_rx, stop_rx, resubmit_tx));
        Self { submit_tx, stop_tx }
    }

    /// Enqueue a task for future dispatch.
    ///
    /// Completes immediately unless the submission buffer is full, in which
    /// case the caller waits for the control loop to drain it.
    pub async fn submit(&self, task: ScheduledTask) {
        // Send fails only after stop; tasks submitted then are dropped.
        let _ = self.submit_tx.send(task).await;
    }

    /// Signal the control loop to exit. Idempotent. Tasks still pending in
    /// the queue are dropped; in-flight dispatched executions are not
    /// awaited.
    pub fn stop(&self) {
        let _ = self.stop_tx.try_send(());
    }
}

async fn control_loop(
    mut submit_rx: mpsc::Receiver<ScheduledTask>,
    mut stop_rx: mpsc::Receiver<()>,
    resubmit_tx: mpsc::Sender<ScheduledTask>,
) {
    let mut queue = TaskQueue::new();

    loop {
        let now = Instant::now();
        while let Some(task) = queue.pop_due(now) {
            dispatch(task, resubmit_tx.clone());
        }

        let wait = queue
            .next_fire_at()
            .map(|at| at.saturating_duration_since(now))
            .unwrap_or(IDLE_CEILING);

        tokio::select! {
            submitted = submit_rx.recv() => {
                // The loop holds a sender clone for resubmissions, so the
                // channel cannot close underneath us.
                if let Some(task) = submitted {
                    queue.push(task);
                }
            }
            _ = tokio::time::sleep(wait) => {}
            _ = stop_rx.recv() => {
                debug!(pending = queue.len(), "scheduler stopping");
                break;
            }
        }
    }
}

/// Hand a due task to an independent execution. Never blocks the loop.
fn dispatch(task: ScheduledTask, resubmit_tx: mpsc::Sender<ScheduledTask>) {
    tokio::spawn(async move {
        // Sole cancellation check point; a task already running is never
        // interrupted.
        if task.cancel.is_cancelled() {
            debug!("skipping cancelled task");
            return;
        }

        let run = task.run.clone();
        if tokio::task::spawn_blocking(move || run()).await.is_err() {
            // A panicked callback counts as an unsuccessful run and drops
            // out of rotation.
            warn!("scheduled task panicked");
            return;
        }

        if let Some(interval) = task.repeat.filter(|i| !i.is_zero()) {
            let next = ScheduledTask {
                fire_at: Instant::now() + interval,
                ..task
            };
            let _ = resubmit_tx.send(next).await;
        }
    });
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
