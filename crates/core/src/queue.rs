// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Time-ordered task queue

use crate::cancel::CancelToken;
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Callback invoked when a task fires.
pub type TaskFn = Arc<dyn Fn() + Send + Sync>;

/// A unit of scheduled work.
///
/// Owned by the queue while pending; repeating tasks are re-created and
/// resubmitted by the dispatcher after each run, so at most one copy of a
/// logical job's task is pending at any time.
#[derive(Clone)]
pub struct ScheduledTask {
    /// When the task becomes due
    pub fire_at: Instant,
    /// Re-dispatch interval; `Some` marks a repeating task
    pub repeat: Option<Duration>,
    pub run: TaskFn,
    pub cancel: CancelToken,
}

impl ScheduledTask {
    /// One-shot task.
    pub fn once(fire_at: Instant, cancel: CancelToken, run: TaskFn) -> Self {
        Self {
            fire_at,
            repeat: None,
            run,
            cancel,
        }
    }

    /// Self-rescheduling task; after each run the next fire time is the
    /// completion time plus `interval`.
    pub fn repeating(
        fire_at: Instant,
        interval: Duration,
        cancel: CancelToken,
        run: TaskFn,
    ) -> Self {
        Self {
            fire_at,
            repeat: Some(interval),
            run,
            cancel,
        }
    }
}

impl fmt::Debug for ScheduledTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScheduledTask")
            .field("fire_at", &self.fire_at)
            .field("repeat", &self.repeat)
            .field("cancelled", &self.cancel.is_cancelled())
            .finish_non_exhaustive()
    }
}

impl PartialEq for ScheduledTask {
    fn eq(&self, other: &Self) -> bool {
        self.fire_at == other.fire_at
    }
}

impl Eq for ScheduledTask {}

impl PartialOrd for ScheduledTask {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScheduledTask {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Min-heap: earliest first
        Reverse(self.fire_at).cmp(&Reverse(other.fire_at))
    }
}

/// Binary min-heap of tasks ordered by fire time.
///
/// Single-owner: the control loop is the only holder, so no lock guards it.
/// Tasks pop in non-decreasing `fire_at` order; no relative order is
/// guaranteed among tasks with equal fire times.
#[derive(Debug, Default)]
pub struct TaskQueue {
    items: BinaryHeap<ScheduledTask>,
}

impl TaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, task: ScheduledTask) {
        self.items.push(task);
    }

    /// Pop the head only if it is due at `now`.
    pub fn pop_due(&mut self, now: Instant) -> Option<ScheduledTask> {
        if self.items.peek().is_some_and(|t| t.fire_at <= now) {
            self.items.pop()
        } else {
            None
        }
    }

    /// Fire time of the earliest pending task, if any.
    pub fn next_fire_at(&self) -> Option<Instant> {
        self.items.peek().map(|t| t.fire_at)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
