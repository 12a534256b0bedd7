// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bounded run history per depot

use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use std::time::Duration;

/// Default number of round outcomes retained per depot.
pub const DEFAULT_HISTORY_CAPACITY: usize = 32;

/// Outcome of one sync round. Immutable once appended.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// When the round started
    pub timestamp: DateTime<Utc>,
    pub duration: Duration,
    pub bytes_copied: u64,
    /// Phase-level error text; empty on success
    pub error: String,
}

impl RunOutcome {
    pub fn is_success(&self) -> bool {
        self.error.is_empty()
    }
}

/// Fixed-capacity append-only ring over [`RunOutcome`]; the oldest entry
/// is evicted on overflow, so exactly the most recent `capacity` outcomes
/// remain, in chronological order.
#[derive(Debug)]
pub struct RunHistory {
    outcomes: VecDeque<RunOutcome>,
    capacity: usize,
}

impl RunHistory {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            outcomes: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn append(&mut self, outcome: RunOutcome) {
        if self.outcomes.len() == self.capacity {
            self.outcomes.pop_front();
        }
        self.outcomes.push_back(outcome);
    }

    /// Snapshot of the retained outcomes, oldest first.
    pub fn outcomes(&self) -> Vec<RunOutcome> {
        self.outcomes.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}
