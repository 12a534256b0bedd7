// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Depot registry
//!
//! Tracks the set of registered depots by name and owns their scheduler
//! rotation. The registry lock is never held across filesystem work or a
//! scheduler submission.

use crate::descriptor::DepotDescriptor;
use crate::error::SyncError;
use crate::history::{RunHistory, RunOutcome, DEFAULT_HISTORY_CAPACITY};
use crate::round;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use sv_core::{CancelToken, ScheduledTask, Scheduler};
use tracing::{info, warn};

/// A registered depot: its descriptor, the token that drops it out of the
/// scheduler rotation, and its run history.
#[derive(Debug)]
pub struct DepotJob {
    descriptor: DepotDescriptor,
    cancel: CancelToken,
    history: Arc<Mutex<RunHistory>>,
}

impl DepotJob {
    pub fn descriptor(&self) -> &DepotDescriptor {
        &self.descriptor
    }
}

/// Shared, clonable view over the registered depots.
#[derive(Clone)]
pub struct DepotRegistry {
    scheduler: Scheduler,
    depots: Arc<Mutex<HashMap<String, DepotJob>>>,
}

impl DepotRegistry {
    pub fn new(scheduler: Scheduler) -> Self {
        Self {
            scheduler,
            depots: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Register a depot and enter it into the scheduler rotation. The
    /// first round fires immediately; later rounds follow the descriptor's
    /// interval.
    ///
    /// The destination is probed before the depot is inserted, so a depot
    /// that never could sync is rejected up front rather than failing every
    /// round.
    pub async fn add_depot(&self, descriptor: DepotDescriptor) -> Result<(), SyncError> {
        descriptor.validate()?;

        {
            let depots = self.depots.lock().unwrap_or_else(|e| e.into_inner());
            if depots.contains_key(&descriptor.name) {
                return Err(SyncError::DuplicateDepot(descriptor.name.clone()));
            }
        }

        // Filesystem probe happens outside the lock.
        round::check_destination(&descriptor.destination)?;

        let cancel = CancelToken::new();
        let history = Arc::new(Mutex::new(RunHistory::new(DEFAULT_HISTORY_CAPACITY)));

        {
            let mut depots = self.depots.lock().unwrap_or_else(|e| e.into_inner());
            // A racing registration may have landed while the lock was
            // released for the probe.
            if depots.contains_key(&descriptor.name) {
                return Err(SyncError::DuplicateDepot(descriptor.name.clone()));
            }
            depots.insert(
                descriptor.name.clone(),
                DepotJob {
                    descriptor: descriptor.clone(),
                    cancel: cancel.clone(),
                    history: Arc::clone(&history),
                },
            );
        }

        let interval = Duration::from_secs(descriptor.sync_interval_minutes * 60);
        let task = ScheduledTask::repeating(
            Instant::now(),
            interval,
            cancel,
            round_task(descriptor.clone(), history),
        );
        self.scheduler.submit(task).await;

        info!(
            depot = %descriptor.name,
            source = %descriptor.source.display(),
            destination = %descriptor.destination.display(),
            interval_minutes = descriptor.sync_interval_minutes,
            "depot registered"
        );
        Ok(())
    }

    /// Remove a depot and cancel its rotation. A round already running is
    /// not interrupted; an unknown name is a no-op.
    pub fn delete_depot(&self, name: &str) {
        let removed = {
            let mut depots = self.depots.lock().unwrap_or_else(|e| e.into_inner());
            depots.remove(name)
        };
        if let Some(job) = removed {
            job.cancel.cancel();
            info!(depot = %name, "depot removed");
        }
    }

    /// Descriptors of every registered depot, in no particular order.
    pub fn list_depots(&self) -> Vec<DepotDescriptor> {
        let depots = self.depots.lock().unwrap_or_else(|e| e.into_inner());
        depots.values().map(|job| job.descriptor.clone()).collect()
    }

    /// Retained round outcomes for a depot, oldest first. `None` for an
    /// unknown name.
    pub fn history(&self, name: &str) -> Option<Vec<RunOutcome>> {
        let depots = self.depots.lock().unwrap_or_else(|e| e.into_inner());
        let job = depots.get(name)?;
        let history = job.history.lock().unwrap_or_else(|e| e.into_inner());
        Some(history.outcomes())
    }

    pub fn len(&self) -> usize {
        let depots = self.depots.lock().unwrap_or_else(|e| e.into_inner());
        depots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Build the scheduler callback for one depot: run a round, record the
/// outcome. Phase failures are recorded and logged but never tear the
/// depot out of rotation.
fn round_task(
    descriptor: DepotDescriptor,
    history: Arc<Mutex<RunHistory>>,
) -> sv_core::TaskFn {
    Arc::new(move || {
        let started = Utc::now();
        let clock = Instant::now();
        let result = round::run_round(&descriptor);
        let duration = clock.elapsed();

        let outcome = match &result {
            Ok(bytes) => RunOutcome {
                timestamp: started,
                duration,
                bytes_copied: *bytes,
                error: String::new(),
            },
            Err(e) => {
                warn!(depot = %descriptor.name, error = %e, "sync round failed");
                RunOutcome {
                    timestamp: started,
                    duration,
                    bytes_copied: 0,
                    error: e.to_string(),
                }
            }
        };

        let mut history = history.lock().unwrap_or_else(|e| e.into_inner());
        history.append(outcome);
    })
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
