// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Depot descriptors and on-disk layout

use crate::error::SyncError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Marker file tagging a destination root as an initialized depot.
pub const MARKER_FILE: &str = ".depot";
/// Subdirectory holding per-round hardlink snapshots.
pub const ARCHIVE_DIR: &str = ".archive";
/// The live destination tree kept in sync with the source.
pub const WORK_DIR: &str = "work";

/// One registered synchronization job: source, destination root, schedule.
///
/// Immutable once created; persisted as the depot's marker file. The
/// serialized field names (misspellings included) are wire format shared
/// with existing marker files — do not rename them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepotDescriptor {
    pub name: String,
    #[serde(rename = "sync_source")]
    pub source: PathBuf,
    #[serde(rename = "deport_location")]
    pub destination: PathBuf,
    pub owner: String,
    #[serde(rename = "sync_interval_minu")]
    pub sync_interval_minutes: u64,
    #[serde(rename = "archive_alloted_day")]
    pub archive_retention_days: u32,
    #[serde(rename = "creat_time")]
    pub created_at: DateTime<Utc>,
}

impl DepotDescriptor {
    pub fn new(
        name: impl Into<String>,
        source: impl Into<PathBuf>,
        destination: impl Into<PathBuf>,
        owner: impl Into<String>,
        sync_interval_minutes: u64,
        archive_retention_days: u32,
    ) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
            destination: destination.into(),
            owner: owner.into(),
            sync_interval_minutes,
            archive_retention_days,
            created_at: Utc::now(),
        }
    }

    /// Reject descriptors the registry must not accept.
    pub fn validate(&self) -> Result<(), SyncError> {
        if self.name.is_empty() {
            return Err(SyncError::Validation("name is empty".to_string()));
        }
        if self.source.as_os_str().is_empty() {
            return Err(SyncError::Validation("source path is empty".to_string()));
        }
        Ok(())
    }

    pub fn marker_path(&self) -> PathBuf {
        self.destination.join(MARKER_FILE)
    }

    pub fn archive_root(&self) -> PathBuf {
        self.destination.join(ARCHIVE_DIR)
    }

    pub fn work_dir(&self) -> PathBuf {
        self.destination.join(WORK_DIR)
    }
}

#[cfg(test)]
#[path = "descriptor_tests.rs"]
mod tests;
