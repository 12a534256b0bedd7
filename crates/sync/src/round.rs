// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! One synchronization round for a depot
//!
//! Phases in order: precondition check, idempotent init, hardlink archive
//! of the working directory, then diff-copy-delete against the source.
//! Phase failures abort the round; per-file failures are logged and the
//! file skipped.

use crate::descriptor::{DepotDescriptor, MARKER_FILE};
use crate::error::SyncError;
use crate::fsops;
use chrono::Utc;
use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, warn};

/// Label format for per-round archive directories. Subsecond precision
/// keeps back-to-back rounds in distinct directories.
const ARCHIVE_LABEL_FORMAT: &str = "%Y.%m.%d~%H:%M:%S%.3f";

/// Run one round: returns total bytes copied, or the phase-level error.
///
/// File-level stat/copy/link/delete failures do not surface here; they
/// are logged and the file skipped.
pub fn run_round(desc: &DepotDescriptor) -> Result<u64, SyncError> {
    check_destination(&desc.destination)?;
    init_depot(desc)?;
    archive_working_dir(desc)?;
    let bytes = sync_dirs(&desc.source, &desc.work_dir())?;
    debug!(depot = %desc.name, bytes_copied = bytes, "round complete");
    Ok(bytes)
}

/// The destination must be a directory that is either empty or already
/// carries the marker file. Fails fast with no side effects otherwise.
pub fn check_destination(root: &Path) -> Result<(), SyncError> {
    let meta = fs::metadata(root).map_err(|_| {
        SyncError::Precondition(format!("{} does not exist", root.display()))
    })?;
    if !meta.is_dir() {
        return Err(SyncError::Precondition(format!(
            "{} is not a directory",
            root.display()
        )));
    }

    let mut has_entries = false;
    for entry in fs::read_dir(root)? {
        let entry = entry?;
        if entry.file_name() == MARKER_FILE && entry.file_type()?.is_file() {
            return Ok(());
        }
        has_entries = true;
    }
    if has_entries {
        return Err(SyncError::Precondition(format!(
            "{} is not empty and has no {} marker",
            root.display(),
            MARKER_FILE
        )));
    }
    Ok(())
}

/// Idempotent: the marker file, archive root, and working directory are
/// created only when absent.
fn init_depot(desc: &DepotDescriptor) -> Result<(), SyncError> {
    let marker = desc.marker_path();
    match fs::metadata(&marker) {
        Ok(meta) if meta.is_dir() => {
            return Err(SyncError::Precondition(format!(
                "{} is a directory",
                marker.display()
            )));
        }
        Ok(_) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            let json = serde_json::to_string_pretty(desc)?;
            fs::write(&marker, json)?;
        }
        Err(e) => return Err(e.into()),
    }

    fsops::ensure_dir(&desc.archive_root())?;
    fsops::ensure_dir(&desc.work_dir())?;
    Ok(())
}

/// Snapshot the entire working directory into a fresh timestamp-labeled
/// archive subdirectory using per-file hardlinks: constant time per file,
/// zero content bytes written.
fn archive_working_dir(desc: &DepotDescriptor) -> Result<(), SyncError> {
    let work = desc.work_dir();
    let label = Utc::now().format(ARCHIVE_LABEL_FORMAT).to_string();
    let archive = desc.archive_root().join(label);
    fsops::ensure_dir(&archive)?;

    let files = fsops::list_files_recursively(&work)?;
    for rel in files {
        let src = work.join(&rel);
        let dst = archive.join(&rel);
        if let Err(e) = fsops::hard_link_file(&dst, &src) {
            warn!(
                operation = "link",
                path = %src.display(),
                error = %e,
                "archive link failed, skipping file"
            );
        }
    }
    Ok(())
}

/// Diff-copy-delete between the source root and the working directory.
fn sync_dirs(src_root: &Path, dst_root: &Path) -> Result<u64, SyncError> {
    let src_files: BTreeSet<PathBuf> =
        fsops::list_files_recursively(src_root)?.into_iter().collect();
    let dst_files: BTreeSet<PathBuf> =
        fsops::list_files_recursively(dst_root)?.into_iter().collect();

    let mut bytes_copied = 0u64;
    for rel in &src_files {
        let src = src_root.join(rel);
        let dst = dst_root.join(rel);

        let needs_copy = if dst_files.contains(rel) {
            // Modification time is the only change-detection signal.
            match (stat_modified(&src), stat_modified(&dst)) {
                (Some(s), Some(d)) => s != d,
                _ => continue,
            }
        } else {
            true
        };

        if needs_copy {
            match fsops::copy_file(&dst, &src) {
                Ok(n) => bytes_copied += n,
                Err(e) => warn!(
                    operation = "copy",
                    src = %src.display(),
                    dst = %dst.display(),
                    error = %e,
                    "copy failed, skipping file"
                ),
            }
        }
    }

    for rel in dst_files.difference(&src_files) {
        let dst = dst_root.join(rel);
        if let Err(e) = fs::remove_file(&dst) {
            warn!(
                operation = "delete",
                path = %dst.display(),
                error = %e,
                "delete failed, skipping file"
            );
        }
    }

    Ok(bytes_copied)
}

fn stat_modified(path: &Path) -> Option<SystemTime> {
    match fs::metadata(path).and_then(|m| m.modified()) {
        Ok(t) => Some(t),
        Err(e) => {
            warn!(
                operation = "stat",
                path = %path.display(),
                error = %e,
                "stat failed, skipping file"
            );
            None
        }
    }
}

#[cfg(test)]
#[path = "round_tests.rs"]
mod tests;
