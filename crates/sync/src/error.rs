// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error taxonomy for depot registration and sync rounds

use thiserror::Error;

/// Errors surfaced by registry operations and by round phases.
///
/// Per-file stat/copy/link/delete failures inside a round are logged and
/// the file skipped; they never appear here. Only phase-level failures
/// (precondition, init, archive setup, top-level listing) do.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("invalid depot descriptor: {0}")]
    Validation(String),
    #[error("depot already registered: {0}")]
    DuplicateDepot(String),
    #[error("depot destination unusable: {0}")]
    Precondition(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("marker file error: {0}")]
    Marker(#[from] serde_json::Error),
}
