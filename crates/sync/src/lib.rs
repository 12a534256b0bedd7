// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Depot synchronization engine
//!
//! A depot keeps a managed destination in sync with a source directory:
//! each round snapshots the prior destination state via hardlinks, then
//! copies changed files in and deletes files gone from the source.

mod descriptor;
mod error;
pub mod fsops;
mod history;
mod registry;
mod round;

pub use descriptor::{DepotDescriptor, ARCHIVE_DIR, MARKER_FILE, WORK_DIR};
pub use error::SyncError;
pub use history::{RunHistory, RunOutcome, DEFAULT_HISTORY_CAPACITY};
pub use registry::{DepotJob, DepotRegistry};
pub use round::{check_destination, run_round};
