// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Scheduling core for stevedore: a time-ordered task queue owned by a
//! single control loop, fed through a bounded submission channel.

mod cancel;
mod queue;
mod scheduler;

pub use cancel::CancelToken;
pub use queue::{ScheduledTask, TaskFn, TaskQueue};
pub use scheduler::Scheduler;
