// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! locksmithd: HTTP front end of the reboot coordinator

pub mod lifecycle;
pub mod server;

pub use lifecycle::{LifecycleError, Overrides};
pub use server::{router, AppState, ServerError};
