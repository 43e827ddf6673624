// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! locksmith-core: domain types for the reboot coordinator
//!
//! This crate provides:
//! - The per-group reboot semaphore and its stored encoding
//! - Storage key derivation for groups
//! - Request parameters and node identity validation
//! - HTTP endpoint paths and payloads
//! - Service configuration

pub mod config;
pub mod group;
pub mod identity;
pub mod protocol;
pub mod semaphore;

pub use config::{ConfigError, ServiceConfig, StoreBackend, StoreConfig};
pub use group::{escape, GroupKey, SpaceEncoding, DEFAULT_GROUP};
pub use identity::{validate_identity, HttpParams, IdentityError, NodeIdentity, Params};
pub use protocol::{GroupStatus, TotalSlotsRequest};
pub use semaphore::{Semaphore, SemaphoreError};
