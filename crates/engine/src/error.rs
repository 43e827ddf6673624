// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the lock manager

use locksmith_adapters::StoreError;
use locksmith_core::SemaphoreError;
use thiserror::Error;

/// Errors that can occur while locking or unlocking a group
#[derive(Debug, Error)]
pub enum LockError {
    #[error("failed to connect to store: {0}")]
    Connect(#[source] StoreError),

    #[error("failed to initialize semaphore at {key}: {source}")]
    Init {
        key: String,
        #[source]
        source: Box<LockError>,
    },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("no semaphore at {key}")]
    Missing { key: String },

    #[error("unexpected number of results at {key}: {count}")]
    UnexpectedCount { key: String, count: usize },

    #[error("empty semaphore value at {key}")]
    EmptyRecord { key: String },

    #[error(transparent)]
    Semaphore(#[from] SemaphoreError),

    #[error("conflict on semaphore detected, aborting")]
    Conflict { key: String },
}

impl LockError {
    /// True when another request changed the group between our read and write
    pub fn is_conflict(&self) -> bool {
        matches!(self, LockError::Conflict { .. })
    }
}
