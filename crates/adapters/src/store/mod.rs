// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Versioned key-value store adapters
//!
//! Semaphores live in an external store that attaches a per-key version to
//! every value and can apply a write only while that version is unchanged.
//! That conditional write is the whole concurrency story: no caller ever
//! writes a key without naming the version it read.

mod etcd;
mod memory;

pub use etcd::{EtcdConnector, EtcdStore};
pub use memory::{MemoryConnector, MemoryStore};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeConnector, FakeStore, StoreCall};

use async_trait::async_trait;
use thiserror::Error;

/// Per-key modification counter. `0` means the key does not exist.
pub type Version = i64;

/// Errors from store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("etcd error: {0}")]
    Etcd(#[from] etcd_client::Error),
}

/// A value read from the store with the version it was read at
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredRecord {
    pub value: Vec<u8>,
    pub version: Version,
}

/// Connection to a versioned store
#[async_trait]
pub trait VersionedStore: Send + Sync + 'static {
    /// Read every record stored at exactly `key`
    async fn get(&self, key: &str) -> Result<Vec<StoredRecord>, StoreError>;

    /// Atomically write `value` if the key's version still equals `expected`.
    ///
    /// Returns `Ok(false)` when the version moved and nothing was written.
    /// `expected == 0` creates the key only if it is absent.
    async fn put_if_version(
        &self,
        key: &str,
        expected: Version,
        value: Vec<u8>,
    ) -> Result<bool, StoreError>;
}

/// Opens store connections
#[async_trait]
pub trait StoreConnector: Clone + Send + Sync + 'static {
    type Store: VersionedStore;

    async fn connect(&self) -> Result<Self::Store, StoreError>;
}
