// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake versioned store for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{MemoryStore, StoreConnector, StoreError, StoredRecord, Version, VersionedStore};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Recorded store call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    Connect,
    Get { key: String },
    PutIfVersion { key: String, expected: Version },
}

/// Fake store for testing
///
/// Backed by a [`MemoryStore`], records every call, and can simulate an
/// unreachable store or a concurrent writer.
#[derive(Clone, Default)]
pub struct FakeStore {
    inner: MemoryStore,
    calls: Arc<Mutex<Vec<StoreCall>>>,
    unavailable: Arc<AtomicBool>,
    pending_conflicts: Arc<AtomicUsize>,
}

impl FakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Make connects, reads, and writes fail until turned back on
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Let another writer sneak in before the next conditional put
    pub fn inject_conflict(&self) {
        self.pending_conflicts.fetch_add(1, Ordering::SeqCst);
    }

    /// Overwrite a key directly, e.g. to plant a corrupt record
    pub fn put_raw(&self, key: &str, value: &[u8]) -> Version {
        self.inner.put(key, value.to_vec())
    }

    pub fn version(&self, key: &str) -> Version {
        self.inner.version(key)
    }

    /// Current value of `key`, if any
    pub fn value(&self, key: &str) -> Option<Vec<u8>> {
        self.inner.value(key)
    }

    fn record(&self, call: StoreCall) {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(call);
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("fake store is down".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl VersionedStore for FakeStore {
    async fn get(&self, key: &str) -> Result<Vec<StoredRecord>, StoreError> {
        self.record(StoreCall::Get {
            key: key.to_string(),
        });
        self.check_available()?;
        self.inner.get(key).await
    }

    async fn put_if_version(
        &self,
        key: &str,
        expected: Version,
        value: Vec<u8>,
    ) -> Result<bool, StoreError> {
        self.record(StoreCall::PutIfVersion {
            key: key.to_string(),
            expected,
        });
        self.check_available()?;

        let conflict = self
            .pending_conflicts
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if conflict {
            self.inner.touch(key);
        }

        self.inner.put_if_version(key, expected, value).await
    }
}

/// Connector handing out clones of one [`FakeStore`]
#[derive(Clone, Default)]
pub struct FakeConnector {
    store: FakeStore,
}

impl FakeConnector {
    pub fn new(store: FakeStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &FakeStore {
        &self.store
    }
}

#[async_trait]
impl StoreConnector for FakeConnector {
    type Store = FakeStore;

    async fn connect(&self) -> Result<FakeStore, StoreError> {
        self.store.record(StoreCall::Connect);
        self.store.check_available()?;
        Ok(self.store.clone())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
