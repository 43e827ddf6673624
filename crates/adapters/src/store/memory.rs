// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process-local versioned store.
//!
//! Same version semantics as etcd, but the data dies with the process and is
//! invisible to other replicas. Meant for single-instance deployments and
//! local testing.

use super::{StoreConnector, StoreError, StoredRecord, Version, VersionedStore};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
struct Entry {
    value: Vec<u8>,
    version: Version,
}

/// In-memory versioned store. Clones share the same data.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, Entry>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current version of `key`, 0 if absent
    pub fn version(&self, key: &str) -> Version {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(key)
            .map_or(0, |e| e.version)
    }

    /// Current value of `key`, if any
    pub fn value(&self, key: &str) -> Option<Vec<u8>> {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(key)
            .map(|e| e.value.clone())
    }

    /// Unconditionally overwrite `key`, bumping its version
    pub fn put(&self, key: &str, value: Vec<u8>) -> Version {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        let version = entries.get(key).map_or(0, |e| e.version) + 1;
        entries.insert(key.to_string(), Entry { value, version });
        version
    }

    /// Bump the version of an existing key as if another writer rewrote it
    pub fn touch(&self, key: &str) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(entry) = entries.get_mut(key) {
            entry.version += 1;
        }
    }
}

#[async_trait]
impl VersionedStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Vec<StoredRecord>, StoreError> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        Ok(entries
            .get(key)
            .map(|e| StoredRecord {
                value: e.value.clone(),
                version: e.version,
            })
            .into_iter()
            .collect())
    }

    async fn put_if_version(
        &self,
        key: &str,
        expected: Version,
        value: Vec<u8>,
    ) -> Result<bool, StoreError> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        let current = entries.get(key).map_or(0, |e| e.version);
        if current != expected {
            return Ok(false);
        }
        entries.insert(
            key.to_string(),
            Entry {
                value,
                version: current + 1,
            },
        );
        Ok(true)
    }
}

/// Hands out handles to one shared [`MemoryStore`]
#[derive(Clone, Debug, Default)]
pub struct MemoryConnector {
    store: MemoryStore,
}

impl MemoryConnector {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &MemoryStore {
        &self.store
    }
}

#[async_trait]
impl StoreConnector for MemoryConnector {
    type Store = MemoryStore;

    async fn connect(&self) -> Result<MemoryStore, StoreError> {
        Ok(self.store.clone())
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
