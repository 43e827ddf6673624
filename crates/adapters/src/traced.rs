// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced store wrappers for consistent observability

use crate::store::{StoreConnector, StoreError, StoredRecord, Version, VersionedStore};
use async_trait::async_trait;
use tracing::Instrument;

/// Wrapper that adds tracing to any StoreConnector
#[derive(Clone)]
pub struct TracedConnector<C> {
    inner: C,
}

impl<C> TracedConnector<C> {
    pub fn new(inner: C) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<C: StoreConnector> StoreConnector for TracedConnector<C> {
    type Store = TracedStore<C::Store>;

    async fn connect(&self) -> Result<Self::Store, StoreError> {
        let span = tracing::debug_span!("store.connect");

        async {
            let start = std::time::Instant::now();
            let result = self.inner.connect().await;
            let elapsed_ms = start.elapsed().as_millis() as u64;

            match result {
                Ok(store) => {
                    tracing::debug!(elapsed_ms, "connected");
                    Ok(TracedStore::new(store))
                }
                Err(e) => {
                    tracing::error!(elapsed_ms, error = %e, "connect failed");
                    Err(e)
                }
            }
        }
        .instrument(span)
        .await
    }
}

/// Wrapper that adds tracing to any VersionedStore
pub struct TracedStore<S> {
    inner: S,
}

impl<S> TracedStore<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<S: VersionedStore> VersionedStore for TracedStore<S> {
    async fn get(&self, key: &str) -> Result<Vec<StoredRecord>, StoreError> {
        let span = tracing::debug_span!("store.get", key);

        async {
            let start = std::time::Instant::now();
            let result = self.inner.get(key).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;

            match &result {
                Ok(records) => tracing::debug!(
                    elapsed_ms,
                    count = records.len(),
                    version = records.first().map(|r| r.version),
                    "read"
                ),
                Err(e) => tracing::error!(elapsed_ms, error = %e, "read failed"),
            }

            result
        }
        .instrument(span)
        .await
    }

    async fn put_if_version(
        &self,
        key: &str,
        expected: Version,
        value: Vec<u8>,
    ) -> Result<bool, StoreError> {
        let span = tracing::debug_span!("store.put_if_version", key, expected);

        async {
            tracing::trace!(value_len = value.len(), "writing");
            let start = std::time::Instant::now();
            let result = self.inner.put_if_version(key, expected, value).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;

            match &result {
                Ok(true) => tracing::debug!(elapsed_ms, "written"),
                Ok(false) => tracing::debug!(elapsed_ms, "version changed, nothing written"),
                Err(e) => tracing::error!(elapsed_ms, error = %e, "write failed"),
            }

            result
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
