// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lock manager: durable, conflict-safe semaphore updates
//!
//! Every mutation is read-modify-write against the store: read the group's
//! semaphore together with its version, change it in memory, then write it
//! back only if the version is still the one we read. A moved version is a
//! [`LockError::Conflict`]. Nothing here retries; the client repeats the whole
//! request, and the caller bounds each call with its own deadline (dropping
//! the future aborts any store call in flight).

use crate::error::LockError;
use locksmith_adapters::{StoreConnector, Version, VersionedStore};
use locksmith_core::{GroupKey, Semaphore};
use tracing::debug;

/// Lock manager for one group, holding one store connection
pub struct Manager<S> {
    store: S,
    key: GroupKey,
}

impl<S: VersionedStore> Manager<S> {
    /// Connect to the store and make sure the group's semaphore exists.
    ///
    /// A group seen for the first time is created with `total_slots`
    /// capacity; an existing group keeps whatever it has.
    pub async fn new<C>(connector: &C, group: &str, total_slots: u64) -> Result<Self, LockError>
    where
        C: StoreConnector<Store = S>,
    {
        let store = connector.connect().await.map_err(LockError::Connect)?;
        let manager = Self {
            store,
            key: GroupKey::for_group(group),
        };

        manager
            .ensure_init(total_slots)
            .await
            .map_err(|e| LockError::Init {
                key: manager.key.to_string(),
                source: Box::new(e),
            })?;

        Ok(manager)
    }

    pub fn key(&self) -> &GroupKey {
        &self.key
    }

    /// Release the store connection
    pub fn close(self) {
        debug!(key = %self.key, "closing lock manager");
    }

    /// Create the semaphore unless the key already exists.
    ///
    /// Losing a creation race to another instance is fine: the record exists
    /// either way.
    async fn ensure_init(&self, total_slots: u64) -> Result<(), LockError> {
        let value = Semaphore::new(total_slots)?.encode()?;

        // version 0 means the key does not exist
        let created = self
            .store
            .put_if_version(self.key.as_str(), 0, value)
            .await?;
        if created {
            debug!(key = %self.key, total_slots, "semaphore created");
        }

        Ok(())
    }

    /// Current semaphore value and the version it was read at
    pub(crate) async fn get(&self) -> Result<(Semaphore, Version), LockError> {
        let records = self.store.get(self.key.as_str()).await?;

        let record = match records.as_slice() {
            [] => {
                return Err(LockError::Missing {
                    key: self.key.to_string(),
                })
            }
            [record] => record,
            _ => {
                return Err(LockError::UnexpectedCount {
                    key: self.key.to_string(),
                    count: records.len(),
                })
            }
        };

        if record.version == 0 {
            return Err(LockError::Missing {
                key: self.key.to_string(),
            });
        }
        if record.value.is_empty() {
            return Err(LockError::EmptyRecord {
                key: self.key.to_string(),
            });
        }

        let sem = Semaphore::decode(&record.value)?;
        Ok((sem, record.version))
    }

    /// Write `sem` back if the key is still at `version`
    pub(crate) async fn set(&self, sem: &Semaphore, version: Version) -> Result<(), LockError> {
        let value = sem.encode()?;

        let applied = self
            .store
            .put_if_version(self.key.as_str(), version, value)
            .await?;
        if !applied {
            return Err(LockError::Conflict {
                key: self.key.to_string(),
            });
        }

        Ok(())
    }

    /// Take a reboot slot for `id`.
    ///
    /// Succeeds without writing when `id` already holds a slot. Fails when the
    /// group is full or the group changed under us.
    pub async fn recursive_lock(&self, id: &str) -> Result<(), LockError> {
        let (mut sem, version) = self.get().await?;

        if sem.recursive_lock(id)? {
            debug!(key = %self.key, id, "already holding a slot");
            return Ok(());
        }

        self.set(&sem, version).await?;
        debug!(key = %self.key, id, available = sem.available_slots(), "slot taken");
        Ok(())
    }

    /// Release the slot held by `id`, if any.
    ///
    /// Always writes, even when `id` held nothing.
    pub async fn unlock_if_held(&self, id: &str) -> Result<(), LockError> {
        let (mut sem, version) = self.get().await?;

        sem.unlock_if_held(id);

        self.set(&sem, version).await?;
        debug!(key = %self.key, id, available = sem.available_slots(), "slot released");
        Ok(())
    }

    /// Read-only view of the group
    pub async fn status(&self) -> Result<(Semaphore, Version), LockError> {
        self.get().await
    }

    /// Change the group's capacity. Holders are never dropped, so shrinking
    /// below the current holder count fails.
    pub async fn set_total_slots(&self, total_slots: u64) -> Result<(), LockError> {
        let (mut sem, version) = self.get().await?;

        if sem.total_slots() == total_slots {
            return Ok(());
        }
        sem.set_total_slots(total_slots)?;

        self.set(&sem, version).await?;
        debug!(key = %self.key, total_slots, "capacity changed");
        Ok(())
    }
}

#[cfg(test)]
#[path = "manager_tests.rs"]
mod tests;
