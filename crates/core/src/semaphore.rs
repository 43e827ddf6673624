// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Reboot semaphore for one group
//!
//! Tracks which nodes currently hold a reboot slot. Holders are kept as a
//! strictly ascending, duplicate-free list so membership checks are a binary
//! search. The value is pure: persisting it and guarding concurrent updates is
//! the lock manager's job.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from semaphore operations
#[derive(Debug, Error)]
pub enum SemaphoreError {
    #[error("semaphore capacity must be at least 1")]
    ZeroCapacity,

    #[error("semaphore exhausted: all {total_slots} slots are held")]
    Exhausted { total_slots: u64 },

    #[error("cannot shrink semaphore to {requested} slots: {holders} holders present")]
    BelowOccupancy { requested: u64, holders: usize },

    #[error("failed to decode semaphore: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("failed to encode semaphore: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("corrupt semaphore record: {0}")]
    Corrupt(String),
}

/// Holder set and capacity of a reboot group
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Semaphore {
    total_slots: u64,
    holders: Vec<String>,
}

impl Semaphore {
    /// Create an empty semaphore with `total_slots` capacity.
    pub fn new(total_slots: u64) -> Result<Self, SemaphoreError> {
        if total_slots == 0 {
            return Err(SemaphoreError::ZeroCapacity);
        }
        Ok(Self {
            total_slots,
            holders: Vec::new(),
        })
    }

    pub fn total_slots(&self) -> u64 {
        self.total_slots
    }

    /// Current holders, in ascending order
    pub fn holders(&self) -> &[String] {
        &self.holders
    }

    pub fn available_slots(&self) -> u64 {
        self.total_slots.saturating_sub(self.holders.len() as u64)
    }

    pub fn is_held_by(&self, id: &str) -> bool {
        self.position(id).is_ok()
    }

    /// Change capacity. Never drops existing holders, so shrinking below the
    /// current holder count is rejected.
    pub fn set_total_slots(&mut self, total_slots: u64) -> Result<(), SemaphoreError> {
        if total_slots == 0 {
            return Err(SemaphoreError::ZeroCapacity);
        }
        if (self.holders.len() as u64) > total_slots {
            return Err(SemaphoreError::BelowOccupancy {
                requested: total_slots,
                holders: self.holders.len(),
            });
        }
        self.total_slots = total_slots;
        Ok(())
    }

    /// Take a slot for `id`.
    ///
    /// Returns `Ok(true)` without mutating when `id` already holds a slot, so
    /// a retried request is not charged twice.
    pub fn recursive_lock(&mut self, id: &str) -> Result<bool, SemaphoreError> {
        let loc = match self.position(id) {
            Ok(_) => return Ok(true),
            Err(loc) => loc,
        };

        if self.available_slots() == 0 {
            return Err(SemaphoreError::Exhausted {
                total_slots: self.total_slots,
            });
        }

        self.holders.insert(loc, id.to_string());
        Ok(false)
    }

    /// Release the slot held by `id`, if any.
    pub fn unlock_if_held(&mut self, id: &str) {
        if let Ok(loc) = self.position(id) {
            self.holders.remove(loc);
        }
    }

    /// Serialize to the stored JSON representation
    pub fn encode(&self) -> Result<Vec<u8>, SemaphoreError> {
        serde_json::to_vec(self).map_err(SemaphoreError::Encode)
    }

    /// Parse a stored record, rejecting values that break the holder invariants
    pub fn decode(data: &[u8]) -> Result<Self, SemaphoreError> {
        let sem: Semaphore = serde_json::from_slice(data).map_err(SemaphoreError::Decode)?;
        sem.check_invariants()?;
        Ok(sem)
    }

    fn check_invariants(&self) -> Result<(), SemaphoreError> {
        if self.total_slots == 0 {
            return Err(SemaphoreError::Corrupt("total_slots is 0".to_string()));
        }
        if (self.holders.len() as u64) > self.total_slots {
            return Err(SemaphoreError::Corrupt(format!(
                "{} holders exceed {} slots",
                self.holders.len(),
                self.total_slots
            )));
        }
        if let Some(pair) = self.holders.windows(2).find(|w| w[0] >= w[1]) {
            return Err(SemaphoreError::Corrupt(format!(
                "holders not strictly ascending at {:?}, {:?}",
                pair[0], pair[1]
            )));
        }
        Ok(())
    }

    fn position(&self, id: &str) -> Result<usize, usize> {
        self.holders.binary_search_by(|h| h.as_str().cmp(id))
    }
}

#[cfg(test)]
#[path = "semaphore_tests.rs"]
mod tests;
