// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Service configuration
//!
//! Loaded from a TOML file; every key is optional and falls back to the
//! defaults below.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Errors from loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config syntax: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Which versioned store holds the semaphores
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Etcd,
    /// Process-local map. Only safe for a single replica.
    Memory,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub endpoints: Vec<String>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Etcd,
            endpoints: vec!["http://127.0.0.1:2379".to_string()],
        }
    }
}

/// Configuration consumed by the reboot coordinator
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Address the HTTP listener binds to
    pub listen: SocketAddr,
    /// Deadline for a whole lock operation, store connection included
    #[serde(with = "humantime_serde")]
    pub lock_timeout: Duration,
    /// Capacity given to groups created on first use
    pub semaphore_slots: u64,
    pub store: StoreConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen: SocketAddr::from(([0, 0, 0, 0], 9999)),
            lock_timeout: Duration::from_secs(3),
            semaphore_slots: 1,
            store: StoreConfig::default(),
        }
    }
}

impl ServiceConfig {
    /// Read a config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.semaphore_slots == 0 {
            return Err(ConfigError::Invalid(
                "semaphore_slots must be at least 1".to_string(),
            ));
        }
        if self.lock_timeout.is_zero() {
            return Err(ConfigError::Invalid(
                "lock_timeout must be greater than zero".to_string(),
            ));
        }
        if self.store.backend == StoreBackend::Etcd && self.store.endpoints.is_empty() {
            return Err(ConfigError::Invalid(
                "at least one etcd endpoint is required".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
