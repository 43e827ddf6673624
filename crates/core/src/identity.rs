// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Request parameters and node identity validation

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from identity validation. All of these are client errors.
#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("malformed request body: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("empty group")]
    EmptyGroup,

    #[error("empty node ID")]
    EmptyNodeId,
}

/// Body of a pre-reboot or steady-state request
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpParams {
    #[serde(default)]
    pub client_params: Params,
}

/// Client parameters for a remote lock request
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Params {
    /// Reported OS version. Accepted but not used for locking yet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_version: Option<String>,
    #[serde(default)]
    pub node_uuid: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub group: String,
}

/// Validated identity of the requesting node
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeIdentity {
    /// Holder identifier
    pub uuid: String,
    /// Reboot group the node belongs to
    pub group: String,
}

/// Decode a request body and check that both identity fields are present.
pub fn validate_identity(body: &[u8]) -> Result<NodeIdentity, IdentityError> {
    let input: HttpParams = serde_json::from_slice(body).map_err(IdentityError::Decode)?;
    let Params {
        node_uuid, group, ..
    } = input.client_params;

    if group.is_empty() {
        return Err(IdentityError::EmptyGroup);
    }
    if node_uuid.is_empty() {
        return Err(IdentityError::EmptyNodeId);
    }

    Ok(NodeIdentity {
        uuid: node_uuid,
        group,
    })
}

#[cfg(test)]
#[path = "identity_tests.rs"]
mod tests;
