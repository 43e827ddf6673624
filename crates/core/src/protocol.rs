// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP endpoints and payloads shared by the daemon and its clients

use serde::{Deserialize, Serialize};

/// Node asks for a reboot slot
pub const PRE_REBOOT_ENDPOINT: &str = "/v1/pre-reboot";
/// Node reports it is healthy again
pub const STEADY_STATE_ENDPOINT: &str = "/v1/steady-state";
/// Read a group's semaphore
pub const GROUP_SEMAPHORE_ENDPOINT: &str = "/v1/groups/{group}/semaphore";
/// Change a group's capacity
pub const GROUP_TOTAL_SLOTS_ENDPOINT: &str = "/v1/groups/{group}/total-slots";

/// Fill the `{group}` placeholder of a group endpoint
pub fn group_path(template: &str, escaped_group: &str) -> String {
    template.replace("{group}", escaped_group)
}

/// Response body of the group status endpoint
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupStatus {
    pub group: String,
    pub total_slots: u64,
    pub holders: Vec<String>,
    pub version: i64,
}

/// Request body of the capacity endpoint
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotalSlotsRequest {
    pub total_slots: u64,
}
