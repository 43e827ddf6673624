// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP client for locksmithd

use std::time::Duration;

use locksmith_core::protocol::{
    group_path, GROUP_SEMAPHORE_ENDPOINT, GROUP_TOTAL_SLOTS_ENDPOINT, PRE_REBOOT_ENDPOINT,
    STEADY_STATE_ENDPOINT,
};
use locksmith_core::{escape, GroupStatus, HttpParams, Params, SpaceEncoding, TotalSlotsRequest};
use serde::Serialize;
use thiserror::Error;
use ureq::http::Response;
use ureq::{Agent, Body};

/// Client errors
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: ureq::Error,
    },

    #[error("server refused the request ({status}): {message}")]
    BadRequest { status: u16, message: String },

    #[error("server failed the request ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("unexpected response from server: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Blocking client for one locksmithd instance
pub struct LocksmithClient {
    agent: Agent,
    base: String,
}

impl LocksmithClient {
    pub fn new(server: &str, timeout: Duration) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();
        Self {
            agent,
            base: server.trim_end_matches('/').to_string(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// Ask for a reboot slot
    pub fn pre_reboot(&self, params: Params) -> Result<(), ClientError> {
        let body = HttpParams {
            client_params: params,
        };
        self.post_json(PRE_REBOOT_ENDPOINT, &body)?;
        Ok(())
    }

    /// Give the reboot slot back
    pub fn steady_state(&self, params: Params) -> Result<(), ClientError> {
        let body = HttpParams {
            client_params: params,
        };
        self.post_json(STEADY_STATE_ENDPOINT, &body)?;
        Ok(())
    }

    pub fn status(&self, group: &str) -> Result<GroupStatus, ClientError> {
        let url = self.url(&group_path(GROUP_SEMAPHORE_ENDPOINT, &path_segment(group)));
        let response = self.agent.get(&url).call();
        let body = read_response(&url, response)?;
        Ok(serde_json::from_str(&body)?)
    }

    pub fn set_total_slots(&self, group: &str, total_slots: u64) -> Result<(), ClientError> {
        let url = self.url(&group_path(
            GROUP_TOTAL_SLOTS_ENDPOINT,
            &path_segment(group),
        ));
        let payload = serde_json::to_string(&TotalSlotsRequest { total_slots })?;
        let response = self
            .agent
            .put(&url)
            .header("Content-Type", "application/json")
            .send(payload.as_str());
        read_response(&url, response)?;
        Ok(())
    }

    fn post_json<T: Serialize>(&self, path: &str, body: &T) -> Result<String, ClientError> {
        let url = self.url(path);
        let payload = serde_json::to_string(body)?;
        let response = self
            .agent
            .post(&url)
            .header("Content-Type", "application/json")
            .send(payload.as_str());
        read_response(&url, response)
    }
}

/// Body of a successful response, or the server's message as an error
fn read_response(
    url: &str,
    response: Result<Response<Body>, ureq::Error>,
) -> Result<String, ClientError> {
    let http = |source| ClientError::Http {
        url: url.to_string(),
        source,
    };

    let mut response = response.map_err(http)?;
    let status = response.status();
    let text = response.body_mut().read_to_string().map_err(http)?;

    if status.is_success() {
        return Ok(text);
    }

    let message = text.trim().to_string();
    if status.is_client_error() {
        Err(ClientError::BadRequest {
            status: status.as_u16(),
            message,
        })
    } else {
        Err(ClientError::Server {
            status: status.as_u16(),
            message,
        })
    }
}

/// Escape a group name for use as one URL path segment
fn path_segment(group: &str) -> String {
    escape(group, SpaceEncoding::Percent)
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
