// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP surface of the daemon
//!
//! Each request opens its own lock manager, applies one operation under the
//! configured deadline, and closes the manager again. Request validation
//! failures are the only client errors; everything that goes wrong after the
//! identity is accepted is a server error.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use locksmith_adapters::{StoreConnector, Version};
use locksmith_core::protocol::{
    GROUP_SEMAPHORE_ENDPOINT, GROUP_TOTAL_SLOTS_ENDPOINT, PRE_REBOOT_ENDPOINT,
    STEADY_STATE_ENDPOINT,
};
use locksmith_core::{validate_identity, GroupStatus, Semaphore, ServiceConfig, TotalSlotsRequest};
use locksmith_engine::{LockError, Manager};
use thiserror::Error;
use tracing::{debug, error, info};

/// Errors returned to HTTP clients
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Lock(#[from] LockError),

    #[error("lock operation did not finish within {0:?}")]
    Timeout(Duration),
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::Lock(_) | ServerError::Timeout(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}

/// Shared handler state: the service configuration and the store to talk to
#[derive(Clone)]
pub struct AppState<C> {
    config: Arc<ServiceConfig>,
    connector: C,
}

enum LockOp<'a> {
    Acquire(&'a str),
    Release(&'a str),
    Resize(u64),
}

impl<C: StoreConnector> AppState<C> {
    pub fn new(config: ServiceConfig, connector: C) -> Self {
        Self {
            config: Arc::new(config),
            connector,
        }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    async fn manager(&self, group: &str) -> Result<Manager<C::Store>, LockError> {
        Manager::new(&self.connector, group, self.config.semaphore_slots).await
    }

    async fn apply(&self, group: &str, op: LockOp<'_>) -> Result<(), LockError> {
        let manager = self.manager(group).await?;
        let result = match op {
            LockOp::Acquire(id) => manager.recursive_lock(id).await,
            LockOp::Release(id) => manager.unlock_if_held(id).await,
            LockOp::Resize(total_slots) => manager.set_total_slots(total_slots).await,
        };
        manager.close();
        result
    }

    async fn status(&self, group: &str) -> Result<(Semaphore, Version), LockError> {
        let manager = self.manager(group).await?;
        let result = manager.status().await;
        manager.close();
        result
    }

    /// Run `work` under the configured lock timeout. Dropping `work` on expiry
    /// abandons any store call it had in flight.
    async fn with_deadline<T>(
        &self,
        work: impl Future<Output = Result<T, LockError>>,
    ) -> Result<T, ServerError> {
        let limit = self.config.lock_timeout;
        match tokio::time::timeout(limit, work).await {
            Ok(result) => result.map_err(ServerError::Lock),
            Err(_) => Err(ServerError::Timeout(limit)),
        }
    }
}

/// Build the daemon's router
pub fn router<C: StoreConnector>(state: AppState<C>) -> Router {
    Router::new()
        .route(PRE_REBOOT_ENDPOINT, post(pre_reboot::<C>))
        .route(STEADY_STATE_ENDPOINT, post(steady_state::<C>))
        .route(GROUP_SEMAPHORE_ENDPOINT, get(group_status::<C>))
        .route(GROUP_TOTAL_SLOTS_ENDPOINT, put(set_total_slots::<C>))
        .with_state(state)
}

async fn pre_reboot<C: StoreConnector>(
    State(state): State<AppState<C>>,
    body: Bytes,
) -> Result<(), ServerError> {
    debug!("pre-reboot request");

    let identity =
        validate_identity(&body).map_err(|e| ServerError::BadRequest(e.to_string()))?;

    state
        .with_deadline(state.apply(&identity.group, LockOp::Acquire(&identity.uuid)))
        .await
        .inspect_err(|e| {
            error!(group = %identity.group, uuid = %identity.uuid, error = %e, "failed to lock semaphore");
        })?;

    info!(group = %identity.group, uuid = %identity.uuid, "reboot slot granted");
    Ok(())
}

async fn steady_state<C: StoreConnector>(
    State(state): State<AppState<C>>,
    body: Bytes,
) -> Result<(), ServerError> {
    debug!("steady-state request");

    let identity =
        validate_identity(&body).map_err(|e| ServerError::BadRequest(e.to_string()))?;

    state
        .with_deadline(state.apply(&identity.group, LockOp::Release(&identity.uuid)))
        .await
        .inspect_err(|e| {
            error!(group = %identity.group, uuid = %identity.uuid, error = %e, "failed to unlock semaphore");
        })?;

    info!(group = %identity.group, uuid = %identity.uuid, "reboot slot released");
    Ok(())
}

async fn group_status<C: StoreConnector>(
    State(state): State<AppState<C>>,
    Path(group): Path<String>,
) -> Result<Json<GroupStatus>, ServerError> {
    let (sem, version) = state
        .with_deadline(state.status(&group))
        .await
        .inspect_err(|e| error!(%group, error = %e, "failed to read semaphore"))?;

    Ok(Json(GroupStatus {
        group,
        total_slots: sem.total_slots(),
        holders: sem.holders().to_vec(),
        version,
    }))
}

async fn set_total_slots<C: StoreConnector>(
    State(state): State<AppState<C>>,
    Path(group): Path<String>,
    body: Bytes,
) -> Result<(), ServerError> {
    let request: TotalSlotsRequest = serde_json::from_slice(&body)
        .map_err(|e| ServerError::BadRequest(format!("malformed request body: {e}")))?;
    if request.total_slots == 0 {
        return Err(ServerError::BadRequest(
            "total_slots must be at least 1".to_string(),
        ));
    }

    state
        .with_deadline(state.apply(&group, LockOp::Resize(request.total_slots)))
        .await
        .inspect_err(|e| error!(%group, error = %e, "failed to change capacity"))?;

    info!(%group, total_slots = request.total_slots, "capacity changed");
    Ok(())
}

#[cfg(test)]
#[path = "server_tests.rs"]
mod tests;
