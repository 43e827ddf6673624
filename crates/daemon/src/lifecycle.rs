// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon lifecycle: configuration, logging, startup, shutdown.

use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use locksmith_adapters::{EtcdConnector, MemoryConnector, StoreConnector, TracedConnector};
use locksmith_core::{ConfigError, ServiceConfig, StoreBackend};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::signal::unix::{signal, SignalKind};
use tracing::{info, warn};

use crate::server::{router, AppState};

/// Command-line values that take precedence over the config file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub listen: Option<SocketAddr>,
    pub etcd_endpoints: Vec<String>,
    pub lock_timeout: Option<Duration>,
    pub semaphore_slots: Option<u64>,
    pub backend: Option<StoreBackend>,
}

impl Overrides {
    pub fn apply(self, mut config: ServiceConfig) -> ServiceConfig {
        if let Some(listen) = self.listen {
            config.listen = listen;
        }
        if !self.etcd_endpoints.is_empty() {
            config.store.endpoints = self.etcd_endpoints;
        }
        if let Some(lock_timeout) = self.lock_timeout {
            config.lock_timeout = lock_timeout;
        }
        if let Some(slots) = self.semaphore_slots {
            config.semaphore_slots = slots;
        }
        if let Some(backend) = self.backend {
            config.store.backend = backend;
        }
        config
    }
}

/// Load the config file (or defaults), apply overrides, and validate.
pub fn load_config(
    path: Option<&Path>,
    overrides: Overrides,
) -> Result<ServiceConfig, LifecycleError> {
    let base = match path {
        Some(path) => ServiceConfig::load(path)?,
        None => ServiceConfig::default(),
    };
    let config = overrides.apply(base);
    config.validate()?;
    Ok(config)
}

/// Set up tracing to stderr, or to `log_file` when given.
///
/// The returned guard flushes the file writer on drop; keep it alive for the
/// life of the process.
pub fn setup_logging(
    log_file: Option<&Path>,
) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>, LifecycleError> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let Some(log_file) = log_file else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
        return Ok(None);
    };

    let dir = match log_file.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;
    let name = log_file
        .file_name()
        .ok_or_else(|| LifecycleError::LogPath(log_file.display().to_string()))?;

    let file_appender = tracing_appender::rolling::never(dir, name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    Ok(Some(guard))
}

/// Bind the HTTP listener
pub async fn startup(config: &ServiceConfig) -> Result<TcpListener, LifecycleError> {
    TcpListener::bind(config.listen)
        .await
        .map_err(|source| LifecycleError::Bind {
            addr: config.listen,
            source,
        })
}

/// Serve requests on `listener` until SIGTERM or SIGINT
pub async fn serve(listener: TcpListener, config: ServiceConfig) -> Result<(), LifecycleError> {
    match config.store.backend {
        StoreBackend::Etcd => {
            let connector = TracedConnector::new(EtcdConnector::new(
                config.store.endpoints.clone(),
                config.lock_timeout,
            ));
            info!(endpoints = ?config.store.endpoints, "using etcd store");
            run(listener, AppState::new(config, connector)).await
        }
        StoreBackend::Memory => {
            warn!("using in-process memory store, state is lost on exit");
            let connector = TracedConnector::new(MemoryConnector::default());
            run(listener, AppState::new(config, connector)).await
        }
    }
}

async fn run<C: StoreConnector>(
    listener: TcpListener,
    state: AppState<C>,
) -> Result<(), LifecycleError> {
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    info!(
        slots = state.config().semaphore_slots,
        lock_timeout = ?state.config().lock_timeout,
        "serving requests"
    );

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async move {
            tokio::select! {
                _ = sigterm.recv() => info!("received SIGTERM, shutting down"),
                _ = sigint.recv() => info!("received SIGINT, shutting down"),
            }
        })
        .await?;

    Ok(())
}

/// Errors from starting or running the daemon
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid log file path: {0}")]
    LogPath(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
