// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Locksmith daemon (locksmithd)
//!
//! Hands out reboot slots to nodes over HTTP, one semaphore per group.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use locksmith_core::StoreBackend;
use locksmith_daemon::lifecycle::{self, LifecycleError, Overrides};
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "locksmithd", version, about = "Reboot coordination service")]
struct Args {
    /// TOML config file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Address to listen on [default: 0.0.0.0:9999]
    #[arg(long)]
    listen: Option<SocketAddr>,

    /// etcd endpoint (repeatable) [default: http://127.0.0.1:2379]
    #[arg(long = "etcd-url", value_name = "URL")]
    etcd_urls: Vec<String>,

    /// Deadline for each lock operation, e.g. "3s" [default: 3s]
    #[arg(long, value_parser = humantime::parse_duration)]
    lock_timeout: Option<Duration>,

    /// Capacity of groups created on first use [default: 1]
    #[arg(long)]
    slots: Option<u64>,

    /// Semaphore store
    #[arg(long, value_enum)]
    store: Option<StoreArg>,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StoreArg {
    Etcd,
    Memory,
}

impl From<StoreArg> for StoreBackend {
    fn from(arg: StoreArg) -> Self {
        match arg {
            StoreArg::Etcd => StoreBackend::Etcd,
            StoreArg::Memory => StoreBackend::Memory,
        }
    }
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            listen: self.listen,
            etcd_endpoints: self.etcd_urls.clone(),
            lock_timeout: self.lock_timeout,
            semaphore_slots: self.slots,
            backend: self.store.map(StoreBackend::from),
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let _log_guard = match lifecycle::setup_logging(args.log_file.as_deref()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("locksmithd: {e}");
            return ExitCode::FAILURE;
        }
    };

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("daemon failed: {e}");
            eprintln!("locksmithd: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), LifecycleError> {
    let config = lifecycle::load_config(args.config.as_deref(), args.overrides())?;

    let listener = lifecycle::startup(&config).await?;
    let addr = listener.local_addr()?;
    info!(%addr, "daemon ready");

    // Signal ready for whoever launched us
    println!("Listening on {addr}");

    lifecycle::serve(listener, config).await?;
    info!("daemon stopped");
    Ok(())
}
