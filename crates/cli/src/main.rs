// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! locksmithctl - client for the locksmith reboot coordinator

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod client;
mod commands;
mod completions;
mod output;

use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{group, node};

use crate::client::LocksmithClient;

#[derive(Parser)]
#[command(
    name = "locksmithctl",
    version,
    about = "Locksmith - coordinate node reboots through locksmithd"
)]
struct Cli {
    /// locksmithd base URL
    #[arg(
        long,
        global = true,
        env = "LOCKSMITH_SERVER",
        default_value = "http://127.0.0.1:9999"
    )]
    server: String,

    /// Deadline for each request, e.g. "10s"
    #[arg(long, global = true, default_value = "10s", value_parser = humantime::parse_duration)]
    timeout: Duration,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Take a reboot slot for this node
    PreReboot(node::PreRebootArgs),
    /// Release this node's reboot slot
    SteadyState(node::NodeArgs),
    /// Show a group's slots and holders
    Status(group::StatusArgs),
    /// Change the number of reboot slots of a group
    SetSlots(group::SetSlotsArgs),
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Commands::Completions(args) = &cli.command {
        completions::generate_completions::<Cli>(args.shell);
        return Ok(());
    }

    let client = LocksmithClient::new(&cli.server, cli.timeout);

    match cli.command {
        Commands::PreReboot(args) => node::pre_reboot(&client, args),
        Commands::SteadyState(args) => node::steady_state(&client, args),
        Commands::Status(args) => group::status(&client, args),
        Commands::SetSlots(args) => group::set_slots(&client, args),
        Commands::Completions(_) => Ok(()),
    }
}
