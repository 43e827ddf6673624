// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Group commands: inspect and resize a group's semaphore

use std::fmt;

use locksmith_core::{GroupStatus, DEFAULT_GROUP};
use serde::Serialize;

use crate::client::LocksmithClient;
use crate::output::{self, OutputFormat};

#[derive(clap::Args, Debug)]
pub struct StatusArgs {
    /// Group to inspect
    #[arg(long, env = "LOCKSMITH_GROUP", default_value = DEFAULT_GROUP)]
    pub group: String,

    #[arg(long, short, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,
}

#[derive(clap::Args, Debug)]
pub struct SetSlotsArgs {
    /// New number of reboot slots
    pub total_slots: u64,

    /// Group to resize
    #[arg(long, env = "LOCKSMITH_GROUP", default_value = DEFAULT_GROUP)]
    pub group: String,
}

#[derive(Serialize)]
#[serde(transparent)]
struct StatusReport(GroupStatus);

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = &self.0;
        writeln!(f, "Group:    {}", status.group)?;
        writeln!(
            f,
            "Slots:    {} of {} held",
            status.holders.len(),
            status.total_slots
        )?;
        if status.holders.is_empty() {
            writeln!(f, "Holders:  (none)")?;
        } else {
            writeln!(f, "Holders:")?;
            for holder in &status.holders {
                writeln!(f, "  {holder}")?;
            }
        }
        write!(f, "Version:  {}", status.version)
    }
}

pub fn status(client: &LocksmithClient, args: StatusArgs) -> anyhow::Result<()> {
    let report = StatusReport(client.status(&args.group)?);
    output::print(&report, args.output)
}

pub fn set_slots(client: &LocksmithClient, args: SetSlotsArgs) -> anyhow::Result<()> {
    if args.total_slots == 0 {
        anyhow::bail!("total slots must be at least 1");
    }
    client.set_total_slots(&args.group, args.total_slots)?;
    println!(
        "Group {} now has {} reboot slots",
        args.group, args.total_slots
    );
    Ok(())
}

#[cfg(test)]
#[path = "group_tests.rs"]
mod tests;
