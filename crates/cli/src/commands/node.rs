// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Node commands: take and release a reboot slot

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use locksmith_core::{Params, DEFAULT_GROUP};

use crate::client::LocksmithClient;

#[derive(clap::Args, Debug)]
pub struct NodeArgs {
    /// Reboot group this node belongs to
    #[arg(long, env = "LOCKSMITH_GROUP", default_value = DEFAULT_GROUP)]
    pub group: String,

    /// Node identifier [default: contents of --machine-id-file]
    #[arg(long, env = "LOCKSMITH_NODE_UUID")]
    pub uuid: Option<String>,

    /// File to read the node identifier from
    #[arg(long, value_name = "PATH", default_value = "/etc/machine-id")]
    pub machine_id_file: PathBuf,
}

impl NodeArgs {
    pub fn params(self) -> anyhow::Result<Params> {
        let node_uuid = match self.uuid {
            Some(uuid) => uuid,
            None => read_machine_id(&self.machine_id_file)?,
        };
        Ok(Params {
            current_version: None,
            node_uuid,
            group: self.group,
        })
    }
}

#[derive(clap::Args, Debug)]
pub struct PreRebootArgs {
    #[command(flatten)]
    pub node: NodeArgs,

    /// OS version to report alongside the request
    #[arg(long)]
    pub current_version: Option<String>,
}

impl PreRebootArgs {
    pub fn params(self) -> anyhow::Result<Params> {
        Ok(Params {
            current_version: self.current_version,
            ..self.node.params()?
        })
    }
}

/// Read a machine ID file, trimming the trailing newline
pub fn read_machine_id(path: &Path) -> anyhow::Result<String> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read node ID from {}", path.display()))?;
    let id = content.trim();
    if id.is_empty() {
        bail!("{} is empty, pass --uuid", path.display());
    }
    Ok(id.to_string())
}

pub fn pre_reboot(client: &LocksmithClient, args: PreRebootArgs) -> anyhow::Result<()> {
    let params = args.params()?;
    let (uuid, group) = (params.node_uuid.clone(), params.group.clone());

    client.pre_reboot(params)?;
    println!("Reboot slot held by {uuid} in group {group}");
    Ok(())
}

pub fn steady_state(client: &LocksmithClient, args: NodeArgs) -> anyhow::Result<()> {
    let params = args.params()?;
    let (uuid, group) = (params.node_uuid.clone(), params.group.clone());

    client.steady_state(params)?;
    println!("Reboot slot released by {uuid} in group {group}");
    Ok(())
}

#[cfg(test)]
#[path = "node_tests.rs"]
mod tests;
