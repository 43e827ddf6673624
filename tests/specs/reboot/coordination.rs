//! Reboot coordination specs
//!
//! Nodes take and release reboot slots through locksmithctl.

use crate::prelude::*;

#[test]
fn single_slot_serializes_reboots() {
    let daemon = Daemon::start();

    daemon
        .pre_reboot("node-a", "g")
        .passes()
        .stdout_has("Reboot slot held by node-a in group g");
    daemon
        .pre_reboot("node-b", "g")
        .fails()
        .stderr_has("all 1 slots are held");
    daemon
        .steady_state("node-a", "g")
        .passes()
        .stdout_has("Reboot slot released by node-a");
    daemon.pre_reboot("node-b", "g").passes();
}

#[test]
fn repeated_pre_reboot_keeps_slot() {
    let daemon = Daemon::start();

    daemon.pre_reboot("node-a", "g").passes();
    daemon.pre_reboot("node-a", "g").passes();

    daemon
        .ctl()
        .args(&["status", "--group", "g", "-o", "json"])
        .passes()
        .stdout_has(r#""holders": [
    "node-a"
  ]"#);
}

#[test]
fn steady_state_without_slot_passes() {
    let daemon = Daemon::start();
    daemon.steady_state("node-a", "g").passes();
}

#[test]
fn empty_group_is_rejected() {
    let daemon = Daemon::start();

    daemon
        .pre_reboot("node-a", "")
        .fails()
        .stderr_has("(400): empty group");
}

#[test]
fn node_id_comes_from_machine_id_file() {
    let daemon = Daemon::start();
    let dir = tempfile::tempdir().unwrap();
    let machine_id = write_file(dir.path(), "machine-id", "0f3b9c\n");

    daemon
        .ctl()
        .args(&["pre-reboot", "--group", "g", "--machine-id-file", &machine_id])
        .passes()
        .stdout_has("held by 0f3b9c");
    daemon.pre_reboot("0f3b9c", "g").passes();
}

#[test]
fn default_group_is_used_without_flag() {
    let daemon = Daemon::start();

    daemon
        .ctl()
        .args(&["pre-reboot", "--uuid", "node-a"])
        .passes()
        .stdout_has("in group default");
    daemon
        .ctl()
        .args(&["status"])
        .passes()
        .stdout_has("node-a");
}

#[test]
fn status_text_after_one_lock() {
    let daemon = Daemon::start();
    daemon.pre_reboot("node-a", "g").passes();

    let out = daemon
        .ctl()
        .args(&["status", "--group", "g"])
        .passes()
        .stdout();
    similar_asserts::assert_eq!(
        out,
        "Group:    g\nSlots:    1 of 1 held\nHolders:\n  node-a\nVersion:  2\n"
    );
}
