//! CLI error handling specs

use crate::prelude::*;

#[test]
fn unknown_command_fails() {
    ctl()
        .args(&["reboot-now"])
        .fails()
        .stderr_has("unrecognized subcommand");
}

#[test]
fn unreachable_server_fails() {
    ctl()
        .args(&["--server", "http://127.0.0.1:1", "--timeout", "2s"])
        .args(&["pre-reboot", "--uuid", "node-a"])
        .fails()
        .stderr_has("request to http://127.0.0.1:1/v1/pre-reboot failed");
}

#[test]
fn missing_machine_id_fails_before_contacting_server() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("machine-id");

    ctl()
        .args(&["--server", "http://127.0.0.1:1"])
        .args(&["pre-reboot", "--machine-id-file", missing.to_str().unwrap()])
        .fails()
        .stderr_has("failed to read node ID");
}

#[test]
fn zero_slots_is_rejected_locally() {
    ctl()
        .args(&["--server", "http://127.0.0.1:1", "set-slots", "0"])
        .fails()
        .stderr_has("at least 1");
}

#[test]
fn invalid_timeout_is_rejected() {
    ctl()
        .args(&["--timeout", "soon", "status"])
        .fails()
        .stderr_has("--timeout");
}

#[test]
fn steady_state_rejects_current_version() {
    ctl()
        .args(&["steady-state", "--uuid", "node-a", "--current-version", "1.0"])
        .fails()
        .stderr_has("unexpected argument '--current-version'");
}
