//! Daemon lifecycle specs
//!
//! Verify startup, configuration errors, and shutdown.

use crate::prelude::*;
use nix::sys::signal::Signal;

#[test]
fn daemon_reports_listen_address() {
    let daemon = Daemon::start();
    assert!(daemon.url().starts_with("http://127.0.0.1:"));
    assert!(!daemon.url().ends_with(":0"));
}

#[test]
fn daemon_exits_cleanly_on_sigterm() {
    let daemon = Daemon::start();
    let status = daemon.stop_with(Signal::SIGTERM);
    assert!(status.success(), "exit status: {status}");
}

#[test]
fn daemon_exits_cleanly_on_sigint() {
    let daemon = Daemon::start();
    let status = daemon.stop_with(Signal::SIGINT);
    assert!(status.success(), "exit status: {status}");
}

#[test]
fn zero_slots_is_rejected_at_startup() {
    daemon_cmd()
        .args(&["--store", "memory", "--listen", "127.0.0.1:0", "--slots", "0"])
        .fails()
        .stderr_has("semaphore_slots must be at least 1");
}

#[test]
fn missing_config_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");

    daemon_cmd()
        .args(&["--config", path.to_str().unwrap()])
        .fails()
        .stderr_has("failed to read config");
}

#[test]
fn malformed_config_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "locksmith.toml", "semaphore_slots = \"many\"\n");

    daemon_cmd()
        .args(&["--config", &path])
        .fails()
        .stderr_has("invalid config syntax");
}

#[test]
fn config_file_sets_capacity() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        dir.path(),
        "locksmith.toml",
        "semaphore_slots = 2\n\n[store]\nbackend = \"memory\"\n",
    );
    let daemon = Daemon::start_with(&["--config", &path]);

    daemon.pre_reboot("node-a", "g").passes();
    daemon.pre_reboot("node-b", "g").passes();
    daemon.pre_reboot("node-c", "g").fails();
}

#[test]
fn occupied_port_is_reported() {
    let daemon = Daemon::start();
    let addr = daemon.url().trim_start_matches("http://").to_string();

    daemon_cmd()
        .args(&["--store", "memory", "--listen", &addr])
        .fails()
        .stderr_has("failed to bind");
}
