//! Daemon logging specs

use crate::prelude::*;
use nix::sys::signal::Signal;

#[test]
fn log_file_receives_daemon_logs() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("logs").join("locksmithd.log");

    let daemon = Daemon::start_with(&["--log-file", log.to_str().unwrap()]);
    daemon.pre_reboot("node-a", "g").passes();
    daemon.stop_with(Signal::SIGTERM);

    let content = std::fs::read_to_string(&log).unwrap();
    assert!(content.contains("daemon ready"), "log: {content}");
    assert!(content.contains("reboot slot granted"), "log: {content}");
    assert!(content.contains("received SIGTERM"), "log: {content}");
}

#[test]
fn failed_lock_is_logged_with_identity() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("locksmithd.log");

    let daemon = Daemon::start_with(&["--log-file", log.to_str().unwrap()]);
    daemon.pre_reboot("node-a", "g").passes();
    daemon.pre_reboot("node-b", "g").fails();
    daemon.stop_with(Signal::SIGTERM);

    let content = std::fs::read_to_string(&log).unwrap();
    assert!(content.contains("failed to lock semaphore"), "log: {content}");
    assert!(content.contains("uuid=node-b"), "log: {content}");
    assert!(content.contains("group=g"), "log: {content}");
}
