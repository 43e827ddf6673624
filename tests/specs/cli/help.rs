//! Help output specs

use crate::prelude::*;

#[test]
fn ctl_help_lists_commands() {
    ctl()
        .args(&["--help"])
        .passes()
        .stdout_has("pre-reboot")
        .stdout_has("steady-state")
        .stdout_has("status")
        .stdout_has("set-slots")
        .stdout_has("completions");
}

#[test]
fn ctl_pre_reboot_help_shows_identity_flags() {
    ctl()
        .args(&["pre-reboot", "--help"])
        .passes()
        .stdout_has("--group")
        .stdout_has("--uuid")
        .stdout_has("/etc/machine-id")
        .stdout_has("--current-version");
}

#[test]
fn daemon_help_lists_flags() {
    daemon_cmd()
        .args(&["--help"])
        .passes()
        .stdout_has("--config")
        .stdout_has("--etcd-url")
        .stdout_has("--lock-timeout")
        .stdout_has("--slots")
        .stdout_has("--store");
}

#[test]
fn ctl_generates_completions() {
    ctl()
        .args(&["completions", "bash"])
        .passes()
        .stdout_has("locksmithctl");
}
