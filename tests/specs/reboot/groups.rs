//! Group administration specs

use crate::prelude::*;

#[test]
fn groups_have_independent_slots() {
    let daemon = Daemon::start();

    daemon.pre_reboot("node-a", "east").passes();
    daemon.pre_reboot("node-b", "west").passes();
}

#[test]
fn status_shows_capacity_and_holders() {
    let daemon = Daemon::start_with(&["--slots", "3"]);
    daemon.pre_reboot("node-b", "rack 1").passes();
    daemon.pre_reboot("node-a", "rack 1").passes();

    daemon
        .ctl()
        .args(&["status", "--group", "rack 1"])
        .passes()
        .stdout_has("Group:    rack 1")
        .stdout_has("Slots:    2 of 3 held")
        .stdout_has("  node-a\n  node-b");
}

#[test]
fn set_slots_admits_more_nodes() {
    let daemon = Daemon::start();
    daemon.pre_reboot("node-a", "g").passes();
    daemon.pre_reboot("node-b", "g").fails();

    daemon
        .ctl()
        .args(&["set-slots", "2", "--group", "g"])
        .passes()
        .stdout_has("Group g now has 2 reboot slots");
    daemon.pre_reboot("node-b", "g").passes();
}

#[test]
fn set_slots_below_holders_fails() {
    let daemon = Daemon::start_with(&["--slots", "2"]);
    daemon.pre_reboot("node-a", "g").passes();
    daemon.pre_reboot("node-b", "g").passes();

    daemon
        .ctl()
        .args(&["set-slots", "1", "--group", "g"])
        .fails()
        .stderr_has("cannot shrink semaphore to 1 slots");
}
