//! Shared helpers for the behavioral specs

use std::io::{BufRead, BufReader};
use std::path::Path;
use std::process::{Child, Command as StdCommand, ExitStatus, Stdio};
use std::time::{Duration, Instant};

use assert_cmd::assert::Assert;
use assert_cmd::Command;
use nix::sys::signal::{kill, Signal};
use nix::unistd::Pid;
use predicates::str::contains;

const ENV_VARS: &[&str] = &[
    "LOCKSMITH_SERVER",
    "LOCKSMITH_GROUP",
    "LOCKSMITH_NODE_UUID",
    "RUST_LOG",
];

/// locksmithctl invocation
pub fn ctl() -> Cli {
    Cli::new("locksmithctl")
}

/// locksmithd invocation that is expected to exit on its own
pub fn daemon_cmd() -> Cli {
    Cli::new("locksmithd")
}

pub struct Cli {
    cmd: Command,
}

impl Cli {
    fn new(bin: &str) -> Self {
        let mut cmd = Command::cargo_bin(bin).unwrap();
        for var in ENV_VARS {
            cmd.env_remove(var);
        }
        cmd.timeout(Duration::from_secs(20));
        Self { cmd }
    }

    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.cmd.env(key, value);
        self
    }

    pub fn passes(mut self) -> Run {
        Run {
            assert: self.cmd.assert().success(),
        }
    }

    pub fn fails(mut self) -> Run {
        Run {
            assert: self.cmd.assert().failure(),
        }
    }
}

pub struct Run {
    assert: Assert,
}

impl Run {
    pub fn stdout_has(self, expected: &str) -> Self {
        Self {
            assert: self.assert.stdout(contains(expected)),
        }
    }

    pub fn stderr_has(self, expected: &str) -> Self {
        Self {
            assert: self.assert.stderr(contains(expected)),
        }
    }

    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.assert.get_output().stdout).into_owned()
    }
}

/// A running locksmithd on an ephemeral port, killed on drop
pub struct Daemon {
    child: Option<Child>,
    url: String,
}

impl Daemon {
    /// Start with the in-memory store and a single slot per group
    pub fn start() -> Self {
        Self::start_with(&[])
    }

    pub fn start_with(extra: &[&str]) -> Self {
        let mut cmd = StdCommand::new(assert_cmd::cargo::cargo_bin("locksmithd"));
        for var in ENV_VARS {
            cmd.env_remove(var);
        }
        let mut child = cmd
            .args(["--store", "memory", "--listen", "127.0.0.1:0"])
            .args(extra)
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .unwrap();

        let stdout = child.stdout.take().unwrap();
        let mut line = String::new();
        BufReader::new(stdout).read_line(&mut line).unwrap();
        let addr = line
            .trim()
            .strip_prefix("Listening on ")
            .unwrap_or_else(|| panic!("unexpected first line from locksmithd: {line:?}"))
            .to_string();

        Self {
            child: Some(child),
            url: format!("http://{addr}"),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// locksmithctl pointed at this daemon
    pub fn ctl(&self) -> Cli {
        ctl().env("LOCKSMITH_SERVER", &self.url)
    }

    /// `pre-reboot` for `uuid` in `group`
    pub fn pre_reboot(&self, uuid: &str, group: &str) -> Cli {
        self.ctl()
            .args(&["pre-reboot", "--uuid", uuid, "--group", group])
    }

    /// `steady-state` for `uuid` in `group`
    pub fn steady_state(&self, uuid: &str, group: &str) -> Cli {
        self.ctl()
            .args(&["steady-state", "--uuid", uuid, "--group", group])
    }

    /// Deliver `signal` and wait for the process to exit
    pub fn stop_with(mut self, signal: Signal) -> ExitStatus {
        let mut child = self.child.take().unwrap();
        kill(Pid::from_raw(child.id() as i32), signal).unwrap();

        let deadline = Instant::now() + Duration::from_secs(10);
        loop {
            if let Some(status) = child.try_wait().unwrap() {
                return status;
            }
            if Instant::now() > deadline {
                let _ = child.kill();
                panic!("locksmithd did not exit after {signal:?}");
            }
            std::thread::sleep(Duration::from_millis(20));
        }
    }
}

impl Drop for Daemon {
    fn drop(&mut self) {
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

/// Write `content` to `dir/name` and return the path as a string
pub fn write_file(dir: &Path, name: &str, content: &str) -> String {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path.display().to_string()
}
