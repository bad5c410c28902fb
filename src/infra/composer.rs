//! Composer subprocess boundary.

use std::io;
use std::process::{Command, ExitStatus, Stdio};

use tracing::debug;

/// Capability for invoking the dependency manager binary.
///
/// The dispatcher probes the binary during preflight and the operations run
/// `dump-autoload` after a mutation; tests swap in a fake rather than
/// intercepting process spawning.
pub trait CommandRunner {
    /// Execute the binary with no arguments as a status-only liveness check.
    fn probe(&self) -> bool;

    /// Execute the binary with `args`, streams inherited.
    fn run(&self, args: &[&str]) -> io::Result<ExitStatus>;
}

/// The real composer binary, on `$PATH` or at an explicit location.
pub struct Composer {
    binary: String,
}

impl Composer {
    pub fn new(binary: impl Into<String>) -> Self {
        Self { binary: binary.into() }
    }
}

impl CommandRunner for Composer {
    fn probe(&self) -> bool {
        // Output captured and discarded; only the exit status matters. A
        // present-but-non-executable file fails the spawn, a broken install
        // fails the status, both read as "no usable binary".
        match Command::new(&self.binary).stdin(Stdio::null()).output() {
            Ok(output) => output.status.success(),
            Err(err) => {
                debug!(binary = %self.binary, %err, "composer probe failed to spawn");
                false
            }
        }
    }

    fn run(&self, args: &[&str]) -> io::Result<ExitStatus> {
        debug!(binary = %self.binary, ?args, "invoking composer");
        Command::new(&self.binary).args(args).status()
    }
}
