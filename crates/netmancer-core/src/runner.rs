// ── External command execution ──
//
// Every OS tool invocation goes through `CommandRunner`, so the `Host`
// facade can be driven by scripted output in tests.

use std::process::Command;

use tracing::{debug, trace};

use crate::error::CoreError;

/// Runs a program to completion and returns its stdout.
pub trait CommandRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<String, CoreError>;

    /// Whether commands run with root privileges.
    fn is_root(&self) -> bool {
        effective_uid_is_root()
    }
}

#[cfg(unix)]
fn effective_uid_is_root() -> bool {
    nix::unistd::geteuid().is_root()
}

#[cfg(not(unix))]
fn effective_uid_is_root() -> bool {
    false
}

/// Runs real processes with `std::process::Command`.
///
/// Output is requested in the C locale so state strings such as
/// `connected` are not translated.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<String, CoreError> {
        debug!(program, ?args, "running external command");

        let output = Command::new(program)
            .args(args)
            .env("LC_ALL", "C")
            .output()
            .map_err(|source| CoreError::CommandSpawn {
                program: program.into(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_owned();
            let message = if stderr.is_empty() {
                format!("exited with {}", output.status)
            } else {
                stderr
            };
            return Err(CoreError::CommandFailed {
                program: program.into(),
                status: output.status.code(),
                message,
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        trace!(program, bytes = stdout.len(), "command finished");
        Ok(stdout)
    }
}
