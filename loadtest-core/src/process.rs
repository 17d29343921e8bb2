//! Subprocess runner for external tools.
//!
//! Everything the orchestrators do on the cluster or the container daemon
//! goes through these helpers: one for streaming output straight to the
//! operator, one for capturing it, and a PATH lookup.

use anyhow::{Context, Result};
use std::ffi::OsStr;
use std::path::PathBuf;
use std::process::Command;
use tracing::debug;

/// Captured output of a finished command.
pub struct CmdOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

/// Check if a binary exists in PATH.
pub fn find_binary(name: &str) -> Option<PathBuf> {
    Command::new("which")
        .arg(name)
        .output()
        .ok()
        .and_then(|output| {
            if output.status.success() {
                String::from_utf8(output.stdout)
                    .ok()
                    .map(|s| PathBuf::from(s.trim()))
            } else {
                None
            }
        })
}

pub fn command_exists(name: &str) -> bool {
    find_binary(name).is_some()
}

/// Run a command with inherited stdio so the operator sees the tool's own
/// output live. Returns whether the command exited successfully; spawn
/// failures are errors.
pub fn run_streamed<S: AsRef<OsStr>>(program: &str, args: &[S]) -> Result<bool> {
    debug!(program, args = ?args.iter().map(|a| a.as_ref().to_string_lossy().into_owned()).collect::<Vec<_>>(), "exec (streamed)");

    let status = Command::new(program)
        .args(args)
        .status()
        .with_context(|| format!("Failed to execute {}", program))?;

    Ok(status.success())
}

/// Run a command capturing stdout/stderr.
pub fn run_capture<S: AsRef<OsStr>>(program: &str, args: &[S]) -> Result<CmdOutput> {
    debug!(program, args = ?args.iter().map(|a| a.as_ref().to_string_lossy().into_owned()).collect::<Vec<_>>(), "exec (captured)");

    let output = Command::new(program)
        .args(args)
        .output()
        .with_context(|| format!("Failed to execute {}", program))?;

    Ok(CmdOutput {
        success: output.status.success(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_capture_success() {
        let out = run_capture("echo", &["hello"]).unwrap();
        assert!(out.success);
        assert!(out.stdout.contains("hello"));
    }

    #[test]
    fn test_run_capture_spawn_failure() {
        let result = run_capture::<&str>("nonexistent_command_12345", &[]);
        assert!(result.is_err());
    }

    #[test]
    fn test_run_streamed_nonzero_exit() {
        let ok = run_streamed("false", &[] as &[&str]).unwrap();
        assert!(!ok);
    }

    #[test]
    fn test_find_binary() {
        assert!(find_binary("sh").is_some());
        assert!(find_binary("nonexistent_command_12345").is_none());
    }
}
