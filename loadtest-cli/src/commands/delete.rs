//! `delete`: interactively confirmed removal of all manifest resources.

use crate::kubectl::Kubectl;
use anyhow::{Context, Result};
use loadtest_core::{ClusterConfig, ui};
use std::io::{BufRead, Write};

pub fn run(cfg: &ClusterConfig) -> Result<()> {
    ui::warn(format!(
        "This deletes every resource defined by {} in namespace '{}'",
        cfg.manifest, cfg.namespace
    ));
    print!("Proceed? [y/N] ");
    std::io::stdout().flush().context("Failed to flush stdout")?;

    let mut answer = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("Failed to read confirmation")?;

    if !confirmed(&answer) {
        ui::info("Aborted - nothing was deleted");
        return Ok(());
    }

    let kubectl = Kubectl::new(&cfg.namespace);
    kubectl.delete_manifest(&cfg.manifest_path())?;
    ui::success("Resources deleted");
    Ok(())
}

/// Only an explicit yes proceeds; empty input or anything else declines.
pub fn confirmed(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirmed_accepts_explicit_yes() {
        assert!(confirmed("y\n"));
        assert!(confirmed("Y\n"));
        assert!(confirmed("yes\n"));
    }

    #[test]
    fn test_confirmed_declines_everything_else() {
        assert!(!confirmed(""));
        assert!(!confirmed("\n"));
        assert!(!confirmed("n\n"));
        assert!(!confirmed("no\n"));
        assert!(!confirmed("yep\n"));
        assert!(!confirmed(" maybe \n"));
    }
}
