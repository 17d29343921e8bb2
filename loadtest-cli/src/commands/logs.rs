//! `logs`: last 50 timestamped lines from both workloads, selected by label.

use crate::kubectl::Kubectl;
use anyhow::Result;
use loadtest_core::{ClusterConfig, ui};

const TAIL_LINES: u32 = 50;

pub fn run(cfg: &ClusterConfig) -> Result<()> {
    let kubectl = Kubectl::new(&cfg.namespace);

    for (name, label) in [
        (&cfg.frontend_deployment, &cfg.frontend_label),
        (&cfg.echo_deployment, &cfg.echo_label),
    ] {
        ui::heading(format!("Logs: {} (last {} lines)", name, TAIL_LINES));
        kubectl.print_logs(label, TAIL_LINES)?;
    }

    Ok(())
}
