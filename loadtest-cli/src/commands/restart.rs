//! `restart`: rolling restart of both deployments, blocking on each rollout.

use crate::kubectl::Kubectl;
use anyhow::Result;
use loadtest_core::{ClusterConfig, ui};

pub fn run(cfg: &ClusterConfig) -> Result<()> {
    let kubectl = Kubectl::new(&cfg.namespace);

    for deployment in [&cfg.frontend_deployment, &cfg.echo_deployment] {
        ui::info(format!("Restarting deployment/{}...", deployment));
        if !kubectl.rollout_restart(deployment)? {
            anyhow::bail!("rollout restart failed for deployment/{}", deployment);
        }
    }

    for deployment in [&cfg.frontend_deployment, &cfg.echo_deployment] {
        ui::info(format!(
            "Waiting for deployment/{} rollout (timeout {}s)...",
            deployment, cfg.wait_timeout_secs
        ));
        kubectl.rollout_status(deployment, cfg.wait_timeout_secs)?;
        ui::success(format!("deployment/{} rolled out", deployment));
    }

    ui::success("Restart complete");
    Ok(())
}
