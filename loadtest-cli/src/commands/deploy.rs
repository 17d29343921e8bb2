//! `deploy`: apply the manifest, wait for both deployments, print endpoints.

use crate::commands::info;
use crate::kubectl::Kubectl;
use anyhow::Result;
use loadtest_core::{ClusterConfig, ui};

pub fn run(cfg: &ClusterConfig) -> Result<()> {
    let kubectl = Kubectl::new(&cfg.namespace);

    ui::info(format!(
        "Deploying load-test stack to namespace '{}'",
        cfg.namespace
    ));
    kubectl.apply(&cfg.manifest_path())?;
    ui::success("Manifest applied");

    for deployment in [&cfg.frontend_deployment, &cfg.echo_deployment] {
        ui::info(format!(
            "Waiting for deployment/{} to become available (timeout {}s)...",
            deployment, cfg.wait_timeout_secs
        ));
        kubectl.wait_available(deployment, cfg.wait_timeout_secs)?;
        ui::success(format!("deployment/{} is available", deployment));
    }

    info::print_access_urls(cfg, &kubectl);
    ui::success("Deployment complete");
    Ok(())
}
