//! `status`: best-effort report over every resource kind in the namespace.
//!
//! Partial-result tolerant by contract: each query is attempted regardless
//! of earlier failures, and a failed query degrades to a warning. The
//! command itself always exits zero.

use crate::kubectl::Kubectl;
use anyhow::Result;
use loadtest_core::cluster;
use loadtest_core::{ClusterConfig, ui};

const RESOURCE_KINDS: &[(&str, &str)] = &[
    ("deployments", "Deployments"),
    ("pods", "Pods"),
    ("services", "Services"),
    ("ingress", "Ingress"),
    ("pvc", "Persistent volume claims"),
    ("hpa", "Horizontal pod autoscalers"),
];

pub fn run(cfg: &ClusterConfig) -> Result<()> {
    let kubectl = Kubectl::new(&cfg.namespace);

    ui::info(format!("Cluster status for namespace '{}'", cfg.namespace));

    if !kubectl.namespace_exists(&cfg.namespace) {
        ui::warn(format!("Namespace '{}' not found", cfg.namespace));
    }

    for (kind, title) in RESOURCE_KINDS {
        ui::heading(title);
        if !kubectl.print_table(kind) {
            ui::warn(format!("Could not list {}", kind));
        }
    }

    ui::heading("Resource usage");
    if !kubectl.top_pods() {
        ui::warn("Metrics unavailable (is metrics-server installed?)");
    }

    ui::heading("Pod health");
    match kubectl.get_json_list("pods") {
        Ok(pods) => print_pod_health(&cluster::pod_health(&pods)),
        Err(e) => ui::warn(format!("Could not derive pod health: {}", e)),
    }

    Ok(())
}

fn print_pod_health(rows: &[cluster::PodHealth]) {
    if rows.is_empty() {
        ui::info("No pods found");
        return;
    }

    println!("   {:<44} {:>7} {:>12} {:>9}", "POD", "READY", "PHASE", "RESTARTS");
    for pod in rows {
        let marker = if pod.is_healthy() { "✅" } else { "⚠️" };
        println!(
            "{} {:<44} {:>5}/{} {:>12} {:>9}",
            marker, pod.name, pod.ready, pod.total, pod.phase, pod.restarts
        );
    }
}
