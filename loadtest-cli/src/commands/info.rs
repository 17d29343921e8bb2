//! `info`: recompute and print the externally reachable access URLs.
//!
//! Everything here is derived from live cluster queries and never
//! persisted. Values the cluster has not assigned are omitted.

use crate::kubectl::Kubectl;
use anyhow::Result;
use loadtest_core::cluster::{self, AccessUrls};
use loadtest_core::{ClusterConfig, ui};

pub fn run(cfg: &ClusterConfig) -> Result<()> {
    let kubectl = Kubectl::new(&cfg.namespace);
    print_access_urls(cfg, &kubectl);
    Ok(())
}

/// Query the cluster and print whatever endpoints exist. Shared with
/// `deploy`, which prints the same block after a successful rollout.
pub fn print_access_urls(cfg: &ClusterConfig, kubectl: &Kubectl) {
    let urls = derive_access_urls(cfg, kubectl);

    println!();
    ui::info("Access endpoints:");

    if let Some(url) = &urls.load_balancer {
        println!("   Load balancer: {}", url);
    }
    if let Some(url) = &urls.node_port {
        println!("   Node port:     {}", url);
    }
    if let Some(url) = &urls.ingress {
        println!("   Ingress:       {}", url);
    }
    if urls.is_empty() {
        ui::info("No external endpoints assigned yet");
    }
}

fn derive_access_urls(cfg: &ClusterConfig, kubectl: &Kubectl) -> AccessUrls {
    let mut urls = AccessUrls::default();

    if let Ok(svc) = kubectl.get_json("service", &cfg.frontend_service) {
        urls.load_balancer = cluster::load_balancer_endpoint(&svc, cfg.frontend_port);

        if let Some(port) = cluster::node_port(&svc) {
            if let Some(node) = kubectl
                .get_nodes_json()
                .ok()
                .as_ref()
                .and_then(cluster::node_address)
            {
                urls.node_port = Some(format!("http://{}:{}", node, port));
            }
        }
    }

    if let Ok(ingresses) = kubectl.get_json_list("ingress") {
        urls.ingress = cluster::ingress_endpoint(&ingresses);
    }

    urls
}
