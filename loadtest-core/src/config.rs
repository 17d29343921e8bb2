//! Orchestrator configuration.
//!
//! Reads an optional `loadtest.toml` from the working directory. Every field
//! has a default matching the demo stack, so the file only needs to exist
//! when something deviates (different registry, namespace, timeouts).

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "loadtest.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClusterConfig {
    /// Target namespace; overridable per invocation on the CLI.
    pub namespace: String,
    /// Path to the static Kubernetes manifest (tilde expanded).
    pub manifest: String,
    pub frontend_deployment: String,
    pub echo_deployment: String,
    pub frontend_service: String,
    pub echo_service: String,
    pub frontend_label: String,
    pub echo_label: String,
    pub frontend_port: u16,
    pub echo_port: u16,
    /// Registry prefix images are tagged with, e.g. `docker.io/loadtest`.
    pub registry: String,
    /// Default image tag suffix for the build orchestrator.
    pub version: String,
    /// Upper bound for availability and rollout waits.
    pub wait_timeout_secs: u64,
    /// Delay before probing freshly established port-forward sessions.
    pub settle_delay_secs: u64,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            namespace: "load-testing".to_string(),
            manifest: "k8s/load-test-stack.yaml".to_string(),
            frontend_deployment: "load-test-app".to_string(),
            echo_deployment: "vulnerable-echo-service".to_string(),
            frontend_service: "load-test-app-service".to_string(),
            echo_service: "vulnerable-echo-service".to_string(),
            frontend_label: "app=load-test-app".to_string(),
            echo_label: "app=vulnerable-echo-service".to_string(),
            frontend_port: 8080,
            echo_port: 8085,
            registry: "docker.io/loadtest".to_string(),
            version: "2.0".to_string(),
            wait_timeout_secs: 120,
            settle_delay_secs: 3,
        }
    }
}

impl ClusterConfig {
    /// Load config from `loadtest.toml` in `dir`, falling back to defaults
    /// when the file is absent.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(DEFAULT_CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Manifest path with `~` expanded to the home directory.
    pub fn manifest_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.manifest).as_ref())
    }

    /// Fully qualified image reference, e.g. `docker.io/loadtest/load-test-app:2.0`.
    pub fn image(&self, name: &str, tag: &str) -> String {
        format!("{}/{}:{}", self.registry, name, tag)
    }

    /// Host portion of the registry prefix, used for `docker login`.
    pub fn registry_host(&self) -> &str {
        self.registry.split('/').next().unwrap_or(&self.registry)
    }

    /// Cluster-internal base URL for a service, as seen from a probe pod.
    pub fn cluster_url(&self, service: &str, port: u16) -> String {
        format!(
            "http://{}.{}.svc.cluster.local:{}",
            service, self.namespace, port
        )
    }
}
