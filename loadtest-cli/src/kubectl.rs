//! Thin wrapper around the `kubectl` binary.
//!
//! Per design, the orchestrator does not speak to the Kubernetes API
//! directly - every cluster operation is a `kubectl` invocation scoped to
//! the target namespace. Fatal failures map onto the error taxonomy;
//! best-effort queries return plain booleans so the status report can
//! degrade to warnings.

use anyhow::Result;
use loadtest_core::OrchestratorError;
use loadtest_core::process::{run_capture, run_streamed};
use serde_json::Value;
use std::path::Path;
use tracing::debug;

pub struct Kubectl {
    namespace: String,
}

impl Kubectl {
    pub fn new(namespace: &str) -> Self {
        Self {
            namespace: namespace.to_string(),
        }
    }

    /// `kubectl cluster-info`, used as the reachability pre-flight check.
    pub fn cluster_reachable() -> Result<(), OrchestratorError> {
        match run_capture("kubectl", &["cluster-info"]) {
            Ok(out) if out.success => Ok(()),
            Ok(out) => Err(OrchestratorError::ClusterUnreachable {
                detail: first_line(&out.stderr),
            }),
            Err(e) => Err(OrchestratorError::ClusterUnreachable {
                detail: e.to_string(),
            }),
        }
    }

    pub fn apply(&self, manifest: &Path) -> Result<()> {
        let path = manifest.display().to_string();
        let ok = run_streamed("kubectl", &["apply", "-f", path.as_str(), "-n", self.namespace.as_str()])?;
        if !ok {
            return Err(OrchestratorError::ApplyFailed { path }.into());
        }
        Ok(())
    }

    pub fn delete_manifest(&self, manifest: &Path) -> Result<()> {
        let path = manifest.display().to_string();
        let ok = run_streamed(
            "kubectl",
            &["delete", "-f", path.as_str(), "-n", self.namespace.as_str(), "--ignore-not-found"],
        )?;
        if !ok {
            return Err(OrchestratorError::DeleteFailed { path }.into());
        }
        Ok(())
    }

    /// Block until the deployment reports the `Available` condition, bounded
    /// by `timeout_secs`. Exceeding the bound is fatal, never retried.
    pub fn wait_available(&self, deployment: &str, timeout_secs: u64) -> Result<()> {
        let target = format!("deployment/{}", deployment);
        let timeout = format!("--timeout={}s", timeout_secs);
        let ok = run_streamed(
            "kubectl",
            &[
                "wait",
                "--for=condition=available",
                target.as_str(),
                timeout.as_str(),
                "-n",
                self.namespace.as_str(),
            ],
        )?;
        if !ok {
            return Err(OrchestratorError::RolloutTimeout {
                deployment: deployment.to_string(),
                timeout_secs,
            }
            .into());
        }
        Ok(())
    }

    pub fn rollout_restart(&self, deployment: &str) -> Result<bool> {
        let target = format!("deployment/{}", deployment);
        run_streamed(
            "kubectl",
            &["rollout", "restart", target.as_str(), "-n", self.namespace.as_str()],
        )
    }

    /// Block until a restarted deployment finishes rolling out, bounded by
    /// `timeout_secs`.
    pub fn rollout_status(&self, deployment: &str, timeout_secs: u64) -> Result<()> {
        let target = format!("deployment/{}", deployment);
        let timeout = format!("--timeout={}s", timeout_secs);
        let ok = run_streamed(
            "kubectl",
            &["rollout", "status", target.as_str(), timeout.as_str(), "-n", self.namespace.as_str()],
        )?;
        if !ok {
            return Err(OrchestratorError::RolloutTimeout {
                deployment: deployment.to_string(),
                timeout_secs,
            }
            .into());
        }
        Ok(())
    }

    /// Fetch a single namespaced resource as JSON. Best-effort: `Err` means
    /// the query failed or produced unparseable output.
    pub fn get_json(&self, kind: &str, name: &str) -> Result<Value> {
        let out = run_capture(
            "kubectl",
            &["get", kind, name, "-n", self.namespace.as_str(), "-o", "json"],
        )?;
        if !out.success {
            anyhow::bail!("kubectl get {} {} failed: {}", kind, name, first_line(&out.stderr));
        }
        parse_json(&out.stdout)
    }

    /// Fetch a resource listing (`{"items": [...]}`) as JSON.
    pub fn get_json_list(&self, kind: &str) -> Result<Value> {
        let out = run_capture(
            "kubectl",
            &["get", kind, "-n", self.namespace.as_str(), "-o", "json"],
        )?;
        if !out.success {
            anyhow::bail!("kubectl get {} failed: {}", kind, first_line(&out.stderr));
        }
        parse_json(&out.stdout)
    }

    /// Cluster-scoped listing (nodes) as JSON.
    pub fn get_nodes_json(&self) -> Result<Value> {
        let out = run_capture("kubectl", &["get", "nodes", "-o", "json"])?;
        if !out.success {
            anyhow::bail!("kubectl get nodes failed: {}", first_line(&out.stderr));
        }
        parse_json(&out.stdout)
    }

    /// Stream a `kubectl get <kind>` table to the operator. Returns whether
    /// the query succeeded; the status report downgrades failures to
    /// warnings.
    pub fn print_table(&self, kind: &str) -> bool {
        run_streamed("kubectl", &["get", kind, "-n", self.namespace.as_str()]).unwrap_or(false)
    }

    pub fn namespace_exists(&self, namespace: &str) -> bool {
        run_capture("kubectl", &["get", "namespace", namespace])
            .map(|out| out.success)
            .unwrap_or(false)
    }

    /// `kubectl top pods`; requires metrics-server, so failure is expected
    /// on bare clusters.
    pub fn top_pods(&self) -> bool {
        run_streamed("kubectl", &["top", "pods", "-n", self.namespace.as_str()]).unwrap_or(false)
    }

    /// Print the last `tail` timestamped lines from pods selected by label.
    /// Missing logs print nothing.
    pub fn print_logs(&self, label: &str, tail: u32) -> Result<()> {
        let selector = format!("-l{}", label);
        let tail_arg = format!("--tail={}", tail);
        let out = run_capture(
            "kubectl",
            &[
                "logs",
                selector.as_str(),
                tail_arg.as_str(),
                "--timestamps",
                "--all-containers",
                "-n",
                self.namespace.as_str(),
            ],
        )?;
        if out.success && !out.stdout.is_empty() {
            print!("{}", out.stdout);
        }
        Ok(())
    }

    /// Run a throwaway probe pod to completion, streaming its output. The
    /// pod is removed afterwards (`--rm`). Returns whether the pod script
    /// exited cleanly.
    pub fn run_probe_pod(&self, name: &str, image: &str, script: &str) -> bool {
        let image_arg = format!("--image={}", image);
        run_streamed(
            "kubectl",
            &[
                "run",
                name,
                image_arg.as_str(),
                "--restart=Never",
                "--rm",
                "-i",
                "-n",
                self.namespace.as_str(),
                "--command",
                "--",
                "sh",
                "-c",
                script,
            ],
        )
        .unwrap_or(false)
    }
}

fn parse_json(stdout: &str) -> Result<Value> {
    let value: Value = serde_json::from_str(stdout)?;
    debug!(kind = %value.pointer("/kind").and_then(serde_json::Value::as_str).unwrap_or("?"), "parsed kubectl output");
    Ok(value)
}

fn first_line(text: &str) -> String {
    text.lines().next().unwrap_or("").trim().to_string()
}
