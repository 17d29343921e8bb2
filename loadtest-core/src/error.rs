//! Error taxonomy for the orchestrators.
//!
//! Every fatal failure class gets its own variant so callers can abort with
//! a labeled, actionable message. Degraded conditions (missing optional
//! resource kinds, failed connectivity probes, port conflicts) are never
//! errors - they are printed as warnings and execution continues.

use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum OrchestratorError {
    #[snafu(display("required tool not found on PATH: {tool}"))]
    ToolMissing { tool: String },

    #[snafu(display("cluster unreachable: {detail}"))]
    ClusterUnreachable { detail: String },

    #[snafu(display("manifest not found: {path}"))]
    ManifestMissing { path: String },

    #[snafu(display("kubectl apply failed for {path}"))]
    ApplyFailed { path: String },

    #[snafu(display("kubectl delete failed for {path}"))]
    DeleteFailed { path: String },

    #[snafu(display(
        "deployment/{deployment} did not become available within {timeout_secs}s"
    ))]
    RolloutTimeout {
        deployment: String,
        timeout_secs: u64,
    },

    #[snafu(display("docker daemon unreachable: {detail}"))]
    DaemonUnreachable { detail: String },

    #[snafu(display("required source file missing: {path}"))]
    SourceMissing { path: String },

    #[snafu(display("registry login failed for {registry}"))]
    LoginFailed { registry: String },

    #[snafu(display("image build failed: {image}"))]
    BuildFailed { image: String },

    #[snafu(display("image push failed: {image}"))]
    PushFailed { image: String },

    #[snafu(display("i/o error at {path}: {source}"))]
    Io {
        path: String,
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rollout_timeout_display() {
        let err = OrchestratorError::RolloutTimeout {
            deployment: "load-test-app".to_string(),
            timeout_secs: 120,
        };
        assert_eq!(
            err.to_string(),
            "deployment/load-test-app did not become available within 120s"
        );
    }

    #[test]
    fn test_tool_missing_display() {
        let err = OrchestratorError::ToolMissing {
            tool: "kubectl".to_string(),
        };
        assert!(err.to_string().contains("kubectl"));
        assert!(err.to_string().contains("PATH"));
    }
}
