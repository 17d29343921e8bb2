//! Pre-flight checks run before every orchestrator action.
//!
//! Three independent fatal gates for the deploy orchestrator: cluster CLI on
//! PATH, cluster reachable, manifest present. The build orchestrator shares
//! the tool check and adds a docker daemon gate. Version mismatches only
//! warn; absence is what aborts.

use anyhow::Result;
use loadtest_core::process::{find_binary, run_capture};
use loadtest_core::ui;
use loadtest_core::{ClusterConfig, OrchestratorError};

pub const KUBECTL_MIN_VERSION: &str = "1.24.0";
pub const DOCKER_MIN_VERSION: &str = "20.10.0";

/// Presence and version of a single external tool.
#[derive(Debug)]
pub struct ToolCheck {
    pub name: String,
    pub found: bool,
    pub version: Option<String>,
    pub meets_minimum: bool,
}

/// Check a tool against its minimum version. A tool that is present but of
/// unknown version passes; the caller decides whether mismatch warns.
pub fn check_tool(name: &str, version_args: &[&str], minimum: &str) -> ToolCheck {
    let found = find_binary(name).is_some();

    let (version, meets_minimum) = if found {
        match tool_version(name, version_args) {
            Some(version) => {
                let meets = version_at_least(&version, minimum).unwrap_or(true);
                (Some(version), meets)
            }
            // Found but version unknown - assume OK
            None => (None, true),
        }
    } else {
        (None, false)
    };

    ToolCheck {
        name: name.to_string(),
        found,
        version,
        meets_minimum,
    }
}

fn tool_version(name: &str, version_args: &[&str]) -> Option<String> {
    let out = run_capture(name, version_args).ok()?;
    if !out.success {
        return None;
    }
    extract_version(&out.stdout)
}

/// Extract a semantic version from version-command output. Handles the
/// usual formats:
///   "Client Version: v1.29.2"              -> "1.29.2"
///   "Docker version 24.0.7, build afdd53b" -> "24.0.7"
fn extract_version(output: &str) -> Option<String> {
    let re = regex::Regex::new(r"v?(\d+\.\d+\.\d+)").ok()?;
    re.captures(output)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str().to_string())
}

fn version_at_least(installed: &str, minimum: &str) -> Result<bool> {
    let installed = semver::Version::parse(installed.trim())?;
    let minimum = semver::Version::parse(minimum.trim())?;
    Ok(installed >= minimum)
}

/// The deploy orchestrator's pre-flight gate. All three checks must pass.
pub fn check_prerequisites(cfg: &ClusterConfig) -> Result<()> {
    ui::info("Checking prerequisites...");

    let kubectl = check_tool("kubectl", &["version", "--client"], KUBECTL_MIN_VERSION);
    if !kubectl.found {
        return Err(OrchestratorError::ToolMissing {
            tool: "kubectl".to_string(),
        }
        .into());
    }
    if !kubectl.meets_minimum {
        ui::warn(format!(
            "kubectl {} is older than the tested minimum {}",
            kubectl.version.as_deref().unwrap_or("?"),
            KUBECTL_MIN_VERSION
        ));
    }

    crate::kubectl::Kubectl::cluster_reachable()?;

    let manifest = cfg.manifest_path();
    if !manifest.exists() {
        return Err(OrchestratorError::ManifestMissing {
            path: manifest.display().to_string(),
        }
        .into());
    }

    Ok(())
}

/// The build orchestrator's tool gate: docker on PATH and daemon reachable.
pub fn check_docker() -> Result<()> {
    let docker = check_tool("docker", &["--version"], DOCKER_MIN_VERSION);
    if !docker.found {
        return Err(OrchestratorError::ToolMissing {
            tool: "docker".to_string(),
        }
        .into());
    }
    if !docker.meets_minimum {
        ui::warn(format!(
            "docker {} is older than the tested minimum {}",
            docker.version.as_deref().unwrap_or("?"),
            DOCKER_MIN_VERSION
        ));
    }

    match run_capture("docker", &["info"]) {
        Ok(out) if out.success => Ok(()),
        Ok(out) => Err(OrchestratorError::DaemonUnreachable {
            detail: out.stderr.lines().next().unwrap_or("").trim().to_string(),
        }
        .into()),
        Err(e) => Err(OrchestratorError::DaemonUnreachable {
            detail: e.to_string(),
        }
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_version() {
        assert_eq!(
            extract_version("Client Version: v1.29.2"),
            Some("1.29.2".to_string())
        );
        assert_eq!(
            extract_version("Docker version 24.0.7, build afdd53b"),
            Some("24.0.7".to_string())
        );
        assert_eq!(extract_version("no version here"), None);
    }

    #[test]
    fn test_version_at_least() {
        assert!(version_at_least("1.29.2", "1.24.0").unwrap());
        assert!(version_at_least("1.24.0", "1.24.0").unwrap());
        assert!(!version_at_least("1.23.9", "1.24.0").unwrap());
        assert!(version_at_least("garbage", "1.24.0").is_err());
    }

    #[test]
    fn test_check_tool_absent() {
        let check = check_tool("nonexistent_command_12345", &["--version"], "1.0.0");
        assert!(!check.found);
        assert!(!check.meets_minimum);
        assert!(check.version.is_none());
    }
}
