//! Integration tests for the deploy orchestrator binary.
//!
//! The real binary runs against a fake `kubectl` placed first on PATH. The
//! fake records every invocation to a log file so tests can assert which
//! cluster calls were (not) made.

use assert_cmd::Command;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use tempfile::TempDir;

/// Fake kubectl where every subcommand succeeds and `-o json` queries
/// return an empty listing.
const KUBECTL_OK: &str = r#"#!/bin/sh
echo "$@" >> "$KUBECTL_LOG"
case "$1" in
  version) echo "Client Version: v1.29.2" ;;
  cluster-info) echo "Kubernetes control plane is running" ;;
  get)
    case "$*" in
      *"-o json"*) echo '{"kind":"List","items":[]}' ;;
      *) echo "NAME   READY" ;;
    esac ;;
esac
exit 0
"#;

/// Fake kubectl where the availability wait fails but everything else
/// succeeds.
const KUBECTL_WAIT_FAILS: &str = r#"#!/bin/sh
echo "$@" >> "$KUBECTL_LOG"
case "$1" in
  version) echo "Client Version: v1.29.2" ;;
  cluster-info) echo "Kubernetes control plane is running" ;;
  wait) echo "error: timed out waiting for the condition" >&2; exit 1 ;;
  get)
    case "$*" in
      *"-o json"*) echo '{"kind":"List","items":[]}' ;;
      *) echo "NAME   READY" ;;
    esac ;;
esac
exit 0
"#;

/// Fake kubectl where every namespace query fails: the namespace does not
/// exist and no resource kind can be listed.
const KUBECTL_QUERIES_FAIL: &str = r#"#!/bin/sh
echo "$@" >> "$KUBECTL_LOG"
case "$1" in
  version) echo "Client Version: v1.29.2"; exit 0 ;;
  cluster-info) echo "Kubernetes control plane is running"; exit 0 ;;
  get) echo "Error from server (NotFound)" >&2; exit 1 ;;
  top) echo "error: Metrics API not available" >&2; exit 1 ;;
esac
exit 0
"#;

struct Harness {
    dir: TempDir,
}

impl Harness {
    fn new(kubectl_script: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("bin")).unwrap();
        fs::create_dir_all(dir.path().join("k8s")).unwrap();
        fs::write(
            dir.path().join("k8s/load-test-stack.yaml"),
            "apiVersion: v1\nkind: List\nitems: []\n",
        )
        .unwrap();

        let script_path = dir.path().join("bin/kubectl");
        fs::write(&script_path, kubectl_script).unwrap();
        fs::set_permissions(&script_path, fs::Permissions::from_mode(0o755)).unwrap();

        Self { dir }
    }

    fn cmd(&self) -> Command {
        let path = format!(
            "{}:{}",
            self.dir.path().join("bin").display(),
            std::env::var("PATH").unwrap_or_default()
        );
        let mut cmd = Command::cargo_bin("loadtest").unwrap();
        cmd.current_dir(self.dir.path())
            .env("PATH", path)
            .env("KUBECTL_LOG", self.dir.path().join("kubectl.log"));
        cmd
    }

    fn log(&self) -> String {
        fs::read_to_string(self.dir.path().join("kubectl.log")).unwrap_or_default()
    }
}

#[test]
fn unrecognized_action_prints_usage_and_fails() {
    let output = Command::cargo_bin("loadtest")
        .unwrap()
        .arg("frobnicate")
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage"), "stderr was: {}", stderr);
}

#[test]
fn help_action_exits_zero_with_usage() {
    let output = Command::cargo_bin("loadtest")
        .unwrap()
        .arg("help")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage"), "stdout was: {}", stdout);
    assert!(stdout.contains("deploy"));
}

#[test]
fn missing_kubectl_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("bin")).unwrap();

    let output = Command::cargo_bin("loadtest")
        .unwrap()
        .current_dir(dir.path())
        .env("PATH", dir.path().join("bin"))
        .arg("status")
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("kubectl"), "stderr was: {}", stderr);
}

#[test]
fn missing_manifest_is_fatal() {
    let harness = Harness::new(KUBECTL_OK);
    fs::remove_file(harness.dir.path().join("k8s/load-test-stack.yaml")).unwrap();

    let output = harness.cmd().arg("deploy").output().unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("manifest not found"), "stderr was: {}", stderr);
    // The failure is in the pre-flight gate, before any mutating call
    assert!(!harness.log().contains("apply"));
}

#[test]
fn zero_args_behaves_like_deploy() {
    let harness = Harness::new(KUBECTL_OK);
    harness.cmd().assert().success();

    let log = harness.log();
    assert!(log.contains("apply -f k8s/load-test-stack.yaml -n load-testing"));
    assert!(log.contains("wait --for=condition=available deployment/load-test-app"));
    assert!(log.contains("wait --for=condition=available deployment/vulnerable-echo-service"));
}

#[test]
fn explicit_deploy_matches_default_action() {
    let default_run = Harness::new(KUBECTL_OK);
    default_run.cmd().assert().success();

    let explicit_run = Harness::new(KUBECTL_OK);
    explicit_run.cmd().arg("deploy").assert().success();

    assert_eq!(default_run.log(), explicit_run.log());
}

#[test]
fn deploy_fails_when_availability_wait_fails() {
    let harness = Harness::new(KUBECTL_WAIT_FAILS);

    let output = harness.cmd().arg("deploy").output().unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("did not become available"),
        "stderr was: {}",
        stderr
    );
    // The apply itself went through before the wait failed
    assert!(harness.log().contains("apply"));
}

#[test]
fn delete_decline_performs_no_destructive_call() {
    let harness = Harness::new(KUBECTL_OK);

    let output = harness
        .cmd()
        .arg("delete")
        .write_stdin("n\n")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Aborted"), "stdout was: {}", stdout);
    assert!(!harness.log().contains("delete -f"));
}

#[test]
fn delete_empty_answer_declines() {
    let harness = Harness::new(KUBECTL_OK);

    harness
        .cmd()
        .arg("delete")
        .write_stdin("\n")
        .assert()
        .success();

    assert!(!harness.log().contains("delete -f"));
}

#[test]
fn delete_confirmed_deletes_manifest_resources() {
    let harness = Harness::new(KUBECTL_OK);

    harness
        .cmd()
        .arg("delete")
        .write_stdin("y\n")
        .assert()
        .success();

    assert!(harness.log().contains("delete -f k8s/load-test-stack.yaml"));
}

#[test]
fn status_continues_through_failing_queries() {
    let harness = Harness::new(KUBECTL_QUERIES_FAIL);

    let output = harness
        .cmd()
        .args(["status", "load-testing"])
        .output()
        .unwrap();

    // Degraded, never fatal
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Namespace 'load-testing' not found"));
    // First and last resource kinds both attempted
    assert!(stdout.contains("Could not list deployments"));
    assert!(stdout.contains("Could not list hpa"));
    assert!(stdout.contains("Metrics unavailable"));

    let log = harness.log();
    assert!(log.contains("get deployments"));
    assert!(log.contains("get hpa"));
}

#[test]
fn namespace_argument_overrides_default() {
    let harness = Harness::new(KUBECTL_OK);

    harness.cmd().args(["logs", "staging"]).assert().success();

    let log = harness.log();
    assert!(log.contains("-n staging"), "log was: {}", log);
    assert!(!log.contains("-n load-testing"));
}

#[test]
fn info_reports_unassigned_endpoints() {
    let harness = Harness::new(KUBECTL_OK);

    let output = harness.cmd().arg("info").output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("No external endpoints assigned yet"));
}
