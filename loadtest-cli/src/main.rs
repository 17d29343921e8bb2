//! Deploy orchestrator for the two-service load-test demo cluster.
//!
//! `loadtest [ACTION] [NAMESPACE]` - the action defaults to `deploy`, the
//! namespace to the configured default. Every action except `help` runs
//! behind the pre-flight gate (kubectl present, cluster reachable, manifest
//! on disk).

use anyhow::Result;
use clap::{CommandFactory, Parser, ValueEnum};
use loadtest_core::{ClusterConfig, ui};
use loadtest_cli::{commands, prereq};
use std::path::Path;

#[derive(Debug, Parser)]
#[command(
    name = "loadtest",
    about = "Deploy orchestrator for the load-test demo cluster",
    version
)]
struct Cli {
    /// Action to perform
    #[arg(value_enum, default_value = "deploy")]
    action: Action,

    /// Target namespace (defaults to the configured namespace)
    namespace: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Action {
    /// Apply the manifest and wait for both deployments
    Deploy,
    /// Delete all manifest resources (asks for confirmation)
    Delete,
    /// Rolling restart of both deployments
    Restart,
    /// Best-effort report over all resource kinds
    Status,
    /// Tail recent logs from both workloads
    Logs,
    /// Forward both service ports to localhost until interrupted
    PortForward,
    /// In-cluster connectivity checks via a throwaway probe pod
    Test,
    /// Print derived access URLs
    Info,
    /// Show usage
    Help,
}

#[tokio::main]
async fn main() {
    loadtest_cli::init_tracing();

    if let Err(e) = run().await {
        ui::error(format!("{:#}", e));
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.action == Action::Help {
        Cli::command().print_long_help()?;
        return Ok(());
    }

    let mut cfg = ClusterConfig::load(Path::new("."))?;
    if let Some(namespace) = cli.namespace {
        cfg.namespace = namespace;
    }

    prereq::check_prerequisites(&cfg)?;

    match cli.action {
        Action::Deploy => commands::deploy::run(&cfg),
        Action::Delete => commands::delete::run(&cfg),
        Action::Restart => commands::restart::run(&cfg),
        Action::Status => commands::status::run(&cfg),
        Action::Logs => commands::logs::run(&cfg),
        Action::PortForward => commands::port_forward::run(&cfg).await,
        Action::Test => commands::probe::run(&cfg).await,
        Action::Info => commands::info::run(&cfg),
        Action::Help => unreachable!("handled before the pre-flight gate"),
    }
}
