//! Build/push orchestrator for the demo's two container images.
//!
//! `loadtest-build [VERSION]` - builds and publishes both images under the
//! given tag plus `latest`. Strictly sequential, aborts on first failure.

use anyhow::Result;
use clap::Parser;
use loadtest_core::{ClusterConfig, ui};
use loadtest_cli::build_images;
use std::path::Path;

#[derive(Debug, Parser)]
#[command(
    name = "loadtest-build",
    about = "Build and push the load-test demo images",
    version
)]
struct Cli {
    /// Image tag suffix (defaults to the configured version)
    #[arg(id = "image_version", value_name = "VERSION")]
    version: Option<String>,

    /// Scaffold the demonstration logging config with unsafe message
    /// lookups enabled. Off by default; only for isolated demo clusters.
    #[arg(long)]
    vulnerable_logging: bool,
}

fn main() {
    loadtest_cli::init_tracing();

    if let Err(e) = run() {
        ui::error(format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let cfg = ClusterConfig::load(Path::new("."))?;
    let version = cli.version.as_deref().unwrap_or(&cfg.version);

    build_images::run(&cfg, version, cli.vulnerable_logging)
}
