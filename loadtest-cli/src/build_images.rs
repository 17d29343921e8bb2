//! Build/push orchestrator.
//!
//! Fixed sequential pipeline: daemon gate, source validation, idempotent
//! scaffolding, registry login, then build + push for both applications
//! under versioned and `latest` tags. Fatal on the first failure; images
//! already pushed are left in place.

use anyhow::Result;
use loadtest_core::process::run_streamed;
use loadtest_core::scaffold::{self, ScaffoldOutcome};
use loadtest_core::{ClusterConfig, OrchestratorError, ui};
use std::path::Path;

/// Application source trees and the files each one must provide.
const REQUIRED_SOURCES: &[&str] = &[
    "python-app/app.py",
    "python-app/requirements.txt",
    "java-app/pom.xml",
    "java-app/src/main/java/com/loadtest/vulnerable/VulnerableEchoService.java",
];

const LOG_CONFIG_PATH: &str = "java-app/src/main/resources/log4j2.xml";

pub fn run(cfg: &ClusterConfig, version: &str, vulnerable_logging: bool) -> Result<()> {
    crate::prereq::check_docker()?;
    ui::success("Docker daemon reachable");

    verify_sources()?;
    ui::success("Application sources complete");

    scaffold_artifacts(vulnerable_logging)?;

    ui::info(format!("Logging in to {}", cfg.registry_host()));
    if !run_streamed("docker", &["login", cfg.registry_host()])? {
        return Err(OrchestratorError::LoginFailed {
            registry: cfg.registry_host().to_string(),
        }
        .into());
    }

    for (name, context_dir) in [
        ("load-test-app", "python-app"),
        ("vulnerable-echo-service", "java-app"),
    ] {
        build_and_push(cfg, name, context_dir, version)?;
    }

    ui::success("All images built and pushed");
    Ok(())
}

/// No partial build: every required source file must exist up front.
fn verify_sources() -> Result<()> {
    let mut missing = Vec::new();

    for path in REQUIRED_SOURCES {
        if !Path::new(path).exists() {
            ui::error(format!("Missing required source file: {}", path));
            missing.push(*path);
        }
    }

    if let Some(first) = missing.first() {
        return Err(OrchestratorError::SourceMissing {
            path: (*first).to_string(),
        }
        .into());
    }
    Ok(())
}

/// Materialize the generated artifacts, skipping any file the user already
/// has. The logging config defaults to the hardened template; the
/// demonstration config requires the explicit opt-in.
fn scaffold_artifacts(vulnerable_logging: bool) -> Result<()> {
    let log_config = if vulnerable_logging {
        ui::warn("Scaffolding DEMONSTRATION logging config with unsafe message lookups enabled");
        ui::warn("Deploy this only to isolated demo clusters");
        scaffold::LOG_CONFIG_DEMO
    } else {
        scaffold::LOG_CONFIG_HARDENED
    };

    let artifacts: [(&str, &str); 3] = [
        ("python-app/Dockerfile", scaffold::FRONTEND_DOCKERFILE),
        ("java-app/Dockerfile", scaffold::ECHO_DOCKERFILE),
        (LOG_CONFIG_PATH, log_config),
    ];

    for (path, contents) in artifacts {
        match scaffold::ensure_file(Path::new(path), contents)? {
            ScaffoldOutcome::Written => ui::success(format!("Created {}", path)),
            ScaffoldOutcome::Skipped => ui::info(format!("Keeping existing {}", path)),
        }
    }
    Ok(())
}

fn build_and_push(
    cfg: &ClusterConfig,
    name: &str,
    context_dir: &str,
    version: &str,
) -> Result<()> {
    let versioned = cfg.image(name, version);
    let latest = cfg.image(name, "latest");

    ui::info(format!("Building {}", versioned));
    let built = run_streamed(
        "docker",
        &[
            "build",
            "-t",
            versioned.as_str(),
            "-t",
            latest.as_str(),
            context_dir,
        ],
    )?;
    if !built {
        return Err(OrchestratorError::BuildFailed { image: versioned }.into());
    }

    for image in [&versioned, &latest] {
        ui::info(format!("Pushing {}", image));
        if !run_streamed("docker", &["push", image.as_str()])? {
            return Err(OrchestratorError::PushFailed {
                image: image.clone(),
            }
            .into());
        }
    }

    ui::success(format!("{} published ({} + latest)", name, version));
    Ok(())
}
