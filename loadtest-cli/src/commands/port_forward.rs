//! `port-forward`: two background forwarding sessions, cleaned up on Ctrl-C.
//!
//! The one real resource-lifetime contract in the tool: both child
//! processes must be terminated when the operator interrupts, regardless of
//! which of them is still running. The session guard owns both handles and
//! cleanup runs exactly once.

use anyhow::{Context, Result};
use loadtest_core::{ClusterConfig, ui};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::{Child, Command};

pub async fn run(cfg: &ClusterConfig) -> Result<()> {
    for (name, port) in [
        (&cfg.frontend_service, cfg.frontend_port),
        (&cfg.echo_service, cfg.echo_port),
    ] {
        if local_port_in_use(port) {
            ui::warn(format!(
                "Local port {} is already in use; forwarding {} may fail",
                port, name
            ));
        }
    }

    let mut session = ForwardSession::default();
    session.spawn_forward(&cfg.namespace, &cfg.frontend_service, cfg.frontend_port)?;
    session.spawn_forward(&cfg.namespace, &cfg.echo_service, cfg.echo_port)?;
    ui::success("Port-forward sessions started");

    tokio::time::sleep(Duration::from_secs(cfg.settle_delay_secs)).await;

    for (name, port) in [
        (&cfg.frontend_service, cfg.frontend_port),
        (&cfg.echo_service, cfg.echo_port),
    ] {
        match probe_local_health(port).await {
            Ok(()) => ui::success(format!("{} healthy at http://localhost:{}", name, port)),
            Err(e) => ui::warn(format!("{} health probe failed: {}", name, e)),
        }
    }

    ui::info("Press Ctrl-C to stop forwarding");
    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for interrupt")?;

    let stopped = session.terminate_all().await;
    println!();
    ui::success(format!("Stopped {} forwarding session(s)", stopped));
    Ok(())
}

fn local_port_in_use(port: u16) -> bool {
    std::net::TcpListener::bind(("127.0.0.1", port)).is_err()
}

async fn probe_local_health(port: u16) -> Result<()> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(5))
        .build()?;
    let url = format!("http://localhost:{}/health", port);

    let response = client.get(&url).send().await?;
    if !response.status().is_success() {
        anyhow::bail!("{} returned {}", url, response.status());
    }
    Ok(())
}

/// Owns the background forwarding children. `terminate_all` kills whatever
/// is still alive and clears the handles so cleanup cannot run twice.
#[derive(Default)]
pub struct ForwardSession {
    children: Vec<(String, Child)>,
}

impl ForwardSession {
    fn spawn_forward(&mut self, namespace: &str, service: &str, port: u16) -> Result<()> {
        let target = format!("service/{}", service);
        let mapping = format!("{}:{}", port, port);

        let child = Command::new("kubectl")
            .args(["port-forward", &target, &mapping, "-n", namespace])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("Failed to start port-forward for {}", service))?;

        ui::info(format!("Forwarding localhost:{} -> {}:{}", port, service, port));
        self.register(service, child);
        Ok(())
    }

    /// Track a child under this session's lifetime contract.
    pub fn register(&mut self, name: &str, child: Child) {
        self.children.push((name.to_string(), child));
    }

    /// Terminate every child that is still running. Returns how many were
    /// actively killed.
    pub async fn terminate_all(&mut self) -> usize {
        let mut stopped = 0;

        for (name, child) in &mut self.children {
            match child.try_wait() {
                Ok(Some(_)) => {
                    ui::warn(format!("Forwarding session for {} had already exited", name));
                }
                _ => {
                    if child.kill().await.is_ok() {
                        stopped += 1;
                    }
                }
            }
        }

        self.children.clear();
        stopped
    }
}
