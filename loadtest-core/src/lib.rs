//! Shared plumbing for the load-test demo orchestrators.
//!
//! The two binaries in `loadtest-cli` (deploy orchestrator and build/push
//! orchestrator) drive everything through external tools (`kubectl`,
//! `docker`). This crate holds the parts that do not touch the cluster:
//! configuration, the error taxonomy, the subprocess runner, parsers for
//! `kubectl -o json` output, and the idempotent file scaffolding.

pub mod cluster;
pub mod config;
pub mod error;
pub mod process;
pub mod scaffold;
pub mod ui;

pub use config::ClusterConfig;
pub use error::OrchestratorError;
