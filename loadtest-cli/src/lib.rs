//! Orchestrator library backing the `loadtest` and `loadtest-build` binaries.

pub mod build_images;
pub mod commands;
pub mod kubectl;
pub mod prereq;

/// Initialize tracing for a binary. Diagnostics go to stderr so they never
/// interleave with the operator-facing report on stdout.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}
