//! Nomad Probe
//!
//! Entry point of the `nomad-probe` monitoring check. Prints exactly one
//! verdict line on stdout and exits with its monitoring-plugin code.
//! Diagnostics go to stderr and are controlled by `RUST_LOG`.

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use nomad_probe::cli::{Cli, normalize_args};
use nomad_probe::config::Config;
use nomad_probe::runner;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nomad_probe=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse_from(normalize_args(std::env::args_os()));
    let config = Config::from(cli);

    let verdict = runner::run(&config).await;

    println!("{}", verdict);
    ExitCode::from(verdict.exit_code())
}
