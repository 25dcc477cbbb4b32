// src/main.rs
use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;

use service_smoke_check::{
    cli::{self, Cli},
    config::{env_overrides, load_config, Config},
    health::ServiceChecker,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize tracing; stdout is reserved for the report
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(cli::log_filter())
        .init();

    // Load configuration: defaults < file < environment < flags
    let mut config = match &cli.config {
        Some(path) => load_config(path).await?,
        None => Config::default(),
    };
    config.apply_overrides(env_overrides()?);
    config.apply_overrides(cli.overrides());
    if cli.exit_zero {
        config.exit_nonzero_on_failure = false;
    }

    let checker = ServiceChecker::new(config)?;

    let stdout = std::io::stdout();
    let summary = checker.run(&mut stdout.lock()).await?;

    if summary.all_healthy() || !checker.config().exit_nonzero_on_failure {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
