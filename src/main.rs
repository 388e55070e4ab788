//! gopkg-outdated - report outdated dependencies of a dep-managed Go project
//!
//! Reads Gopkg.toml and Gopkg.lock from the target directory, checks every
//! locked dependency against the tags of its upstream repository and prints
//! the ones that have a newer release.

use clap::Parser;
use gopkg_outdated::cli::CliArgs;
use gopkg_outdated::config::Config;
use gopkg_outdated::dispatcher::Dispatcher;
use gopkg_outdated::error::AppError;
use gopkg_outdated::logging;
use gopkg_outdated::manifest::load_project;
use gopkg_outdated::output::ConsoleSink;
use std::io;
use std::process::ExitCode;
use tracing::info;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    // Run the main logic and handle errors
    match run(args).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    let config = Config::from_cli(&args).map_err(AppError::from)?;
    logging::init(config.output.verbosity);

    info!(
        "gopkg-outdated v{} in {}",
        env!("CARGO_PKG_VERSION"),
        config.project_dir.display()
    );

    let dependencies = load_project(&config.project_dir).map_err(AppError::from)?;
    let dispatcher = Dispatcher::from_config(&config)?;

    let stdout = io::stdout().lock();
    let mut sink = ConsoleSink::new(&config.output, stdout);
    let summary = dispatcher
        .run(dependencies, &mut sink)
        .await
        .map_err(AppError::from)?;
    sink.write_summary(&summary)?;

    Ok(ExitCode::SUCCESS)
}
