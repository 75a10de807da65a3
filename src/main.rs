//! devlog CLI entrypoint for browsing commit history through the API.

use std::io::{self, Write};
use std::process::ExitCode;

use devlog::telemetry::StderrJsonlTelemetrySink;
use devlog::{DevlogConfig, DevlogError, HttpGateway};
use ortho_config::OrthoConfig;
use thiserror::Error;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

mod cli;

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            if writeln!(io::stderr().lock(), "{error}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .compact(),
        )
        .init();
}

/// Why the CLI exited with failure.
#[derive(Debug, Error)]
enum CliFailure {
    /// Configuration or setup failed before any view ran.
    #[error(transparent)]
    Setup(#[from] DevlogError),
    /// The selected view failed.
    #[error("error loading {subject}: {source}")]
    View {
        subject: &'static str,
        source: DevlogError,
    },
}

async fn run() -> Result<(), CliFailure> {
    let config = load_config()?;
    config.validate()?;

    let telemetry = StderrJsonlTelemetrySink;
    let mut stdout = io::stdout().lock();

    if config.migrate_db {
        return cli::migrations::run(&config, &telemetry, &mut stdout).map_err(CliFailure::from);
    }

    let mode = config.operation_mode()?;
    let gateway = HttpGateway::new(&config.api_url, config.request_timeout())?;
    debug!(view = %mode, api_url = %config.api_url, "running view");
    cli::run_view(mode, &gateway, &config, &telemetry, &mut stdout)
        .await
        .map_err(|source| CliFailure::View {
            subject: cli::subject(mode),
            source,
        })
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`DevlogError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<DevlogConfig, DevlogError> {
    DevlogConfig::load().map_err(|error| DevlogError::Configuration {
        message: error.to_string(),
    })
}
