//! myip: checks against the myip.foo API
//!
//! Entry point for the myip application.

use myip_tools::config::{CheckCommand, Cli, Command, ValidatedConfig};
use std::process::ExitCode;

mod app;
mod run;

use app::{exit_code, print_config_hint, setup_tracing};

/// Main entry point.
///
/// Excluded from coverage as it's the thin wrapper around testable components.
#[cfg(not(tarpaulin_include))]
fn main() -> ExitCode {
    let cli = Cli::parse_args();
    setup_tracing(cli.verbose);

    let check = match &cli.command {
        Command::Init { output } => return ExitCode::from(run::init(output)),
        Command::Check(check) => check,
    };

    // Load and validate configuration
    let config = match ValidatedConfig::load(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            print_config_hint(&e);
            return exit_code::CONFIG_ERROR;
        }
    };

    tracing::debug!("{config}");

    run_application(check, config)
}

/// Runs the selected command with the given configuration.
///
/// Excluded from coverage - requires async runtime.
#[cfg(not(tarpaulin_include))]
fn run_application(command: &CheckCommand, config: ValidatedConfig) -> ExitCode {
    let runtime = tokio::runtime::Runtime::new().expect("Failed to create Tokio runtime");

    match runtime.block_on(run::execute(command, config)) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("Application error: {e}");
            eprintln!("Error: {e}");
            exit_code::runtime_error()
        }
    }
}
