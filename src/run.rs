//! Command execution.
//!
//! Builds the production clients from the validated configuration, runs
//! the selected check, prints its report to stdout and returns the exit
//! code the check defines.

use std::fmt::Display;
use std::path::Path;

use thiserror::Error;

use myip_tools::api::IpApi;
use myip_tools::check::{ChangeMonitor, check_connection, check_dual_stack, lookup, verify_vpn};
use myip_tools::config::{CheckCommand, ValidatedConfig, write_default_config};
use myip_tools::notify::WebhookNotifier;
use myip_tools::state::FileStateStore;
use myip_tools::transport::{AddressFamily, HttpError, ReqwestClient};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// Failed to build an HTTP client pinned to an address family.
    #[error("Failed to create {family} client: {source}")]
    ClientSetup {
        family: AddressFamily,
        #[source]
        source: HttpError,
    },
}

/// Executes one check and returns its exit code.
///
/// # Errors
///
/// Returns an error only if a family-pinned HTTP client cannot be built.
/// Every other failure is part of the check's report and exit code.
#[cfg(not(tarpaulin_include))]
pub async fn execute(command: &CheckCommand, config: ValidatedConfig) -> Result<u8, RunError> {
    let client = ReqwestClient::new();

    let code = match command {
        CheckCommand::Monitor { .. } => {
            let store = FileStateStore::new(&config.cache_file);
            tracing::debug!("Cache file: {}", store.path().display());

            let monitor = ChangeMonitor::new(
                api(&config, client.clone()),
                store,
                notifiers(&config, &client),
            );
            let outcome = monitor.run().await;
            report(&outcome, outcome.exit_code())
        }
        CheckCommand::ConnectionType => {
            let result = check_connection(&api(&config, client)).await;
            report(&result, result.exit_code())
        }
        CheckCommand::DualStack => {
            let ipv4 = api(&config, pinned(AddressFamily::V4)?);
            let ipv6 = api(&config, pinned(AddressFamily::V6)?);
            let result = check_dual_stack(&ipv4, &ipv6, &api(&config, client)).await;
            report(&result, 0)
        }
        CheckCommand::Vpn { country } => {
            let result = verify_vpn(&api(&config, client), country).await;
            report(&result, result.exit_code())
        }
        CheckCommand::Lookup => {
            let result = lookup(&api(&config, client)).await;
            report(&result, result.exit_code())
        }
    };

    Ok(code)
}

/// Writes the configuration template.
pub fn init(output: &Path) -> u8 {
    match write_default_config(output) {
        Ok(()) => {
            println!("Configuration template written to: {}", output.display());
            0
        }
        Err(e) => {
            eprintln!("Error: {e}");
            1
        }
    }
}

/// Prints the report to stdout and passes the exit code through.
fn report(text: &impl Display, code: u8) -> u8 {
    println!("{text}");
    code
}

fn api(config: &ValidatedConfig, client: ReqwestClient) -> IpApi<ReqwestClient> {
    IpApi::new(client, config.endpoints.clone(), config.timeout)
}

fn pinned(family: AddressFamily) -> Result<ReqwestClient, RunError> {
    ReqwestClient::pinned(family).map_err(|source| RunError::ClientSetup { family, source })
}

/// One notifier per enabled channel, sharing the given client.
fn notifiers(
    config: &ValidatedConfig,
    client: &ReqwestClient,
) -> Vec<WebhookNotifier<ReqwestClient>> {
    let notifiers: Vec<_> = config
        .webhooks()
        .into_iter()
        .map(|(channel, url)| {
            WebhookNotifier::new(client.clone(), channel, url.clone(), config.timeout)
        })
        .collect();

    if notifiers.is_empty() {
        tracing::debug!("No webhook configured, alerts disabled");
    }

    notifiers
}
