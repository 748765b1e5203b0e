//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::check::DEFAULT_EXPECTED_COUNTRY;

use super::defaults;

/// myip: checks against the myip.foo API
///
/// Detects public IP changes, classifies the connection, checks dual-stack
/// reachability and verifies VPN exit countries.
#[derive(Debug, Parser)]
#[command(name = "myip")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Request timeout in seconds (default: 10 for monitor, 5 otherwise)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Subcommands for myip
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// A check against the API
    #[command(flatten)]
    Check(CheckCommand),

    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = defaults::CONFIG_FILE_NAME)]
        output: PathBuf,
    },
}

/// Commands that talk to the API and need a validated configuration.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum CheckCommand {
    /// Compare the public IP with the cached one and alert on change
    Monitor {
        /// Path of the cache file
        #[arg(long = "cache-file")]
        cache_file: Option<PathBuf>,
    },

    /// Classify the connection (exit code 0/1/2/3, 99 on error)
    ConnectionType,

    /// Check IPv4 and IPv6 reachability
    DualStack,

    /// Verify the exit country of a VPN (exit code 0 on match)
    Vpn {
        /// Expected two-letter country code, compared exactly
        #[arg(default_value = DEFAULT_EXPECTED_COUNTRY)]
        country: String,
    },

    /// Print the full IP information document
    Lookup,
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if this is the monitor command.
    #[must_use]
    pub const fn is_monitor(&self) -> bool {
        matches!(self.command, Command::Check(CheckCommand::Monitor { .. }))
    }
}
