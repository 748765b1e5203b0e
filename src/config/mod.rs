//! Configuration layer for myip.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`], [`CheckCommand`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Environment variables ([`EnvVars`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Configuration values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments** - `--timeout`, `monitor --cache-file`
//! 2. **Environment** - `SLACK_WEBHOOK`, `DISCORD_WEBHOOK`
//! 3. **TOML config file** - Values from the configuration file
//! 4. **Built-in defaults** - Hardcoded default values
//!
//! # Webhook Channels
//!
//! A channel is enabled only by an explicit URL. An unset variable leaves the
//! channel off silently. A variable that is set but blank also leaves it off,
//! with a warning, and shadows any URL in the TOML file.
//!
//! # Timeouts
//!
//! Without an explicit value the monitor uses 10 seconds and every other
//! command 5 seconds. A zero timeout is rejected.

mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;


pub use cli::{CheckCommand, Cli, Command};
pub use error::{ConfigError, field};
pub use toml::{TomlConfig, default_config_template};
pub use validated::{EnvVars, ValidatedConfig, write_default_config};
