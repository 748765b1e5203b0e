//! Validated configuration after merging CLI, environment and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use url::Url;

use crate::api::{DEFAULT_API_BASE, DEFAULT_IPV4_BASE, DEFAULT_IPV6_BASE, Endpoints};
use crate::notify::Channel;
use crate::state::default_cache_path;

use super::cli::{CheckCommand, Cli, Command};
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;

/// Environment variables consulted during resolution.
///
/// A variable that is present but blank is kept as `Some("")` so it can be
/// told apart from an unset one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvVars {
    /// Value of `SLACK_WEBHOOK`
    pub slack_webhook: Option<String>,
    /// Value of `DISCORD_WEBHOOK`
    pub discord_webhook: Option<String>,
}

impl EnvVars {
    /// Reads the variables from the process environment.
    #[must_use]
    pub fn from_process() -> Self {
        Self {
            slack_webhook: std::env::var(defaults::SLACK_WEBHOOK_ENV).ok(),
            discord_webhook: std::env::var(defaults::DISCORD_WEBHOOK_ENV).ok(),
        }
    }

    fn webhook(&self, channel: Channel) -> Option<&str> {
        match channel {
            Channel::Slack => self.slack_webhook.as_deref(),
            Channel::Discord => self.discord_webhook.as_deref(),
        }
    }
}

/// Fully validated configuration ready for use by the application.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args, the environment
/// and an optional TOML config. Sources are applied in the order
/// CLI > environment > TOML > built-in defaults.
#[derive(Debug, Clone)]
pub struct ValidatedConfig {
    /// Resolved API endpoints
    pub endpoints: Endpoints,

    /// Per-request timeout for the selected command
    pub timeout: Duration,

    /// Cache file used by the change monitor
    pub cache_file: PathBuf,

    /// Slack incoming-webhook URL; `None` disables the channel
    pub slack_webhook: Option<Url>,

    /// Discord webhook URL; `None` disables the channel
    pub discord_webhook: Option<Url>,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = |url: Option<&Url>| if url.is_some() { "on" } else { "off" };

        write!(
            f,
            "Config {{ api: {}, timeout: {}s, cache_file: {}, slack: {}, discord: {} }}",
            self.endpoints.info,
            self.timeout.as_secs(),
            self.cache_file.display(),
            state(self.slack_webhook.as_ref()),
            state(self.discord_webhook.as_ref()),
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A base URL or webhook URL is invalid
    /// - The timeout is zero
    /// - The cache path is empty or needs a home directory that is unknown
    pub fn from_raw(
        cli: &Cli,
        env: &EnvVars,
        toml: Option<&TomlConfig>,
    ) -> Result<Self, ConfigError> {
        let endpoints = Self::resolve_endpoints(toml)?;
        let timeout = Self::resolve_timeout(cli, toml)?;
        let cache_file = Self::resolve_cache_file(cli, toml)?;
        let slack_webhook = Self::resolve_webhook(Channel::Slack, env, toml)?;
        let discord_webhook = Self::resolve_webhook(Channel::Discord, env, toml)?;

        Ok(Self {
            endpoints,
            timeout,
            cache_file,
            slack_webhook,
            discord_webhook,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI, process environment and
    /// optional config file.
    ///
    /// If `cli.config` is set, loads the TOML file from that path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(path)?)
        } else {
            None
        };

        Self::from_raw(cli, &EnvVars::from_process(), toml.as_ref())
    }

    /// Returns the webhook URL for a channel, if enabled.
    #[must_use]
    pub const fn webhook(&self, channel: Channel) -> Option<&Url> {
        match channel {
            Channel::Slack => self.slack_webhook.as_ref(),
            Channel::Discord => self.discord_webhook.as_ref(),
        }
    }

    /// Enabled channels with their URLs, in delivery order.
    #[must_use]
    pub fn webhooks(&self) -> Vec<(Channel, &Url)> {
        Channel::ALL
            .into_iter()
            .filter_map(|channel| self.webhook(channel).map(|url| (channel, url)))
            .collect()
    }

    fn resolve_endpoints(toml: Option<&TomlConfig>) -> Result<Endpoints, ConfigError> {
        let api = toml.map(|t| &t.api);

        let base = parse_base(
            field::BASE_URL,
            api.and_then(|a| a.base_url.as_deref())
                .unwrap_or(DEFAULT_API_BASE),
        )?;
        let ipv4 = parse_base(
            field::IPV4_URL,
            api.and_then(|a| a.ipv4_url.as_deref())
                .unwrap_or(DEFAULT_IPV4_BASE),
        )?;
        let ipv6 = parse_base(
            field::IPV6_URL,
            api.and_then(|a| a.ipv6_url.as_deref())
                .unwrap_or(DEFAULT_IPV6_BASE),
        )?;

        Endpoints::from_bases(&base, &ipv4, &ipv6).map_err(|e| ConfigError::InvalidUrl {
            field: field::BASE_URL,
            url: base.to_string(),
            reason: e.to_string(),
        })
    }

    fn resolve_timeout(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Duration, ConfigError> {
        // Priority: CLI explicit > TOML > per-command default
        let timeout = cli
            .timeout
            .or_else(|| toml.and_then(|t| t.api.timeout))
            .map_or_else(
                || {
                    if cli.is_monitor() {
                        defaults::monitor_timeout()
                    } else {
                        defaults::check_timeout()
                    }
                },
                Duration::from_secs,
            );

        if timeout.is_zero() {
            return Err(ConfigError::InvalidDuration {
                field: field::TIMEOUT,
                reason: "must be greater than 0".to_string(),
            });
        }

        Ok(timeout)
    }

    fn resolve_cache_file(cli: &Cli, toml: Option<&TomlConfig>) -> Result<PathBuf, ConfigError> {
        // CLI takes precedence
        if let Command::Check(CheckCommand::Monitor {
            cache_file: Some(path),
        }) = &cli.command
        {
            return match path.to_str() {
                Some(s) => expand_tilde(s),
                None => Ok(path.clone()),
            };
        }

        match toml.and_then(|t| t.monitor.cache_file.as_deref()) {
            Some(path) => expand_tilde(path),
            None => Ok(default_cache_path()),
        }
    }

    fn resolve_webhook(
        channel: Channel,
        env: &EnvVars,
        toml: Option<&TomlConfig>,
    ) -> Result<Option<Url>, ConfigError> {
        let (env_name, toml_name, toml_value) = match channel {
            Channel::Slack => (
                defaults::SLACK_WEBHOOK_ENV,
                "notify.slack_webhook",
                toml.and_then(|t| t.notify.slack_webhook.as_deref()),
            ),
            Channel::Discord => (
                defaults::DISCORD_WEBHOOK_ENV,
                "notify.discord_webhook",
                toml.and_then(|t| t.notify.discord_webhook.as_deref()),
            ),
        };

        // Environment wins over TOML, even when blank
        let Some((source, value)) = env
            .webhook(channel)
            .map(|v| (env_name, v))
            .or_else(|| toml_value.map(|v| (toml_name, v)))
        else {
            return Ok(None);
        };

        let value = value.trim();
        if value.is_empty() {
            tracing::warn!("{source} is set but empty, {channel} alerts disabled");
            return Ok(None);
        }

        parse_http_url(source, value).map(Some)
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

// Helper functions

fn parse_http_url(field: &'static str, value: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidUrl {
        field,
        url: value.to_string(),
        reason,
    };

    let url = Url::parse(value).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!(
            "unsupported scheme '{}', expected http or https",
            url.scheme()
        )));
    }
    Ok(url)
}

/// Parses a base URL and makes sure its path ends with `/` so relative
/// joins keep the last segment.
fn parse_base(field: &'static str, value: &str) -> Result<Url, ConfigError> {
    let mut url = parse_http_url(field, value)?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Expands a leading `~` to the home directory.
fn expand_tilde(path: &str) -> Result<PathBuf, ConfigError> {
    if path.trim().is_empty() {
        return Err(ConfigError::InvalidPath {
            path: path.to_string(),
            reason: "must not be empty",
        });
    }

    let rest = match path.strip_prefix('~') {
        Some("") => "",
        Some(rest) if rest.starts_with('/') || rest.starts_with('\\') => &rest[1..],
        _ => return Ok(PathBuf::from(path)),
    };

    let home = dirs::home_dir().ok_or_else(|| ConfigError::InvalidPath {
        path: path.to_string(),
        reason: "home directory is unknown",
    })?;

    Ok(if rest.is_empty() { home } else { home.join(rest) })
}
