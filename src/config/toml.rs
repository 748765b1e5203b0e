//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional; anything left out falls back to the
/// environment or built-in defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// API endpoint configuration
    #[serde(default)]
    pub api: ApiSection,

    /// Change monitor configuration
    #[serde(default)]
    pub monitor: MonitorSection,

    /// Notification channel configuration
    #[serde(default)]
    pub notify: NotifySection,
}

/// API endpoint section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiSection {
    /// Base URL of the JSON API
    pub base_url: Option<String>,

    /// Base URL of the IPv4-only host
    pub ipv4_url: Option<String>,

    /// Base URL of the IPv6-only host
    pub ipv6_url: Option<String>,

    /// Request timeout in seconds
    pub timeout: Option<u64>,
}

/// Change monitor section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MonitorSection {
    /// Path of the cache file; `~` expands to the home directory
    pub cache_file: Option<String>,
}

/// Notification channel section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NotifySection {
    /// Slack incoming-webhook URL
    pub slack_webhook: Option<String>,

    /// Discord webhook URL
    pub discord_webhook: Option<String>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# myip-tools configuration file

[api]
# Base URL of the JSON API (serves /api and /api/connection-type)
# base_url = "https://myip.foo/"

# Hosts that only resolve over one address family (serve /ip)
# ipv4_url = "https://ipv4.myip.foo/"
# ipv6_url = "https://ipv6.myip.foo/"

# Request timeout in seconds
# (default: 10 for monitor, 5 for the other commands; --timeout overrides)
# timeout = 5

[monitor]
# Cache file holding the last seen IP information
# (default: myip_current.json in the system temp directory)
# cache_file = "~/.cache/myip_current.json"

[notify]
# Incoming-webhook URLs. A channel without a URL is disabled.
# The SLACK_WEBHOOK and DISCORD_WEBHOOK environment variables take precedence.
# slack_webhook = "https://hooks.slack.com/services/..."
# discord_webhook = "https://discord.com/api/webhooks/..."
"#
    .to_string()
}
