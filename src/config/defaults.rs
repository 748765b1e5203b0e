//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use std::time::Duration;

/// Default request timeout for the change monitor, in seconds.
pub const MONITOR_TIMEOUT_SECS: u64 = 10;

/// Default request timeout for the one-shot checks, in seconds.
pub const CHECK_TIMEOUT_SECS: u64 = 5;

/// Default file name written by `init`.
pub const CONFIG_FILE_NAME: &str = "myip.toml";

/// Environment variable holding the Slack incoming-webhook URL.
pub const SLACK_WEBHOOK_ENV: &str = "SLACK_WEBHOOK";

/// Environment variable holding the Discord webhook URL.
pub const DISCORD_WEBHOOK_ENV: &str = "DISCORD_WEBHOOK";

/// Default monitor timeout as Duration.
#[must_use]
pub const fn monitor_timeout() -> Duration {
    Duration::from_secs(MONITOR_TIMEOUT_SECS)
}

/// Default check timeout as Duration.
#[must_use]
pub const fn check_timeout() -> Duration {
    Duration::from_secs(CHECK_TIMEOUT_SECS)
}
