//! Connection-type checker.
//!
//! The exit code is the contract, meant for shell scripts:
//!
//! | Classification                  | Code |
//! |---------------------------------|------|
//! | residential                     | 0    |
//! | datacenter                      | 1    |
//! | vpn                             | 2    |
//! | anything else, or missing       | 3    |
//! | fetch failed                    | 99   |

use std::fmt;

use crate::api::{ApiError, ConnectionReport, ConnectionType, IpApi};
use crate::transport::HttpClient;

pub const EXIT_RESIDENTIAL: u8 = 0;
pub const EXIT_DATACENTER: u8 = 1;
pub const EXIT_VPN: u8 = 2;
pub const EXIT_UNKNOWN: u8 = 3;
pub const EXIT_FETCH_FAILED: u8 = 99;

const UNKNOWN_FIELD: &str = "Unknown";

/// Maps a classification to its exit code.
#[must_use]
pub fn classify(kind: Option<&ConnectionType>) -> u8 {
    match kind {
        Some(ConnectionType::Residential) => EXIT_RESIDENTIAL,
        Some(ConnectionType::Datacenter) => EXIT_DATACENTER,
        Some(ConnectionType::Vpn) => EXIT_VPN,
        _ => EXIT_UNKNOWN,
    }
}

/// Result of the connection-type check.
#[derive(Debug)]
pub enum ConnectionCheck {
    /// The API answered.
    Classified(ConnectionReport),
    /// The fetch failed.
    Failed(ApiError),
}

impl ConnectionCheck {
    /// Process exit code for this result.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Classified(report) => classify(report.connection_type.as_ref()),
            Self::Failed(_) => EXIT_FETCH_FAILED,
        }
    }
}

/// Runs the check: one fetch of the connection-type endpoint.
pub async fn check_connection<H: HttpClient>(api: &IpApi<H>) -> ConnectionCheck {
    match api.fetch_connection_type().await {
        Ok(report) => {
            tracing::debug!(connection_type = ?report.connection_type, "Connection classified");
            ConnectionCheck::Classified(report)
        }
        Err(e) => {
            tracing::error!("Connection check failed: {e}");
            ConnectionCheck::Failed(e)
        }
    }
}

fn status_line(kind: Option<&ConnectionType>) -> &'static str {
    match kind {
        Some(ConnectionType::Residential) => "✅ Residential connection (likely home/mobile ISP)",
        Some(ConnectionType::Datacenter) => "⚠️  Datacenter connection (hosting provider/VPS)",
        Some(ConnectionType::Vpn) => "🔒 VPN/Proxy detected",
        _ => "❓ Connection type unknown",
    }
}

impl fmt::Display for ConnectionCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = match self {
            Self::Classified(report) => report,
            Self::Failed(e) => return write!(f, "❌ Error: {e}"),
        };

        let kind = report.connection_type.as_ref();
        writeln!(f, "🔍 Connection Analysis:")?;
        writeln!(f)?;
        writeln!(
            f,
            "IP:              {}",
            report.ip.as_deref().unwrap_or(UNKNOWN_FIELD)
        )?;
        writeln!(
            f,
            "Connection Type: {}",
            kind.map_or(ConnectionType::UNKNOWN, ConnectionType::as_str)
        )?;
        writeln!(
            f,
            "Provider:        {}",
            report.provider.as_deref().unwrap_or(UNKNOWN_FIELD)
        )?;
        match &report.asn {
            Some(asn) => writeln!(f, "ASN:             {asn}")?,
            None => writeln!(f, "ASN:             {UNKNOWN_FIELD}")?,
        }
        writeln!(f)?;
        write!(f, "{}", status_line(kind))
    }
}
