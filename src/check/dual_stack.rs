//! Dual-stack checker.
//!
//! Probes the IPv4-only and IPv6-only hosts concurrently. Each probe has its
//! own timeout and failure handling, so a dead IPv6 path only marks IPv6
//! absent. After both finish, one more fetch supplies descriptive metadata;
//! if it fails the metadata section is left out.

use std::fmt;

use crate::api::{ConnectionType, IpApi, IpInfo};
use crate::transport::{AddressFamily, HttpClient};

/// Result of the dual-stack check. Informational only; exit code is 0.
#[derive(Debug, Clone, Default)]
pub struct DualStackReport {
    /// Address seen over IPv4, if reachable.
    pub ipv4: Option<String>,
    /// Address seen over IPv6, if reachable.
    pub ipv6: Option<String>,
    /// Metadata from the main API, if it answered.
    pub info: Option<IpInfo>,
}

impl DualStackReport {
    /// Address for the given family, if present.
    #[must_use]
    pub fn address(&self, family: AddressFamily) -> Option<&str> {
        match family {
            AddressFamily::V4 => self.ipv4.as_deref(),
            AddressFamily::V6 => self.ipv6.as_deref(),
        }
    }

    /// Returns true if both families are reachable.
    #[must_use]
    pub const fn is_dual_stack(&self) -> bool {
        self.ipv4.is_some() && self.ipv6.is_some()
    }
}

/// Runs the check.
///
/// `ipv4` and `ipv6` should be clients pinned to their family; `info` is
/// used for the metadata fetch after both probes completed.
pub async fn check_dual_stack<H: HttpClient>(
    ipv4: &IpApi<H>,
    ipv6: &IpApi<H>,
    info: &IpApi<H>,
) -> DualStackReport {
    let (v4, v6) = tokio::join!(
        probe(ipv4, AddressFamily::V4),
        probe(ipv6, AddressFamily::V6)
    );

    let info = match info.fetch_info().await {
        Ok(info) => Some(info),
        Err(e) => {
            tracing::warn!("Connection info unavailable: {e}");
            None
        }
    };

    DualStackReport {
        ipv4: v4,
        ipv6: v6,
        info,
    }
}

/// Fetches the plain address for one family; logs on completion.
async fn probe<H: HttpClient>(api: &IpApi<H>, family: AddressFamily) -> Option<String> {
    match api.fetch_plain_ip(family).await {
        Ok(ip) => {
            tracing::debug!(%family, %ip, "Probe answered");
            Some(ip)
        }
        Err(e) => {
            tracing::debug!(%family, "Probe failed: {e}");
            None
        }
    }
}

fn connection_badge(kind: &ConnectionType) -> Option<&'static str> {
    match kind {
        ConnectionType::Residential => Some("🏠 Residential"),
        ConnectionType::Vpn => Some("🔒 VPN"),
        ConnectionType::Datacenter => Some("🖥️ Datacenter"),
        ConnectionType::Tor => Some("🧅 Tor"),
        ConnectionType::Unknown | ConnectionType::Other(_) => None,
    }
}

fn write_family(
    f: &mut fmt::Formatter<'_>,
    family: AddressFamily,
    address: Option<&str>,
) -> fmt::Result {
    writeln!(f, "📡 {family}:")?;
    match address {
        Some(ip) => writeln!(f, "   ✅ {ip}"),
        None => writeln!(f, "   ❌ No {family} connectivity"),
    }
}

impl fmt::Display for DualStackReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "🔍 Checking dual-stack connectivity...")?;
        writeln!(f)?;
        write_family(f, AddressFamily::V4, self.ipv4.as_deref())?;
        writeln!(f)?;
        write_family(f, AddressFamily::V6, self.ipv6.as_deref())?;

        if let Some(info) = &self.info {
            writeln!(f)?;
            writeln!(f, "📊 Full connection info:")?;
            writeln!(f, "   IP: {}", info.ip)?;
            writeln!(f, "   Type: {}", info.kind)?;
            writeln!(f, "   Location: {}", info.place())?;
            writeln!(f, "   ISP: {}", info.network.isp)?;
            if let Some(badge) = info.connection_type.as_ref().and_then(connection_badge) {
                writeln!(f, "   Connection: {badge}")?;
            }
        }

        writeln!(f)?;
        write!(f, "🦊 Powered by myip.foo")
    }
}
