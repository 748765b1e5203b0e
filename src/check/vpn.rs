//! VPN verifier.
//!
//! Compares the country the API reports against the expected one. The
//! comparison is exact and case-sensitive. Exit code 0 on match, 1 for a
//! mismatch or a failed fetch alike.

use std::fmt;

use crate::api::{ApiError, IpApi, IpInfo};
use crate::transport::HttpClient;

/// Expected country when none is given.
pub const DEFAULT_EXPECTED_COUNTRY: &str = "US";

#[derive(Debug)]
pub enum VpnVerdict {
    /// The reported country equals the expectation.
    Match(Box<IpInfo>),
    /// The reported country differs.
    Mismatch(Box<IpInfo>),
    /// The fetch failed; counted as not connected.
    Unavailable(ApiError),
}

/// Result of the VPN check.
#[derive(Debug)]
pub struct VpnCheck {
    pub expected: String,
    pub verdict: VpnVerdict,
}

impl VpnCheck {
    /// Returns true only for a match.
    #[must_use]
    pub const fn is_match(&self) -> bool {
        matches!(self.verdict, VpnVerdict::Match(_))
    }

    /// 0 on match, 1 otherwise.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        if self.is_match() { 0 } else { 1 }
    }
}

/// Runs the check against the expected country code.
pub async fn verify_vpn<H: HttpClient>(api: &IpApi<H>, expected: &str) -> VpnCheck {
    let verdict = match api.fetch_info().await {
        Ok(info) if info.location.country == expected => VpnVerdict::Match(Box::new(info)),
        Ok(info) => {
            tracing::debug!(
                expected,
                actual = %info.location.country,
                "Country mismatch"
            );
            VpnVerdict::Mismatch(Box::new(info))
        }
        Err(e) => {
            tracing::error!("VPN check failed: {e}");
            VpnVerdict::Unavailable(e)
        }
    };

    VpnCheck {
        expected: expected.to_string(),
        verdict,
    }
}

impl fmt::Display for VpnCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let expected = &self.expected;
        match &self.verdict {
            VpnVerdict::Match(info) => {
                writeln!(f, "✅ VPN connected to {expected}")?;
                writeln!(f, "   IP: {}", info.ip)?;
                writeln!(f, "   Location: {}", info.place())?;
                write!(f, "   ISP: {}", info.network.isp)
            }
            VpnVerdict::Mismatch(info) => {
                writeln!(f, "❌ VPN not connected to {expected}")?;
                writeln!(f, "   Current location: {}", info.place())?;
                write!(f, "   IP: {}", info.ip)
            }
            VpnVerdict::Unavailable(e) => write!(f, "❌ Error checking VPN status: {e}"),
        }
    }
}
