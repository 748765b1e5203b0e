//! Full IP information report.

use std::fmt;

use crate::api::{ApiError, IpApi, IpInfo, Scalar};
use crate::transport::HttpClient;

/// Placeholder for optional fields the API did not send.
const MISSING: &str = "n/a";

/// Result of the lookup.
#[derive(Debug)]
pub enum LookupCheck {
    Found(Box<IpInfo>),
    Failed(ApiError),
}

impl LookupCheck {
    /// 0 when the document was fetched, 1 otherwise.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Found(_) => 0,
            Self::Failed(_) => 1,
        }
    }
}

/// Fetches the full document.
pub async fn lookup<H: HttpClient>(api: &IpApi<H>) -> LookupCheck {
    match api.fetch_info().await {
        Ok(info) => LookupCheck::Found(Box::new(info)),
        Err(e) => {
            tracing::error!("Lookup failed: {e}");
            LookupCheck::Failed(e)
        }
    }
}

/// Human-readable rendering of an [`IpInfo`].
#[derive(Debug, Clone, Copy)]
pub struct InfoReport<'a>(pub &'a IpInfo);

fn or_missing(value: Option<&str>) -> &str {
    value.unwrap_or(MISSING)
}

fn scalar_or_missing(value: Option<&Scalar>) -> String {
    value.map_or_else(|| MISSING.to_string(), ToString::to_string)
}

impl fmt::Display for InfoReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let info = self.0;
        let location = &info.location;
        let edge = info.cloudflare.as_ref();

        writeln!(f, "🌐 IP Information:")?;
        writeln!(f, "─────────────────────────────")?;
        writeln!(f, "IP Address: {} ({})", info.ip, info.kind)?;
        writeln!(f)?;
        writeln!(f, "📍 Location:")?;
        writeln!(f, "  Country: {}", location.country)?;
        writeln!(f, "  City: {}", location.city)?;
        writeln!(f, "  Region: {}", or_missing(location.region.as_deref()))?;
        writeln!(f, "  Timezone: {}", or_missing(location.timezone.as_deref()))?;
        writeln!(
            f,
            "  Coordinates: {}, {}",
            scalar_or_missing(location.latitude.as_ref()),
            scalar_or_missing(location.longitude.as_ref())
        )?;
        writeln!(f)?;
        writeln!(f, "🌐 Network:")?;
        writeln!(f, "  ISP: {}", info.network.isp)?;
        writeln!(f, "  ASN: {}", scalar_or_missing(info.network.asn.as_ref()))?;
        writeln!(f)?;
        writeln!(f, "☁️  Cloudflare:")?;
        writeln!(
            f,
            "  Datacenter: {}",
            or_missing(edge.and_then(|e| e.colo.as_deref()))
        )?;
        write!(
            f,
            "  Ray ID: {}",
            or_missing(edge.and_then(|e| e.ray.as_deref()))
        )
    }
}

impl fmt::Display for LookupCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Found(info) => fmt::Display::fmt(&InfoReport(info), f),
            Self::Failed(e) => write!(f, "❌ Error fetching IP info: {e}"),
        }
    }
}
