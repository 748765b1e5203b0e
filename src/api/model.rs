//! Documents returned by the API.
//!
//! Fields the checks depend on are required: a document without them fails
//! to decode and the fetch counts as failed. Everything else is optional and
//! rendered with a placeholder. A fetched [`IpInfo`] also keeps the document
//! exactly as received, so the cache is written back byte-for-byte in
//! content, explicit `null`s included.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Full IP information as returned by `/api`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IpInfo {
    /// Public address as reported by the API.
    pub ip: String,

    /// Address family label, e.g. `IPv4` or `IPv6`.
    #[serde(rename = "type")]
    pub kind: String,

    /// Geographic location.
    pub location: Location,

    /// Network operator.
    pub network: Network,

    /// Connection classification, when the API provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_type: Option<ConnectionType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asn: Option<Scalar>,

    /// Edge node that served the request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloudflare: Option<Edge>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,

    #[serde(skip)]
    document: Option<Value>,
}

impl IpInfo {
    /// Decodes a document and keeps it verbatim alongside the typed view.
    ///
    /// # Errors
    ///
    /// Returns an error if a required field is missing or mistyped.
    pub fn from_document(document: Value) -> Result<Self, serde_json::Error> {
        let mut info = Self::deserialize(&document)?;
        info.document = Some(document);
        Ok(info)
    }

    /// The document as received, if this value came from [`Self::from_document`].
    #[must_use]
    pub const fn document(&self) -> Option<&Value> {
        self.document.as_ref()
    }

    /// "City, Country" as shown in reports and notifications.
    #[must_use]
    pub fn place(&self) -> String {
        format!("{}, {}", self.location.city, self.location.country)
    }

    /// Connection classification label, `unknown` when absent.
    #[must_use]
    pub fn connection_label(&self) -> &str {
        self.connection_type
            .as_ref()
            .map_or(ConnectionType::UNKNOWN, ConnectionType::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub city: String,
    pub country: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<Scalar>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<Scalar>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Network {
    pub isp: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asn: Option<Scalar>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Cloudflare edge details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colo: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ray: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Response of `/api/connection-type`.
///
/// Every field is optional; absent values are displayed as `Unknown`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionReport {
    #[serde(default)]
    pub ip: Option<String>,

    #[serde(default)]
    pub connection_type: Option<ConnectionType>,

    #[serde(default)]
    pub provider: Option<String>,

    #[serde(default)]
    pub asn: Option<Scalar>,
}

/// A value the API sends either as a number or as a string (ASN, coordinates).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Connection classification reported by the API.
///
/// Values outside the known set are preserved in [`ConnectionType::Other`]
/// so they can be displayed and cached unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ConnectionType {
    Residential,
    Datacenter,
    Vpn,
    Tor,
    Unknown,
    Other(String),
}

impl ConnectionType {
    /// Label used when no classification is available.
    pub const UNKNOWN: &'static str = "unknown";

    /// The wire value of this classification.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Residential => "residential",
            Self::Datacenter => "datacenter",
            Self::Vpn => "vpn",
            Self::Tor => "tor",
            Self::Unknown => Self::UNKNOWN,
            Self::Other(s) => s,
        }
    }
}

impl From<&str> for ConnectionType {
    fn from(value: &str) -> Self {
        match value {
            "residential" => Self::Residential,
            "datacenter" => Self::Datacenter,
            "vpn" => Self::Vpn,
            "tor" => Self::Tor,
            "unknown" => Self::Unknown,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for ConnectionType {
    fn from(value: String) -> Self {
        match Self::from(value.as_str()) {
            Self::Other(_) => Self::Other(value),
            known => known,
        }
    }
}

impl From<ConnectionType> for String {
    fn from(value: ConnectionType) -> Self {
        match value {
            ConnectionType::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ConnectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
