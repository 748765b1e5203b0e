//! Typed client for the myip.foo endpoints.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::transport::{AddressFamily, HttpClient, HttpError, HttpRequest, HttpResponse};

use super::{ApiError, ConnectionReport, IpInfo};

/// Default base of the JSON API.
pub const DEFAULT_API_BASE: &str = "https://myip.foo/";

/// Default base of the IPv4-only host (A record only).
pub const DEFAULT_IPV4_BASE: &str = "https://ipv4.myip.foo/";

/// Default base of the IPv6-only host (AAAA record only).
pub const DEFAULT_IPV6_BASE: &str = "https://ipv6.myip.foo/";

/// Resolved endpoint URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Full IP information (`/api`)
    pub info: Url,
    /// Connection classification (`/api/connection-type`)
    pub connection_type: Url,
    /// Bare IPv4 address as text (`/ip` on the IPv4-only host)
    pub ipv4: Url,
    /// Bare IPv6 address as text (`/ip` on the IPv6-only host)
    pub ipv6: Url,
}

impl Endpoints {
    /// Derives every endpoint from the three base URLs.
    ///
    /// Paths are joined relative to each base, so a base with a path
    /// component should end with `/`.
    ///
    /// # Errors
    ///
    /// Returns the parse error if a joined URL is invalid.
    pub fn from_bases(api: &Url, ipv4: &Url, ipv6: &Url) -> Result<Self, url::ParseError> {
        Ok(Self {
            info: api.join("api")?,
            connection_type: api.join("api/connection-type")?,
            ipv4: ipv4.join("ip")?,
            ipv6: ipv6.join("ip")?,
        })
    }

    /// Plain-text endpoint for the given address family.
    #[must_use]
    pub const fn plain_ip(&self, family: AddressFamily) -> &Url {
        match family {
            AddressFamily::V4 => &self.ipv4,
            AddressFamily::V6 => &self.ipv6,
        }
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        let api = Url::parse(DEFAULT_API_BASE).expect("default API base is a valid URL");
        let ipv4 = Url::parse(DEFAULT_IPV4_BASE).expect("default IPv4 base is a valid URL");
        let ipv6 = Url::parse(DEFAULT_IPV6_BASE).expect("default IPv6 base is a valid URL");
        Self::from_bases(&api, &ipv4, &ipv6).expect("default endpoints join cleanly")
    }
}

/// Client for the IP-information API.
///
/// Every call is a single GET bounded by the configured timeout. There are
/// no retries.
///
/// # Example
///
/// ```no_run
/// use myip_tools::api::{Endpoints, IpApi};
/// use myip_tools::transport::ReqwestClient;
/// use std::time::Duration;
///
/// # async fn example() -> Result<(), myip_tools::api::ApiError> {
/// let api = IpApi::new(ReqwestClient::new(), Endpoints::default(), Duration::from_secs(5));
/// let info = api.fetch_info().await?;
/// println!("{} ({})", info.ip, info.place());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct IpApi<H> {
    client: H,
    endpoints: Endpoints,
    timeout: Duration,
}

impl<H> IpApi<H> {
    /// Creates a client using the given transport, endpoints and per-call timeout.
    #[must_use]
    pub const fn new(client: H, endpoints: Endpoints, timeout: Duration) -> Self {
        Self {
            client,
            endpoints,
            timeout,
        }
    }

    /// Returns the configured endpoints.
    #[must_use]
    pub const fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Returns the per-call timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl<H: HttpClient> IpApi<H> {
    /// Fetches the full IP information document.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, non-2xx status, or when the
    /// document lacks a required field.
    pub async fn fetch_info(&self) -> Result<IpInfo, ApiError> {
        let url = &self.endpoints.info;
        let document: Value = self.get_json(url).await?;
        IpInfo::from_document(document).map_err(|source| ApiError::Decode {
            url: url.to_string(),
            source,
        })
    }

    /// Fetches the connection classification document.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, non-2xx status, or invalid JSON.
    pub async fn fetch_connection_type(&self) -> Result<ConnectionReport, ApiError> {
        self.get_json(&self.endpoints.connection_type).await
    }

    /// Fetches the bare address text from the family-specific host.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, non-2xx status, or an empty body.
    pub async fn fetch_plain_ip(&self, family: AddressFamily) -> Result<String, ApiError> {
        let url = self.endpoints.plain_ip(family);
        let response = self.get(url).await?;

        let text = response.trimmed_text();
        if text.is_empty() {
            return Err(ApiError::EmptyBody {
                url: url.to_string(),
            });
        }
        Ok(text)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T, ApiError> {
        let response = self.get(url).await?;
        serde_json::from_slice(&response.body).map_err(|source| ApiError::Decode {
            url: url.to_string(),
            source,
        })
    }

    async fn get(&self, url: &Url) -> Result<HttpResponse, ApiError> {
        tracing::debug!(%url, timeout_secs = self.timeout.as_secs(), "GET");

        let request = HttpRequest::get(url.clone()).with_timeout(self.timeout);

        // Bounded here as well as in the transport.
        let response = tokio::time::timeout(self.timeout, self.client.request(request))
            .await
            .unwrap_or(Err(HttpError::Timeout))
            .map_err(|source| ApiError::Http {
                url: url.to_string(),
                source,
            })?;

        if !response.is_success() {
            return Err(ApiError::Status {
                url: url.to_string(),
                status: response.status,
            });
        }

        Ok(response)
    }
}
