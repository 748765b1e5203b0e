//! Error type for API calls.

use thiserror::Error;

use crate::transport::HttpError;

/// Failure of a single API fetch.
///
/// Every variant is handled the same way by the checks: the fetch is
/// considered failed. The variants exist for diagnostics.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (connection, timeout, URL).
    #[error("Request to {url} failed: {source}")]
    Http {
        /// Requested URL
        url: String,
        /// Underlying transport error
        #[source]
        source: HttpError,
    },

    /// The server answered with a non-success status.
    #[error("{url} returned HTTP {status}")]
    Status {
        /// Requested URL
        url: String,
        /// Status code received
        status: http::StatusCode,
    },

    /// The body is not the expected JSON document, or a required field is missing.
    #[error("Malformed response from {url}: {source}")]
    Decode {
        /// Requested URL
        url: String,
        /// Decoder error naming the offending field
        #[source]
        source: serde_json::Error,
    },

    /// A plain-text endpoint returned nothing usable.
    #[error("Empty response from {url}")]
    EmptyBody {
        /// Requested URL
        url: String,
    },
}

impl ApiError {
    /// Returns true if the request timed out.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        match self {
            Self::Http { source, .. } => source.is_timeout(),
            _ => false,
        }
    }
}
