//! Transport failures.

use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Why no usable response was received.
///
/// An error status from the server is not an `HttpError`; callers inspect
/// [`HttpResponse::status`](super::HttpResponse::status) for that.
#[derive(Debug, Error)]
pub enum HttpError {
    /// DNS, connect, TLS failure, or no route for a pinned address family.
    #[error("Connection error: {0}")]
    Connection(#[source] BoxError),

    /// The exchange did not finish within the request timeout.
    #[error("Request timed out")]
    Timeout,

    /// The URL could not be turned into a request.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The status line arrived but reading the body failed.
    #[error("Failed to read response body: {0}")]
    Body(#[source] BoxError),
}

impl HttpError {
    /// Returns true for [`HttpError::Timeout`].
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }
}
