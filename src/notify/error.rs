//! Error type for notification delivery.

use thiserror::Error;

use crate::transport::HttpError;

/// Failure to deliver one notification.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// The request never produced a response.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The webhook answered with a non-success status.
    #[error("Webhook returned HTTP {status}")]
    NonSuccessStatus {
        /// Status code received
        status: http::StatusCode,
        /// Response body, if it was valid UTF-8
        body: Option<String>,
    },

    /// The message body could not be encoded.
    #[error("Failed to encode payload: {0}")]
    Serialize(#[from] serde_json::Error),
}
