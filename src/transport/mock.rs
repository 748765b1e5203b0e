//! Scripted HTTP client for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use super::{HttpClient, HttpError, HttpRequest, HttpResponse};

/// What the mock does for a given URL.
#[derive(Debug, Clone)]
pub enum Reply {
    /// Answer with this status and body.
    Respond(http::StatusCode, Vec<u8>),
    /// Fail with a connection error.
    Refuse,
    /// Fail with a timeout error.
    Timeout,
    /// Never answer.
    Hang,
}

impl Reply {
    /// A 200 response with the given body.
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self::Respond(http::StatusCode::OK, body.into())
    }

    /// A 200 response with the given JSON document.
    pub fn json(value: &serde_json::Value) -> Self {
        Self::ok(serde_json::to_vec(value).unwrap())
    }

    /// An empty response with the given status.
    pub const fn status(status: http::StatusCode) -> Self {
        Self::Respond(status, Vec::new())
    }
}

/// HTTP client that answers from a URL → [`Reply`] table and records requests.
///
/// URLs without an entry are refused.
#[derive(Debug, Default)]
pub struct MockClient {
    replies: HashMap<String, Reply>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the reply for a URL.
    #[must_use]
    pub fn on(mut self, url: &str, reply: Reply) -> Self {
        self.replies.insert(url.to_string(), reply);
        self
    }

    /// Requests received so far, in order.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of requests sent to the given URL.
    pub fn calls_to(&self, url: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.url.as_str() == url)
            .count()
    }
}

impl HttpClient for MockClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        let reply = self
            .replies
            .get(req.url.as_str())
            .cloned()
            .unwrap_or(Reply::Refuse);
        self.requests.lock().unwrap().push(req);

        match reply {
            Reply::Respond(status, body) => Ok(HttpResponse::new(status, body)),
            Reply::Refuse => Err(HttpError::Connection(Box::new(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "connection refused",
            )))),
            Reply::Timeout => Err(HttpError::Timeout),
            Reply::Hang => std::future::pending().await,
        }
    }
}
