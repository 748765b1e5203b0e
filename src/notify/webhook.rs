//! Notifier trait and webhook implementation.

use std::time::Duration;

use chrono::{DateTime, Utc};
use url::Url;

use crate::api::IpInfo;
use crate::transport::{HttpClient, HttpRequest};

use super::{Channel, NotifyError};

/// An observed change of the public address.
#[derive(Debug, Clone, Copy)]
pub struct IpChange<'a> {
    /// Address from the cached baseline.
    pub previous_ip: &'a str,
    /// Freshly fetched document.
    pub current: &'a IpInfo,
    /// When the change was detected.
    pub detected_at: DateTime<Utc>,
}

/// Trait for delivering change notifications.
///
/// Implementations make one attempt and report the outcome; the caller
/// decides what a failure means.
pub trait Notifier: Send + Sync {
    /// Channel this notifier delivers to.
    fn channel(&self) -> Channel;

    /// Delivers a notification about the change.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError`] if the request fails or is rejected.
    fn notify(
        &self,
        change: &IpChange<'_>,
    ) -> impl std::future::Future<Output = Result<(), NotifyError>> + Send;
}

/// Posts the channel's JSON payload to an incoming-webhook URL.
///
/// # Example
///
/// ```
/// use myip_tools::notify::{Channel, WebhookNotifier};
/// use myip_tools::transport::ReqwestClient;
/// use std::time::Duration;
/// use url::Url;
///
/// let slack = WebhookNotifier::new(
///     ReqwestClient::new(),
///     Channel::Slack,
///     Url::parse("https://hooks.slack.com/services/T000/B000/XXXX").unwrap(),
///     Duration::from_secs(10),
/// );
/// ```
#[derive(Debug, Clone)]
pub struct WebhookNotifier<H> {
    client: H,
    channel: Channel,
    url: Url,
    timeout: Duration,
}

impl<H> WebhookNotifier<H> {
    /// Creates a notifier posting to `url` with the given request timeout.
    #[must_use]
    pub const fn new(client: H, channel: Channel, url: Url, timeout: Duration) -> Self {
        Self {
            client,
            channel,
            url,
            timeout,
        }
    }

    /// Returns the configured URL.
    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }
}

impl<H: HttpClient> WebhookNotifier<H> {
    fn build_request(&self, change: &IpChange<'_>) -> Result<HttpRequest, NotifyError> {
        let payload = self.channel.payload(change);
        Ok(HttpRequest::post(self.url.clone())
            .with_timeout(self.timeout)
            .with_json(&payload)?)
    }
}

impl<H: HttpClient> Notifier for WebhookNotifier<H> {
    fn channel(&self) -> Channel {
        self.channel
    }

    async fn notify(&self, change: &IpChange<'_>) -> Result<(), NotifyError> {
        let request = self.build_request(change)?;
        let response = self.client.request(request).await?;

        if response.is_success() {
            return Ok(());
        }

        Err(NotifyError::NonSuccessStatus {
            status: response.status,
            body: response.body_text().map(ToString::to_string),
        })
    }
}

/// Outcome of one channel's delivery attempt.
#[derive(Debug)]
pub struct Delivery {
    pub channel: Channel,
    pub result: Result<(), NotifyError>,
}

impl Delivery {
    /// Returns true if the notification was accepted.
    #[must_use]
    pub const fn is_delivered(&self) -> bool {
        self.result.is_ok()
    }
}

/// Attempts delivery on every notifier, one after the other.
///
/// A failure on one channel is logged and recorded; the remaining channels
/// are still attempted.
pub async fn notify_all<N: Notifier>(notifiers: &[N], change: &IpChange<'_>) -> Vec<Delivery> {
    let mut deliveries = Vec::with_capacity(notifiers.len());

    for notifier in notifiers {
        let channel = notifier.channel();
        let result = notifier.notify(change).await;

        match &result {
            Ok(()) => tracing::info!(%channel, "Alert sent"),
            Err(e) => tracing::error!(%channel, "Alert failed: {e}"),
        }

        deliveries.push(Delivery { channel, result });
    }

    deliveries
}
