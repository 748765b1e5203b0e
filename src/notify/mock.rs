//! Recording notifier for tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use super::{Channel, IpChange, Notifier, NotifyError};
use crate::transport::HttpError;

/// Notifier that counts attempts and optionally fails every one.
#[derive(Debug)]
pub struct MockNotifier {
    channel: Channel,
    fail: bool,
    attempts: AtomicUsize,
}

impl MockNotifier {
    pub const fn succeeding(channel: Channel) -> Self {
        Self {
            channel,
            fail: false,
            attempts: AtomicUsize::new(0),
        }
    }

    pub const fn failing(channel: Channel) -> Self {
        Self {
            channel,
            fail: true,
            attempts: AtomicUsize::new(0),
        }
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

impl Notifier for MockNotifier {
    fn channel(&self) -> Channel {
        self.channel
    }

    async fn notify(&self, _change: &IpChange<'_>) -> Result<(), NotifyError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(NotifyError::Http(HttpError::Timeout));
        }
        Ok(())
    }
}
