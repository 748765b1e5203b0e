//! Change monitor.
//!
//! Fetches the current IP information, compares its `ip` with the cached
//! baseline, notifies every configured channel on change, and finally
//! overwrites the cache.
//!
//! Failure handling:
//! - Fetch failure: nothing else happens; the previous cache is kept.
//! - Missing or unreadable cache: treated as first run, no alert.
//! - Channel failure: logged; other channels and the cache write proceed.
//! - Cache write failure: logged and reported; the run still completes.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::api::{ApiError, IpApi, IpInfo};
use crate::notify::{Delivery, IpChange, Notifier, notify_all};
use crate::state::{LoadResult, StateError, StateStore};
use crate::time::{Clock, SystemClock, local_time};
use crate::transport::HttpClient;

/// How the fresh address relates to the baseline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeStatus {
    /// No usable baseline; the address was only recorded.
    FirstRun,
    /// Same address as the baseline.
    Unchanged,
    /// The address differs from the baseline.
    Changed {
        /// Address from the baseline.
        previous_ip: String,
    },
}

/// Everything a monitor run did.
#[derive(Debug)]
pub enum MonitorOutcome {
    /// The fetch failed; no comparison, no alert, no cache write.
    FetchFailed {
        checked_at: DateTime<Utc>,
        error: ApiError,
    },

    /// The fetch succeeded and the run completed.
    Checked {
        checked_at: DateTime<Utc>,
        status: ChangeStatus,
        current: Box<IpInfo>,
        /// One entry per configured channel when the address changed.
        deliveries: Vec<Delivery>,
        /// Result of the final cache write.
        cache: Result<(), StateError>,
    },
}

impl MonitorOutcome {
    /// When the run started.
    #[must_use]
    pub const fn checked_at(&self) -> DateTime<Utc> {
        match self {
            Self::FetchFailed { checked_at, .. } | Self::Checked { checked_at, .. } => *checked_at,
        }
    }

    /// Returns the change status, if the fetch succeeded.
    #[must_use]
    pub const fn status(&self) -> Option<&ChangeStatus> {
        match self {
            Self::FetchFailed { .. } => None,
            Self::Checked { status, .. } => Some(status),
        }
    }

    /// Returns the delivery attempts (empty unless the address changed).
    #[must_use]
    pub fn deliveries(&self) -> &[Delivery] {
        match self {
            Self::FetchFailed { .. } => &[],
            Self::Checked { deliveries, .. } => deliveries,
        }
    }

    /// The monitor always exits 0 once it has run to completion.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        0
    }
}

/// The change-detection pipeline.
///
/// # Type Parameters
///
/// - `H`: HTTP client used for the API fetch
/// - `S`: cache store
/// - `N`: notifier, one per configured channel
/// - `C`: clock for the detection timestamp (defaults to [`SystemClock`])
#[derive(Debug)]
pub struct ChangeMonitor<H, S, N, C = SystemClock> {
    api: IpApi<H>,
    store: S,
    notifiers: Vec<N>,
    clock: C,
}

impl<H, S, N> ChangeMonitor<H, S, N, SystemClock> {
    /// Creates a monitor using the system clock.
    #[must_use]
    pub const fn new(api: IpApi<H>, store: S, notifiers: Vec<N>) -> Self {
        Self {
            api,
            store,
            notifiers,
            clock: SystemClock,
        }
    }
}

impl<H, S, N, C> ChangeMonitor<H, S, N, C> {
    /// Replaces the clock.
    #[must_use]
    pub fn with_clock<C2>(self, clock: C2) -> ChangeMonitor<H, S, N, C2> {
        ChangeMonitor {
            api: self.api,
            store: self.store,
            notifiers: self.notifiers,
            clock,
        }
    }

    /// Returns the cache store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Returns the configured notifiers.
    #[must_use]
    pub fn notifiers(&self) -> &[N] {
        &self.notifiers
    }
}

impl<H: HttpClient, S: StateStore, N: Notifier, C: Clock> ChangeMonitor<H, S, N, C> {
    /// Runs one check.
    pub async fn run(&self) -> MonitorOutcome {
        let checked_at = self.clock.now();
        let current = match self.api.fetch_info().await {
            Ok(info) => info,
            Err(error) => {
                tracing::error!("Failed to fetch IP: {error}");
                return MonitorOutcome::FetchFailed { checked_at, error };
            }
        };

        let baseline = self.load_baseline();
        let status = compare(baseline.as_deref(), &current);

        let deliveries = match &status {
            ChangeStatus::Changed { previous_ip } => {
                tracing::info!(previous = %previous_ip, current = %current.ip, "IP changed");
                let change = IpChange {
                    previous_ip,
                    current: &current,
                    detected_at: checked_at,
                };
                notify_all(&self.notifiers, &change).await
            }
            ChangeStatus::FirstRun => {
                tracing::info!(ip = %current.ip, "No baseline, recording current IP");
                Vec::new()
            }
            ChangeStatus::Unchanged => {
                tracing::debug!(ip = %current.ip, "IP unchanged");
                Vec::new()
            }
        };

        let cache = self.store.save(&current).await;
        if let Err(e) = &cache {
            tracing::error!("Failed to save IP cache: {e}");
        }

        MonitorOutcome::Checked {
            checked_at,
            status,
            current: Box::new(current),
            deliveries,
            cache,
        }
    }

    fn load_baseline(&self) -> Option<String> {
        match self.store.load() {
            LoadResult::Loaded(cached) => Some(cached.ip),
            LoadResult::NotFound => {
                tracing::debug!("No cached IP found");
                None
            }
            LoadResult::Corrupted { reason } => {
                tracing::warn!("Cache unusable ({reason}), treating as first run");
                None
            }
        }
    }
}

/// Decides the change status from the cached address. Only `ip` is compared.
#[must_use]
pub fn compare(baseline: Option<&str>, current: &IpInfo) -> ChangeStatus {
    match baseline {
        None => ChangeStatus::FirstRun,
        Some(previous) if previous == current.ip => ChangeStatus::Unchanged,
        Some(previous) => ChangeStatus::Changed {
            previous_ip: previous.to_string(),
        },
    }
}

impl fmt::Display for MonitorOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "🔍 Checking IP address... [{}]", local_time(self.checked_at()))?;

        let (status, current, deliveries, cache) = match self {
            Self::FetchFailed { error, .. } => return write!(f, "❌ Failed to fetch IP: {error}"),
            Self::Checked {
                status,
                current,
                deliveries,
                cache,
                ..
            } => (status, current, deliveries, cache),
        };

        match status {
            ChangeStatus::FirstRun => write!(f, "📝 Initial IP recorded: {}", current.ip)?,
            ChangeStatus::Unchanged => write!(f, "✅ IP unchanged: {}", current.ip)?,
            ChangeStatus::Changed { previous_ip } => {
                writeln!(f, "⚠️  IP changed: {previous_ip} → {}", current.ip)?;
                writeln!(f, "   Location: {}", current.place())?;
                write!(f, "   ISP: {}", current.network.isp)?;
            }
        }

        for delivery in deliveries {
            match &delivery.result {
                Ok(()) => write!(f, "\n✅ {} alert sent", delivery.channel)?,
                Err(e) => write!(f, "\n❌ {} alert failed: {e}", delivery.channel)?,
            }
        }

        if let Err(e) = cache {
            write!(f, "\n❌ Failed to save IP cache: {e}")?;
        }

        Ok(())
    }
}
