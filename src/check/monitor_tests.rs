//! Tests for the change monitor.

use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeZone, Utc};

use super::monitor::compare;
use super::{ChangeMonitor, ChangeStatus, MonitorOutcome};
use crate::api::fixtures::{info, info_json};
use crate::api::{Endpoints, IpApi};
use crate::notify::mock::MockNotifier;
use crate::notify::{Channel, WebhookNotifier};
use crate::state::mock::MockStateStore;
use crate::state::{CachedIp, FileStateStore, LoadResult, StateStore};
use crate::time::{FixedClock, local_time};
use crate::transport::mock::{MockClient, Reply};

const INFO: &str = "https://myip.foo/api";

fn api_returning(ip: &str) -> IpApi<MockClient> {
    IpApi::new(
        MockClient::new().on(INFO, Reply::json(&info_json(ip, "NL"))),
        Endpoints::default(),
        Duration::from_secs(10),
    )
}

fn failing_api() -> IpApi<MockClient> {
    IpApi::new(MockClient::new(), Endpoints::default(), Duration::from_secs(10))
}

fn both_channels() -> Vec<MockNotifier> {
    vec![
        MockNotifier::succeeding(Channel::Slack),
        MockNotifier::succeeding(Channel::Discord),
    ]
}

mod compare_fn {
    use super::*;

    #[test]
    fn no_baseline_is_first_run() {
        assert_eq!(compare(None, &info("203.0.113.5", "NL")), ChangeStatus::FirstRun);
    }

    #[test]
    fn same_ip_is_unchanged() {
        let current = info("203.0.113.5", "NL");

        assert_eq!(compare(Some("203.0.113.5"), &current), ChangeStatus::Unchanged);
    }

    #[test]
    fn different_ip_is_changed() {
        let current = info("198.51.100.7", "NL");

        assert_eq!(
            compare(Some("203.0.113.5"), &current),
            ChangeStatus::Changed {
                previous_ip: "203.0.113.5".to_string()
            }
        );
    }
}

mod run {
    use super::*;

    #[tokio::test]
    async fn first_run_records_without_notifying() {
        let monitor = ChangeMonitor::new(
            api_returning("203.0.113.5"),
            MockStateStore::not_found(),
            both_channels(),
        );

        let outcome = monitor.run().await;

        assert_eq!(outcome.status(), Some(&ChangeStatus::FirstRun));
        assert!(outcome.deliveries().is_empty());
        assert!(monitor.notifiers().iter().all(|n| n.attempts() == 0));
        let saved = monitor.store().saved();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].ip, "203.0.113.5");
        assert!(outcome.to_string().contains("Initial IP recorded: 203.0.113.5"));
    }

    #[tokio::test]
    async fn report_opens_with_check_time() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 30).unwrap();
        let monitor = ChangeMonitor::new(
            api_returning("203.0.113.5"),
            MockStateStore::with_loaded("203.0.113.5"),
            both_channels(),
        )
        .with_clock(FixedClock(at));

        let outcome = monitor.run().await;
        let text = outcome.to_string();

        assert_eq!(outcome.checked_at(), at);
        assert_eq!(
            text.lines().next(),
            Some(format!("🔍 Checking IP address... [{}]", local_time(at)).as_str())
        );
        assert_eq!(text.lines().nth(1), Some("✅ IP unchanged: 203.0.113.5"));
    }

    #[tokio::test]
    async fn fetch_failure_report_also_has_check_time() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 30).unwrap();
        let monitor = ChangeMonitor::new(
            failing_api(),
            MockStateStore::not_found(),
            both_channels(),
        )
        .with_clock(FixedClock(at));

        let text = monitor.run().await.to_string();

        assert!(text.starts_with("🔍 Checking IP address... ["));
        assert!(text.lines().nth(1).unwrap().starts_with("❌ Failed to fetch IP"));
    }

    #[tokio::test]
    async fn corrupted_cache_is_treated_as_first_run() {
        let monitor = ChangeMonitor::new(
            api_returning("203.0.113.5"),
            MockStateStore::corrupted("Invalid JSON"),
            both_channels(),
        );

        let outcome = monitor.run().await;

        assert_eq!(outcome.status(), Some(&ChangeStatus::FirstRun));
        assert!(monitor.notifiers().iter().all(|n| n.attempts() == 0));
        assert_eq!(monitor.store().saved().len(), 1);
    }

    #[tokio::test]
    async fn unchanged_ip_rewrites_cache_without_notifying() {
        let monitor = ChangeMonitor::new(
            api_returning("203.0.113.5"),
            MockStateStore::with_loaded("203.0.113.5"),
            both_channels(),
        );

        let outcome = monitor.run().await;

        assert_eq!(outcome.status(), Some(&ChangeStatus::Unchanged));
        assert!(monitor.notifiers().iter().all(|n| n.attempts() == 0));
        assert_eq!(monitor.store().saved(), vec![info("203.0.113.5", "NL")]);
        assert!(outcome.to_string().contains("IP unchanged: 203.0.113.5"));
    }

    #[tokio::test]
    async fn changed_ip_notifies_every_channel_and_saves() {
        let monitor = ChangeMonitor::new(
            api_returning("198.51.100.7"),
            MockStateStore::with_loaded("203.0.113.5"),
            both_channels(),
        );

        let outcome = monitor.run().await;

        assert_eq!(
            outcome.status(),
            Some(&ChangeStatus::Changed {
                previous_ip: "203.0.113.5".to_string()
            })
        );
        assert!(monitor.notifiers().iter().all(|n| n.attempts() == 1));
        assert_eq!(outcome.deliveries().len(), 2);
        assert_eq!(monitor.store().saved()[0].ip, "198.51.100.7");

        let text = outcome.to_string();
        assert!(text.contains("IP changed: 203.0.113.5 → 198.51.100.7"));
        assert!(text.contains("Location: Amsterdam, NL"));
        assert!(text.contains("Slack alert sent"));
        assert!(text.contains("Discord alert sent"));
    }

    #[tokio::test]
    async fn failing_channel_does_not_stop_others_or_cache_write() {
        let monitor = ChangeMonitor::new(
            api_returning("198.51.100.7"),
            MockStateStore::with_loaded("203.0.113.5"),
            vec![
                MockNotifier::failing(Channel::Slack),
                MockNotifier::succeeding(Channel::Discord),
            ],
        );

        let outcome = monitor.run().await;

        assert_eq!(monitor.notifiers()[0].attempts(), 1);
        assert_eq!(monitor.notifiers()[1].attempts(), 1);
        assert!(!outcome.deliveries()[0].is_delivered());
        assert!(outcome.deliveries()[1].is_delivered());
        assert_eq!(monitor.store().saved().len(), 1);
        assert!(outcome.to_string().contains("Slack alert failed"));
    }

    #[tokio::test]
    async fn change_without_channels_still_saves() {
        let monitor = ChangeMonitor::new(
            api_returning("198.51.100.7"),
            MockStateStore::with_loaded("203.0.113.5"),
            Vec::<MockNotifier>::new(),
        );

        let outcome = monitor.run().await;

        assert!(matches!(outcome.status(), Some(ChangeStatus::Changed { .. })));
        assert!(outcome.deliveries().is_empty());
        assert_eq!(monitor.store().saved().len(), 1);
    }

    #[tokio::test]
    async fn fetch_failure_keeps_cache_and_skips_alerts() {
        let monitor = ChangeMonitor::new(
            failing_api(),
            MockStateStore::with_loaded("203.0.113.5"),
            both_channels(),
        );

        let outcome = monitor.run().await;

        assert!(matches!(outcome, MonitorOutcome::FetchFailed { .. }));
        assert!(monitor.store().saved().is_empty());
        assert!(monitor.notifiers().iter().all(|n| n.attempts() == 0));
        assert_eq!(outcome.exit_code(), 0);
        assert!(outcome.to_string().contains("Failed to fetch IP"));
    }

    #[tokio::test]
    async fn cache_write_failure_is_reported_not_fatal() {
        let monitor = ChangeMonitor::new(
            api_returning("203.0.113.5"),
            MockStateStore::not_found().failing_save(),
            both_channels(),
        );

        let outcome = monitor.run().await;

        match &outcome {
            MonitorOutcome::Checked { cache, .. } => assert!(cache.is_err()),
            other => panic!("Expected Checked, got {other:?}"),
        }
        assert_eq!(outcome.exit_code(), 0);
        assert!(outcome.to_string().contains("Failed to save IP cache"));
    }
}

mod end_to_end {
    use super::*;
    use tempfile::TempDir;

    const SLACK: &str = "https://hooks.slack.com/services/T000/B000/XXXX";
    const DISCORD: &str = "https://discord.com/api/webhooks/1/abc";

    fn notifier(
        client: &Arc<MockClient>,
        channel: Channel,
        url: &str,
    ) -> WebhookNotifier<Arc<MockClient>> {
        WebhookNotifier::new(
            Arc::clone(client),
            channel,
            url::Url::parse(url).unwrap(),
            Duration::from_secs(10),
        )
    }

    #[tokio::test]
    async fn file_cache_and_webhooks_across_two_runs() {
        let dir = TempDir::new().unwrap();
        let cache_path = dir.path().join("myip_current.json");
        let hooks = Arc::new(
            MockClient::new()
                .on(SLACK, Reply::status(http::StatusCode::INTERNAL_SERVER_ERROR))
                .on(DISCORD, Reply::status(http::StatusCode::NO_CONTENT)),
        );
        let clock = FixedClock(Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 30).unwrap());

        let first = ChangeMonitor::new(
            api_returning("203.0.113.5"),
            FileStateStore::new(&cache_path),
            vec![
                notifier(&hooks, Channel::Slack, SLACK),
                notifier(&hooks, Channel::Discord, DISCORD),
            ],
        )
        .with_clock(clock);
        assert_eq!(first.run().await.status(), Some(&ChangeStatus::FirstRun));
        assert!(hooks.requests().is_empty());

        let second = ChangeMonitor::new(
            api_returning("198.51.100.7"),
            FileStateStore::new(&cache_path),
            vec![
                notifier(&hooks, Channel::Slack, SLACK),
                notifier(&hooks, Channel::Discord, DISCORD),
            ],
        )
        .with_clock(clock);
        let outcome = second.run().await;

        assert!(matches!(outcome.status(), Some(ChangeStatus::Changed { .. })));
        assert_eq!(hooks.calls_to(SLACK), 1);
        assert_eq!(hooks.calls_to(DISCORD), 1);
        assert_eq!(
            FileStateStore::new(&cache_path).load(),
            LoadResult::Loaded(CachedIp {
                ip: "198.51.100.7".to_string()
            })
        );
    }

    #[tokio::test]
    async fn partial_cache_document_is_still_a_baseline() {
        let dir = TempDir::new().unwrap();
        let cache_path = dir.path().join("myip_current.json");
        std::fs::write(
            &cache_path,
            r#"{"ip": "203.0.113.5", "type": "IPv4", "network": {"isp": null}}"#,
        )
        .unwrap();
        let hooks = Arc::new(
            MockClient::new()
                .on(SLACK, Reply::status(http::StatusCode::OK))
                .on(DISCORD, Reply::status(http::StatusCode::NO_CONTENT)),
        );

        let monitor = ChangeMonitor::new(
            api_returning("198.51.100.7"),
            FileStateStore::new(&cache_path),
            vec![
                notifier(&hooks, Channel::Slack, SLACK),
                notifier(&hooks, Channel::Discord, DISCORD),
            ],
        );
        let outcome = monitor.run().await;

        assert_eq!(
            outcome.status(),
            Some(&ChangeStatus::Changed {
                previous_ip: "203.0.113.5".to_string()
            })
        );
        assert_eq!(hooks.calls_to(SLACK), 1);
        assert_eq!(hooks.calls_to(DISCORD), 1);
    }

    #[tokio::test]
    async fn fetched_document_is_cached_verbatim() {
        let dir = TempDir::new().unwrap();
        let cache_path = dir.path().join("myip_current.json");
        let mut doc = info_json("203.0.113.5", "NL");
        doc["provider"] = serde_json::Value::Null;
        doc["connectionType"] = serde_json::Value::Null;
        let api = IpApi::new(
            MockClient::new().on(INFO, Reply::json(&doc)),
            Endpoints::default(),
            Duration::from_secs(10),
        );

        let monitor = ChangeMonitor::new(
            api,
            FileStateStore::new(&cache_path),
            Vec::<MockNotifier>::new(),
        );
        monitor.run().await;

        let on_disk: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&cache_path).unwrap()).unwrap();
        assert_eq!(on_disk, doc);
    }
}
