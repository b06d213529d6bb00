//! Contract Test: Cache Model & Idempotency
//!
//! Constraints verified:
//! - An unchanged IP touches nothing but the lookup and the cache read
//! - A changed IP is written to the cache exactly once, after the update
//! - The first run (empty cache) always updates
//! - Consecutive runs with the same IP update only once
//!
//! If this test fails, the read-compare-write sequence is broken.

mod common;

use common::*;
use ddns_core::{MemoryStateStore, PublicIp, ReconcileOutcome, Reconciler, StateStore};

#[tokio::test]
async fn unchanged_ip_performs_no_writes_or_updates() {
    let log = CallLog::new();
    let store = MockStateStore::new("1.2.3.4", &log);

    let reconciler = Reconciler::new(
        Box::new(FixedIpSource::new("1.2.3.4", &log)),
        Box::new(MockDnsProvider::new(ProviderBehavior::Succeed, &log)),
        Box::new(MockStateStore::sharing_value_with(&store)),
        email_config(),
    )
    .expect("reconciler construction succeeds")
    .with_notifier(Box::new(MockNotifier::new(NotifierBehavior::Deliver, &log)));

    let outcome = reconciler.reconcile().await.unwrap();

    assert_eq!(
        outcome,
        ReconcileOutcome::Unchanged {
            current: PublicIp::from("1.2.3.4")
        }
    );
    assert_eq!(log.calls(), vec!["ip_source.current", "state.read"]);
    assert_eq!(store.value(), PublicIp::from("1.2.3.4"));
}

#[tokio::test]
async fn both_empty_counts_as_unchanged() {
    let log = CallLog::new();

    let reconciler = Reconciler::new(
        Box::new(FixedIpSource::new("", &log)),
        Box::new(MockDnsProvider::new(ProviderBehavior::Succeed, &log)),
        Box::new(MockStateStore::new("", &log)),
        minimal_config(),
    )
    .unwrap();

    let outcome = reconciler.reconcile().await.unwrap();

    assert!(!outcome.is_changed());
    assert_eq!(log.count("provider.push_update"), 0);
    assert_eq!(log.count("state.write"), 0);
}

#[tokio::test]
async fn changed_ip_is_written_once_after_update() {
    let log = CallLog::new();
    let store = MockStateStore::new("1.2.3.4", &log);

    let reconciler = Reconciler::new(
        Box::new(FixedIpSource::new("5.6.7.8", &log)),
        Box::new(MockDnsProvider::new(ProviderBehavior::Succeed, &log)),
        Box::new(MockStateStore::sharing_value_with(&store)),
        minimal_config(),
    )
    .unwrap();

    let outcome = reconciler.reconcile().await.unwrap();

    assert!(outcome.is_changed());
    assert_eq!(
        log.calls(),
        vec![
            "ip_source.current",
            "state.read",
            "provider.push_update",
            "state.write"
        ]
    );
    assert_eq!(store.value(), PublicIp::from("5.6.7.8"));
}

#[tokio::test]
async fn first_run_always_updates() {
    let log = CallLog::new();
    let store = MockStateStore::new("", &log);

    let reconciler = Reconciler::new(
        Box::new(FixedIpSource::new("5.6.7.8", &log)),
        Box::new(MockDnsProvider::new(ProviderBehavior::Succeed, &log)),
        Box::new(MockStateStore::sharing_value_with(&store)),
        minimal_config(),
    )
    .unwrap();

    match reconciler.reconcile().await.unwrap() {
        ReconcileOutcome::Updated {
            previous, current, ..
        } => {
            assert!(previous.is_empty());
            assert_eq!(current, PublicIp::from("5.6.7.8"));
        }
        other => panic!("expected an update on first run, got {:?}", other),
    }
    assert_eq!(log.count("state.write"), 1);
    assert_eq!(store.value(), PublicIp::from("5.6.7.8"));
}

#[tokio::test]
async fn second_run_with_same_ip_skips_update() {
    let log = CallLog::new();

    // Shared across both "runs", like the cache file would be
    let store = MemoryStateStore::new();

    for _ in 0..2 {
        let reconciler = Reconciler::new(
            Box::new(FixedIpSource::new("5.6.7.8", &log)),
            Box::new(MockDnsProvider::new(ProviderBehavior::Succeed, &log)),
            Box::new(store.clone()),
            minimal_config(),
        )
        .unwrap();
        reconciler.reconcile().await.unwrap();
    }

    assert_eq!(
        log.count("provider.push_update"),
        1,
        "Only the first run should reach the provider"
    );
    assert_eq!(
        store.read_cached_ip().await.unwrap(),
        PublicIp::from("5.6.7.8")
    );
}

#[tokio::test]
async fn provider_receives_credentials_hint_and_ip() {
    let log = CallLog::new();
    let provider = MockDnsProvider::new(ProviderBehavior::Succeed, &log);

    let reconciler = Reconciler::new(
        Box::new(FixedIpSource::new("5.6.7.8", &log)),
        Box::new(MockDnsProvider::sharing_calls_with(&provider)),
        Box::new(MockStateStore::new("1.2.3.4", &log)),
        minimal_config().with_domain_hint(Some("home.example.com".to_string())),
    )
    .unwrap();

    reconciler.reconcile().await.unwrap();

    assert_eq!(
        provider.seen(),
        vec![(
            "alice".to_string(),
            Some("home.example.com".to_string()),
            PublicIp::from("5.6.7.8")
        )]
    );
}
