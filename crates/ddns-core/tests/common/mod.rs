//! Test doubles and common utilities for reconciliation contract tests
//!
//! Every double appends to a shared [`CallLog`] so tests can assert both
//! how often and in which order the reconciler touched each component.

#![allow(dead_code)]

use ddns_core::error::{Error, Result};
use ddns_core::traits::{DnsProvider, IpSource, Notifier, StateStore, UpdateResult};
use ddns_core::{Credentials, PublicIp, RunConfig};
use std::sync::{Arc, Mutex};

/// Shared, ordered record of component calls
#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<&'static str>>>);

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, call: &'static str) {
        self.0.lock().unwrap().push(call);
    }

    /// All calls in order
    pub fn calls(&self) -> Vec<&'static str> {
        self.0.lock().unwrap().clone()
    }

    /// Number of times `call` was made
    pub fn count(&self, call: &str) -> usize {
        self.0.lock().unwrap().iter().filter(|c| **c == call).count()
    }
}

/// An IP source that always reports the same address
pub struct FixedIpSource {
    ip: PublicIp,
    log: CallLog,
}

impl FixedIpSource {
    pub fn new(ip: &str, log: &CallLog) -> Self {
        Self {
            ip: PublicIp::from(ip),
            log: log.clone(),
        }
    }
}

#[async_trait::async_trait]
impl IpSource for FixedIpSource {
    async fn current(&self) -> Result<PublicIp> {
        self.log.push("ip_source.current");
        Ok(self.ip.clone())
    }

    fn source_name(&self) -> &'static str {
        "fixed"
    }
}

/// An IP source whose lookup service is down
pub struct UnreachableIpSource {
    log: CallLog,
}

impl UnreachableIpSource {
    pub fn new(log: &CallLog) -> Self {
        Self { log: log.clone() }
    }
}

#[async_trait::async_trait]
impl IpSource for UnreachableIpSource {
    async fn current(&self) -> Result<PublicIp> {
        self.log.push("ip_source.current");
        Err(Error::network("connection refused"))
    }

    fn source_name(&self) -> &'static str {
        "unreachable"
    }
}

/// A state store that records reads and writes
pub struct MockStateStore {
    value: Arc<Mutex<PublicIp>>,
    log: CallLog,
}

impl MockStateStore {
    pub fn new(cached: &str, log: &CallLog) -> Self {
        Self {
            value: Arc::new(Mutex::new(PublicIp::from(cached))),
            log: log.clone(),
        }
    }

    /// Create a store that shares its value with an existing one
    pub fn sharing_value_with(other: &Self) -> Self {
        Self {
            value: Arc::clone(&other.value),
            log: other.log.clone(),
        }
    }

    pub fn value(&self) -> PublicIp {
        self.value.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl StateStore for MockStateStore {
    async fn read_cached_ip(&self) -> Result<PublicIp> {
        self.log.push("state.read");
        Ok(self.value())
    }

    async fn write_cached_ip(&self, ip: &PublicIp) -> Result<()> {
        self.log.push("state.write");
        *self.value.lock().unwrap() = ip.clone();
        Ok(())
    }
}

/// How the mock provider should answer
#[derive(Debug, Clone)]
pub enum ProviderBehavior {
    Succeed,
    DryRun,
    Fail,
}

/// A DNS provider that records calls and the arguments it received
pub struct MockDnsProvider {
    behavior: ProviderBehavior,
    log: CallLog,
    seen: Arc<Mutex<Vec<(String, Option<String>, PublicIp)>>>,
}

impl MockDnsProvider {
    pub fn new(behavior: ProviderBehavior, log: &CallLog) -> Self {
        Self {
            behavior,
            log: log.clone(),
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a provider that shares recorded arguments with an existing one
    pub fn sharing_calls_with(other: &Self) -> Self {
        Self {
            behavior: other.behavior.clone(),
            log: other.log.clone(),
            seen: Arc::clone(&other.seen),
        }
    }

    /// (username, domain_hint, ip) for each call
    pub fn seen(&self) -> Vec<(String, Option<String>, PublicIp)> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl DnsProvider for MockDnsProvider {
    async fn push_update(
        &self,
        credentials: &Credentials,
        domain_hint: Option<&str>,
        new_ip: &PublicIp,
    ) -> Result<UpdateResult> {
        self.log.push("provider.push_update");
        self.seen.lock().unwrap().push((
            credentials.username.clone(),
            domain_hint.map(str::to_string),
            new_ip.clone(),
        ));

        match self.behavior {
            ProviderBehavior::Succeed => Ok(UpdateResult::Updated {
                message: format!("Updated 1 host(s) to {}", new_ip),
            }),
            ProviderBehavior::DryRun => Ok(UpdateResult::DryRun {
                update_url: "https://freedns.example/update?id=xyz".to_string(),
            }),
            ProviderBehavior::Fail => Err(Error::NoDomainsFound),
        }
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

/// How the mock notifier should answer
#[derive(Debug, Clone)]
pub enum NotifierBehavior {
    Deliver,
    DeliveryFails,
}

/// A notifier that records calls and honours the empty-recipient contract
pub struct MockNotifier {
    behavior: NotifierBehavior,
    log: CallLog,
}

impl MockNotifier {
    pub fn new(behavior: NotifierBehavior, log: &CallLog) -> Self {
        Self {
            behavior,
            log: log.clone(),
        }
    }
}

#[async_trait::async_trait]
impl Notifier for MockNotifier {
    async fn notify(
        &self,
        _cached: &PublicIp,
        _current: &PublicIp,
        recipients: &[String],
    ) -> Result<()> {
        self.log.push("notifier.notify");
        if recipients.is_empty() {
            return Err(Error::MissingRecipients);
        }
        match self.behavior {
            NotifierBehavior::Deliver => Ok(()),
            NotifierBehavior::DeliveryFails => Err(Error::notification("535 authentication failed")),
        }
    }

    fn notifier_name(&self) -> &'static str {
        "mock"
    }
}

/// Helper to create a minimal RunConfig for testing
pub fn minimal_config() -> RunConfig {
    RunConfig::new(Credentials::new("alice", "secret"))
}

/// Same as [`minimal_config`] with email turned on and one recipient
pub fn email_config() -> RunConfig {
    minimal_config()
        .with_email(true)
        .with_recipients(vec!["ops@example.com".to_string()])
}
