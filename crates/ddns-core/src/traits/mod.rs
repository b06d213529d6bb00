//! Core traits for the DDNS client
//!
//! This module defines the abstract interfaces that all implementations must follow.
//!
//! - [`IpSource`]: Fetch the current public IP
//! - [`DnsProvider`]: Push a new IP to a dynamic DNS provider
//! - [`StateStore`]: Persist the last known IP between runs
//! - [`Notifier`]: Tell an operator the IP changed

pub mod ip_source;
pub mod dns_provider;
pub mod state_store;
pub mod notifier;

pub use ip_source::IpSource;
pub use dns_provider::{DnsProvider, UpdateResult};
pub use state_store::StateStore;
pub use notifier::Notifier;
