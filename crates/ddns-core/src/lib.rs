// # ddns-core
//
// Core library for the FreeDNS dynamic DNS client.
//
// ## Architecture Overview
//
// This library provides the reconciliation flow for a run-once DDNS client:
// - **IpSource**: Trait for fetching the current public IP
// - **StateStore**: Trait for the single cached "last known" IP
// - **DnsProvider**: Trait for pushing the new IP to a DDNS provider
// - **Notifier**: Trait for telling an operator that the IP changed
// - **Reconciler**: Orchestrates fetch → compare → notify → update → persist
//
// ## Design Principles
//
// 1. **Separation of Concerns**: Core logic is separate from implementations
// 2. **Run-Once**: One linear pass per invocation; scheduling lives outside
// 3. **Library-First**: All core functionality can be used as a library
// 4. **Fail Closed**: The cache is only written after a successful update

pub mod traits;
pub mod reconcile;
pub mod config;
pub mod error;
pub mod state;
pub mod types;

// Re-export core types for convenience
pub use traits::{IpSource, DnsProvider, StateStore, Notifier};
pub use reconcile::{Reconciler, ReconcileOutcome};
pub use config::{Credentials, RunConfig};
pub use error::{Error, Result};
pub use state::{MemoryStateStore, FileStateStore};
pub use types::PublicIp;
