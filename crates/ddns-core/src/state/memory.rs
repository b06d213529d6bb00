// # Memory State Store
//
// In-memory implementation of StateStore.
//
// ## Purpose
//
// Holds the cached IP for the lifetime of the process only. Useful when the
// client is embedded in a longer-lived program, and in tests.
//
// ## Crash Behavior
//
// - All state is lost on restart
// - The first reconciliation after a restart always updates the provider

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::Error;
use crate::traits::state_store::StateStore;
use crate::types::PublicIp;

/// In-memory state store implementation
#[derive(Debug, Clone, Default)]
pub struct MemoryStateStore {
    inner: Arc<RwLock<PublicIp>>,
}

impl MemoryStateStore {
    /// Create a new empty memory state store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `ip`
    pub fn with_ip(ip: impl Into<PublicIp>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(ip.into())),
        }
    }
}

#[async_trait]
impl StateStore for MemoryStateStore {
    async fn read_cached_ip(&self) -> Result<PublicIp, Error> {
        Ok(self.inner.read().await.clone())
    }

    async fn write_cached_ip(&self, ip: &PublicIp) -> Result<(), Error> {
        *self.inner.write().await = ip.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_basic() {
        let store = MemoryStateStore::new();
        assert!(store.read_cached_ip().await.unwrap().is_empty());

        store.write_cached_ip(&PublicIp::from("1.2.3.4")).await.unwrap();
        assert_eq!(store.read_cached_ip().await.unwrap(), PublicIp::from("1.2.3.4"));
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let store = MemoryStateStore::with_ip("1.2.3.4");
        let clone = store.clone();

        clone.write_cached_ip(&PublicIp::from("5.6.7.8")).await.unwrap();
        assert_eq!(store.read_cached_ip().await.unwrap(), PublicIp::from("5.6.7.8"));
    }
}
