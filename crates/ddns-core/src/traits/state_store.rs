// # State Store Trait
//
// Defines the interface for the persisted "last known IP".
//
// ## Purpose
//
// The state store is the only memory the client has between runs. It holds
// exactly one value: the IP most recently pushed to the provider. Comparing
// against it is what keeps a run from calling the provider when nothing
// changed.
//
// ## Implementations
//
// - File-based: single-line text file (`FileStateStore`)
// - In-memory: `MemoryStateStore` (embedding and tests)

use async_trait::async_trait;

use crate::types::PublicIp;

/// Trait for state store implementations
///
/// # Trust Level: Trusted (Core Component)
///
/// ## Allowed Capabilities
/// - ✅ Perform I/O for persistent storage
///
/// ## Forbidden Capabilities
/// - ❌ Keep history (only the latest value exists)
/// - ❌ Decide when to update (owned by `Reconciler`)
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Read the cached IP
    ///
    /// # Returns
    ///
    /// - `Ok(PublicIp)`: The cached value, or the empty sentinel when nothing
    ///   has been stored yet
    /// - `Err(Error)`: Storage error other than "not there yet"
    async fn read_cached_ip(&self) -> Result<PublicIp, crate::Error>;

    /// Replace the cached IP
    ///
    /// # Returns
    ///
    /// - `Ok(())`: Value persisted
    /// - `Err(Error)`: Storage error
    async fn write_cached_ip(&self, ip: &PublicIp) -> Result<(), crate::Error>;
}
