// # IP Source Trait
//
// Defines the interface for discovering the host's public IP address.
//
// ## Implementations
//
// - HTTP lookup service: `ddns-ip-http` crate
//
// ## Usage
//
// ```rust,ignore
// use ddns_core::IpSource;
//
// #[tokio::main(flavor = "current_thread")]
// async fn main() -> anyhow::Result<()> {
//     let source = /* IpSource implementation */;
//
//     let current_ip = source.current().await?;
//     println!("Public IP: {}", current_ip);
//
//     Ok(())
// }
// ```

use async_trait::async_trait;

use crate::types::PublicIp;

/// Trait for IP source implementations
///
/// # Trust Level: Semi-Trusted
///
/// ## Allowed Capabilities
/// - ✅ Perform one lookup request per call
///
/// ## Forbidden Capabilities
/// - ❌ Cache results between calls (every call is a live lookup)
/// - ❌ Retry on failure (the next scheduled run is the retry)
/// - ❌ Access the state store or decide whether to update DNS
#[async_trait]
pub trait IpSource: Send + Sync {
    /// Get the current public IP address
    ///
    /// # Returns
    ///
    /// - `Ok(PublicIp)`: The address as reported by the lookup service
    /// - `Err(Error::Network)`: The service was unreachable or returned a
    ///   non-success status
    async fn current(&self) -> Result<PublicIp, crate::Error>;

    /// Get the source name (for logging/debugging)
    fn source_name(&self) -> &'static str;
}
