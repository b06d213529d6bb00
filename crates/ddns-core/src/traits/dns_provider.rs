// # DNS Provider Trait
//
// Defines the interface for pushing a new IP to a dynamic DNS provider.
//
// ## Implementations
//
// - FreeDNS (afraid.org): `ddns-provider-freedns` crate
//
// ## Usage
//
// ```rust,ignore
// use ddns_core::{Credentials, DnsProvider, PublicIp};
//
// #[tokio::main(flavor = "current_thread")]
// async fn main() -> anyhow::Result<()> {
//     let provider = /* DnsProvider implementation */;
//     let credentials = Credentials::new("alice", "secret");
//
//     provider
//         .push_update(&credentials, Some("home.example.com"), &PublicIp::from("1.2.3.4"))
//         .await?;
//
//     Ok(())
// }
// ```

use async_trait::async_trait;

use crate::config::Credentials;
use crate::types::PublicIp;

/// Result of a DNS update operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateResult {
    /// Provider confirmed the update
    Updated {
        /// The provider's response text
        message: String,
    },
    /// Provider already had this address
    Unchanged {
        /// The provider's response text
        message: String,
    },
    /// Provider answered with text we do not recognise; treated as success
    Unrecognized {
        /// The provider's response text
        message: String,
    },
    /// Dry-run: the update request was not sent
    DryRun {
        /// The URL that would have been requested
        update_url: String,
    },
}

impl UpdateResult {
    /// Whether the provider state was actually touched
    ///
    /// Only dry runs leave the provider untouched; the cache must not move
    /// in that case.
    pub fn is_applied(&self) -> bool {
        !matches!(self, UpdateResult::DryRun { .. })
    }
}

/// Trait for DNS provider implementations
///
/// # Trust Level: Untrusted
///
/// ## Allowed Capabilities
/// - ✅ Perform HTTP/HTTPS API calls to their endpoints only
/// - ✅ Parse provider-specific responses
/// - ✅ Return success or failure
///
/// ## Forbidden Capabilities
/// - ❌ Implement retry logic or backoff
/// - ❌ Access the state store (owned by `Reconciler`)
/// - ❌ Decide whether an update is needed (owned by `Reconciler`)
/// - ❌ Keep state between calls: credentials arrive with every call
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// Push a new IP address to the provider
    ///
    /// # Parameters
    ///
    /// - `credentials`: Account credentials
    /// - `domain_hint`: Substring that picks one record when the account has several
    /// - `new_ip`: The detected address (some providers infer it from the
    ///   request origin and only log it)
    ///
    /// # Returns
    ///
    /// - `Ok(UpdateResult)`: The result of the update operation
    /// - `Err(Error)`: If record selection or the update failed
    async fn push_update(
        &self,
        credentials: &Credentials,
        domain_hint: Option<&str>,
        new_ip: &PublicIp,
    ) -> Result<UpdateResult, crate::Error>;

    /// Get the provider name (for logging/debugging)
    fn provider_name(&self) -> &'static str;
}
