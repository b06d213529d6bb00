// # Notifier Trait
//
// Defines the interface for telling an operator that the public IP changed.
//
// ## Implementations
//
// - SMTP email: `ddns-notify-email` crate

use async_trait::async_trait;

use crate::types::PublicIp;

/// Trait for change notification implementations
///
/// Notification is auxiliary. The reconciler logs failures from this trait
/// and carries on with the DNS update.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Announce an IP change
    ///
    /// # Parameters
    ///
    /// - `cached`: The previous IP (empty on first run)
    /// - `current`: The newly detected IP
    /// - `recipients`: Where to send the notice
    ///
    /// # Returns
    ///
    /// - `Ok(())`: Notice delivered
    /// - `Err(Error::MissingRecipients)`: `recipients` is empty
    /// - `Err(Error::NotificationDelivery)`: Delivery failed
    async fn notify(
        &self,
        cached: &PublicIp,
        current: &PublicIp,
        recipients: &[String],
    ) -> Result<(), crate::Error>;

    /// Get the notifier name (for logging/debugging)
    fn notifier_name(&self) -> &'static str;
}
