//! Change reconciler
//!
//! The Reconciler is responsible for:
//! - Fetching the current public IP via IpSource
//! - Comparing it with the cached value in StateStore
//! - Notifying the operator via Notifier (optional)
//! - Pushing the new IP via DnsProvider
//! - Persisting the new IP after a successful update
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐
//! │  IpSource   │────▶│  Reconciler  │◀────┐ StateStore (read)
//! └─────────────┘     └──────────────┘     │
//!                            │             │
//!         ┌──────────────────┼─────────────┘
//!         │                  │
//!         ▼                  ▼
//! ┌─────────────┐    ┌──────────────┐    ┌─────────────┐
//! │  Notifier   │───▶│ DnsProvider  │───▶│ StateStore  │
//! │ (optional)  │    │  (update)    │    │  (write)    │
//! └─────────────┘    └──────────────┘    └─────────────┘
//! ```
//!
//! ## Run Flow
//!
//! 1. Fetch current IP
//! 2. Read cached IP
//! 3. Equal → done, nothing else is touched
//! 4. Email enabled → notify (failures are logged, never fatal)
//! 5. Push the update to the provider (failures are fatal)
//! 6. Write the new IP to the cache

use crate::config::RunConfig;
use crate::error::Result;
use crate::traits::{DnsProvider, IpSource, Notifier, StateStore, UpdateResult};
use crate::types::PublicIp;
use tracing::{debug, error, info, warn};

/// What a reconciliation run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// Current IP matches the cache; nothing was touched
    Unchanged {
        /// The (unchanged) public IP
        current: PublicIp,
    },

    /// Provider was updated
    Updated {
        /// The cached IP before this run (empty on first run)
        previous: PublicIp,
        /// The new public IP
        current: PublicIp,
        /// What the provider said
        result: UpdateResult,
        /// Whether the change notice went out
        notified: bool,
    },
}

impl ReconcileOutcome {
    /// Whether the run found a changed IP
    pub fn is_changed(&self) -> bool {
        matches!(self, ReconcileOutcome::Updated { .. })
    }
}

/// Change reconciler
///
/// Owns one of each component and runs the fetch → compare → update
/// sequence once per [`Reconciler::reconcile()`] call.
///
/// ## Lifecycle
///
/// 1. Create with [`Reconciler::new()`] (validates the configuration)
/// 2. Optionally attach a notifier with [`Reconciler::with_notifier()`]
/// 3. Call [`Reconciler::reconcile()`]
///
/// ## Threading
///
/// Every step is awaited in order; no two operations ever overlap.
pub struct Reconciler {
    /// IP source for the current address
    ip_source: Box<dyn IpSource>,

    /// DNS provider for pushing updates
    provider: Box<dyn DnsProvider>,

    /// State store holding the last known IP
    state_store: Box<dyn StateStore>,

    /// Change notifier (only used when email is enabled)
    notifier: Option<Box<dyn Notifier>>,

    /// Run configuration
    config: RunConfig,
}

impl Reconciler {
    /// Create a new reconciler
    ///
    /// # Parameters
    ///
    /// - `ip_source`: IP source implementation
    /// - `provider`: DNS provider implementation
    /// - `state_store`: State store implementation
    /// - `config`: Run configuration
    ///
    /// # Returns
    ///
    /// `Err(Error::Config)` when the configuration is incomplete. This
    /// happens before any component is called, so no network traffic is
    /// generated for a misconfigured run.
    pub fn new(
        ip_source: Box<dyn IpSource>,
        provider: Box<dyn DnsProvider>,
        state_store: Box<dyn StateStore>,
        config: RunConfig,
    ) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            ip_source,
            provider,
            state_store,
            notifier: None,
            config,
        })
    }

    /// Attach a change notifier
    pub fn with_notifier(mut self, notifier: Box<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Run one reconciliation pass
    ///
    /// # Returns
    ///
    /// - `Ok(ReconcileOutcome)`: Nothing to do, or the provider was updated
    /// - `Err(Error)`: A fatal step failed; the cache is left as it was
    pub async fn reconcile(&self) -> Result<ReconcileOutcome> {
        info!("Fetching current public IP via {}", self.ip_source.source_name());
        let current = self.ip_source.current().await?;
        info!("Current public IP: {}", current);

        let cached = self.state_store.read_cached_ip().await?;
        info!("Cached public IP: {}", cached);

        if current == cached {
            info!("Public IP has not changed, no updates required");
            return Ok(ReconcileOutcome::Unchanged { current });
        }

        info!("Public IP has changed, starting to update the cache and DDNS IP");

        let notified = if self.config.email_enabled {
            self.send_notification(&cached, &current).await
        } else {
            false
        };

        info!("Updating the dynamic DNS record via {}", self.provider.provider_name());
        let result = self
            .provider
            .push_update(
                &self.config.credentials,
                self.config.domain_hint.as_deref(),
                &current,
            )
            .await
            .inspect_err(|e| error!("DNS update failed, cache left untouched: {}", e))?;

        match &result {
            UpdateResult::Updated { message } => info!("Provider accepted update: {}", message),
            UpdateResult::Unchanged { message } => info!("Provider already had this IP: {}", message),
            UpdateResult::Unrecognized { message } => {
                warn!("Provider response not recognised, assuming success: {}", message)
            }
            UpdateResult::DryRun { .. } => {}
        }

        if result.is_applied() {
            self.state_store.write_cached_ip(&current).await?;
        } else {
            info!("[DRY-RUN] Would write {} to the cache", current);
        }

        Ok(ReconcileOutcome::Updated {
            previous: cached,
            current,
            result,
            notified,
        })
    }

    /// Send the change notice, swallowing failures
    ///
    /// Returns whether the notice was delivered.
    async fn send_notification(&self, cached: &PublicIp, current: &PublicIp) -> bool {
        let Some(notifier) = self.notifier.as_ref() else {
            warn!("Email notification enabled but no notifier configured, skipping");
            return false;
        };

        if self.config.dry_run {
            info!("[DRY-RUN] Would send {} notification", notifier.notifier_name());
            return false;
        }

        info!("Sending {} notification", notifier.notifier_name());
        match notifier
            .notify(cached, current, &self.config.recipients)
            .await
        {
            Ok(()) => {
                info!("Notification sent successfully");
                true
            }
            Err(e) if e.is_notification() => {
                // Auxiliary step: log and keep going with the update
                match e {
                    crate::Error::MissingRecipients => {
                        warn!("Recipients list cannot be empty. No notification sent.")
                    }
                    _ => error!("Failed to send notification: {}", e),
                }
                false
            }
            Err(e) => {
                error!("Unexpected notifier error: {}", e);
                debug!("Continuing with the DNS update regardless");
                false
            }
        }
    }
}
