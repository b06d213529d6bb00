//! Error types for the DDNS client
//!
//! This module defines all error types used throughout the workspace.

use thiserror::Error;

/// Result type alias for DDNS operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the DDNS client
#[derive(Error, Debug)]
pub enum Error {
    /// An outbound request failed or returned a non-success status
    #[error("Network error: {0}")]
    Network(String),

    /// Missing or invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Cache file errors
    #[error("State store error: {0}")]
    StateStore(String),

    /// The provider rejected our credentials
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// The provider returned an empty record list
    #[error("No dynamic DNS records found for this account")]
    NoDomainsFound,

    /// Several records exist and no hint was given to pick one
    #[error("Account has {count} dynamic DNS records; a domain hint is required to pick one")]
    MissingDomainHint {
        /// Number of records returned by the provider
        count: usize,
    },

    /// The domain hint matched none of the records
    #[error("Domain {domain} is not among the account's dynamic DNS records")]
    DomainNotFound {
        /// The hint that failed to match
        domain: String,
    },

    /// Provider-specific error
    #[error("Provider error ({provider}): {message}")]
    Provider {
        /// Provider name
        provider: String,
        /// Error message
        message: String,
    },

    /// Sending the notification failed
    #[error("Notification delivery failed: {0}")]
    NotificationDelivery(String),

    /// Notification is enabled but nobody is listening
    #[error("No notification recipients configured")]
    MissingRecipients,

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a state store error
    pub fn state_store(msg: impl Into<String>) -> Self {
        Self::StateStore(msg.into())
    }

    /// Create an authentication error
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Authentication(msg.into())
    }

    /// Create a "domain not found" error
    pub fn domain_not_found(domain: impl Into<String>) -> Self {
        Self::DomainNotFound {
            domain: domain.into(),
        }
    }

    /// Create a provider-specific error
    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Create a notification delivery error
    pub fn notification(msg: impl Into<String>) -> Self {
        Self::NotificationDelivery(msg.into())
    }

    /// Whether this error comes from the auxiliary notification step
    ///
    /// The reconciler never aborts a run on these.
    pub fn is_notification(&self) -> bool {
        matches!(self, Self::NotificationDelivery(_) | Self::MissingRecipients)
    }
}
