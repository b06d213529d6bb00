//! Configuration types for the DDNS client
//!
//! This module defines the validated run configuration handed to the
//! [`Reconciler`](crate::Reconciler). Loading it from the environment is the
//! binary's job.

use std::fmt;

/// FreeDNS account credentials
///
/// # Security
///
/// The Debug implementation intentionally does NOT expose the password.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Account username
    pub username: String,
    /// Account password
    /// ⚠️ NEVER log this value
    pub password: String,
}

impl Credentials {
    /// Create a new credential pair
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Validate that both halves are present
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.username.trim().is_empty() || self.password.is_empty() {
            return Err(crate::Error::config(
                "Username or password cannot be empty. Check the .env file and retry",
            ));
        }
        Ok(())
    }
}

// Custom Debug implementation that hides the password
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<REDACTED>")
            .finish()
    }
}

/// Everything one reconciliation run needs to know
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Send an email when the IP changes
    pub email_enabled: bool,

    /// Provider credentials
    pub credentials: Credentials,

    /// Substring used to pick a record when the account has several
    pub domain_hint: Option<String>,

    /// Notification recipients
    pub recipients: Vec<String>,

    /// Resolve everything but skip the provider update and the cache write
    pub dry_run: bool,
}

impl RunConfig {
    /// Create a configuration with notifications off and no domain hint
    pub fn new(credentials: Credentials) -> Self {
        Self {
            email_enabled: false,
            credentials,
            domain_hint: None,
            recipients: Vec::new(),
            dry_run: false,
        }
    }

    /// Enable or disable email notification
    pub fn with_email(mut self, enabled: bool) -> Self {
        self.email_enabled = enabled;
        self
    }

    /// Set the domain hint (blank values are ignored)
    pub fn with_domain_hint(mut self, hint: Option<String>) -> Self {
        self.domain_hint = hint
            .map(|h| h.trim().to_string())
            .filter(|h| !h.is_empty());
        self
    }

    /// Set the recipient list
    pub fn with_recipients(mut self, recipients: Vec<String>) -> Self {
        self.recipients = recipients;
        self
    }

    /// Enable or disable dry-run mode
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Validate the configuration
    ///
    /// Missing recipients are not an error here: notification is optional
    /// and the reconciler downgrades that case to a warning.
    pub fn validate(&self) -> Result<(), crate::Error> {
        self.credentials.validate()
    }
}

/// Split a comma-separated recipient list, dropping blanks
pub fn parse_recipients(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
