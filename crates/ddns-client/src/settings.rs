// Environment-backed settings
//
// ## Configuration
//
// ### FreeDNS
// - `username`: FreeDNS account name (required)
// - `passwd`: FreeDNS account password (required)
// - `domain`: Picks the record when the account has several (optional)
//
// ### Notification (only read when `--email yes`)
// - `recipients`: Comma-separated notification addresses
// - `DDNS_SMTP_HOST`: SMTP relay (default smtp.gmail.com)
// - `DDNS_SMTP_PORT`: SMTP submission port (default 587)
// - `DDNS_SMTP_USERNAME`: SMTP login
// - `DDNS_SMTP_PASSWORD`: SMTP password
// - `DDNS_SMTP_FROM`: Sender address (defaults to the SMTP login)
//
// A `.env` file in the working directory is loaded first unless
// `DDNS_SKIP_DOTENV` is set. Variables already present in the environment
// win over the file.

use anyhow::{Context, Result};
use ddns_core::config::parse_recipients;
use ddns_core::{Credentials, RunConfig};
use ddns_notify_email::{DEFAULT_SMTP_HOST, DEFAULT_SMTP_PORT, SmtpSettings};
use std::time::Duration;

/// Set to skip loading `.env`
pub const SKIP_DOTENV_VAR: &str = "DDNS_SKIP_DOTENV";

/// Load `.env` into the process environment
///
/// A missing file is not an error.
pub fn hydrate_env_file() -> Result<()> {
    if std::env::var_os(SKIP_DOTENV_VAR).is_some() {
        return Ok(());
    }

    match dotenvy::dotenv() {
        Ok(_) => Ok(()),
        Err(dotenvy::Error::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err).context("Failed to load .env file"),
    }
}

/// Settings read from the environment
pub struct Settings {
    pub credentials: Credentials,
    pub domain: Option<String>,
    pub recipients: Vec<String>,
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_username: String,
    pub smtp_password: String,
    pub smtp_from: String,
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("credentials", &self.credentials)
            .field("domain", &self.domain)
            .field("recipients", &self.recipients)
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("smtp_username", &self.smtp_username)
            .field("smtp_password", &"<REDACTED>")
            .field("smtp_from", &self.smtp_from)
            .finish()
    }
}

impl Settings {
    /// Load settings from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let smtp_port = match lookup("DDNS_SMTP_PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("DDNS_SMTP_PORT must be a port number. Got: {}", raw))?,
            None => DEFAULT_SMTP_PORT,
        };

        Ok(Self {
            credentials: Credentials::new(
                lookup("username").unwrap_or_default(),
                lookup("passwd").unwrap_or_default(),
            ),
            domain: lookup("domain"),
            recipients: parse_recipients(&lookup("recipients").unwrap_or_default()),
            smtp_host: lookup("DDNS_SMTP_HOST").unwrap_or_else(|| DEFAULT_SMTP_HOST.to_string()),
            smtp_port,
            smtp_username: lookup("DDNS_SMTP_USERNAME").unwrap_or_default(),
            smtp_password: lookup("DDNS_SMTP_PASSWORD").unwrap_or_default(),
            smtp_from: lookup("DDNS_SMTP_FROM").unwrap_or_default(),
        })
    }

    /// Validate the settings
    ///
    /// Only the credentials are mandatory. Notification problems surface as
    /// warnings at run time and never stop the update.
    pub fn validate(&self) -> Result<()> {
        self.credentials.validate()?;

        if self.smtp_port == 0 {
            anyhow::bail!("DDNS_SMTP_PORT must be between 1 and 65535. Got: 0");
        }

        Ok(())
    }

    /// Build the run configuration for the reconciler
    pub fn run_config(&self, email_enabled: bool, dry_run: bool) -> RunConfig {
        RunConfig::new(self.credentials.clone())
            .with_email(email_enabled)
            .with_domain_hint(self.domain.clone())
            .with_recipients(self.recipients.clone())
            .with_dry_run(dry_run)
    }

    /// SMTP settings for the email notifier
    pub fn smtp(&self, timeout: Duration) -> SmtpSettings {
        SmtpSettings {
            host: self.smtp_host.clone(),
            port: self.smtp_port,
            username: self.smtp_username.clone(),
            password: self.smtp_password.clone(),
            from: self.smtp_from.clone(),
            timeout,
        }
    }
}
