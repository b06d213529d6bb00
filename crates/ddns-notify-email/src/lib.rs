// # Email Notifier
//
// This crate sends an HTML email when the public IP changes.
//
// ## Transport
//
// SMTP submission with STARTTLS (port 587 by default) and username/password
// authentication. Gmail works with an app password:
//
// ```text
// DDNS_SMTP_HOST=smtp.gmail.com
// DDNS_SMTP_USERNAME=me@gmail.com
// DDNS_SMTP_PASSWORD=<app password>
// ```
//
// ## Failure Model
//
// Every failure maps to `Error::NotificationDelivery` (or
// `Error::MissingRecipients` before any connection is made). The reconciler
// treats both as non-fatal.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use ddns_core::traits::Notifier;
use ddns_core::{Error, PublicIp, Result};
use lettre::message::header::ContentType;
use lettre::message::{Mailbox, Message};
use lettre::transport::smtp::authentication::Credentials as SmtpCredentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Tokio1Executor};
use std::time::Duration;

/// Subject line of every notification
pub const SUBJECT: &str = "Public IP change notification";

/// Default SMTP relay
pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";

/// Default SMTP submission port (STARTTLS)
pub const DEFAULT_SMTP_PORT: u16 = 587;

/// SMTP connection settings
///
/// # Security
///
/// The Debug implementation intentionally does NOT expose the password.
#[derive(Clone)]
pub struct SmtpSettings {
    /// Relay host name
    pub host: String,
    /// Relay port
    pub port: u16,
    /// Login name
    pub username: String,
    /// Login password
    /// ⚠️ NEVER log this value
    pub password: String,
    /// Sender address; defaults to `username` when empty
    pub from: String,
    /// Upper bound for the whole SMTP session
    pub timeout: Duration,
}

impl std::fmt::Debug for SmtpSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<REDACTED>")
            .field("from", &self.from)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl SmtpSettings {
    /// The address notifications are sent from
    fn sender(&self) -> &str {
        if self.from.trim().is_empty() {
            &self.username
        } else {
            &self.from
        }
    }
}

/// SMTP email notifier
#[derive(Debug)]
pub struct EmailNotifier {
    settings: SmtpSettings,
    sender: Mailbox,
}

impl EmailNotifier {
    /// Create a new email notifier
    ///
    /// # Returns
    ///
    /// `Err(Error::Config)` when host or sender is missing or the sender
    /// is not a valid address. No connection is made here.
    pub fn new(settings: SmtpSettings) -> Result<Self> {
        if settings.host.trim().is_empty() {
            return Err(Error::config("SMTP host cannot be empty"));
        }

        let sender = settings.sender().parse::<Mailbox>().map_err(|e| {
            Error::config(format!(
                "Invalid sender address '{}': {}",
                settings.sender(),
                e
            ))
        })?;

        Ok(Self { settings, sender })
    }

    /// Build the transport for one notification
    fn transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>> {
        let builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.settings.host)
            .map_err(|e| Error::notification(format!("SMTP setup failed: {}", e)))?;

        let mut builder = builder
            .port(self.settings.port)
            .timeout(Some(self.settings.timeout));

        if !self.settings.username.is_empty() {
            builder = builder.credentials(SmtpCredentials::new(
                self.settings.username.clone(),
                self.settings.password.clone(),
            ));
        }

        Ok(builder.build())
    }
}

/// Escape the few characters that matter inside HTML text
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Render the notification body
pub fn render_body(cached: &PublicIp, current: &PublicIp, detected_at: DateTime<Utc>) -> String {
    let cached = if cached.is_empty() {
        "(none)".to_string()
    } else {
        escape_html(cached.as_str())
    };

    format!(
        "<p>Your public IP has probably changed. Cached: {}, Current: {}</p>\
         <p>Detected at {}</p>",
        cached,
        escape_html(current.as_str()),
        detected_at.format("%Y-%m-%d %H:%M:%S UTC")
    )
}

/// Build the notification message
///
/// # Returns
///
/// - `Err(Error::MissingRecipients)`: `recipients` is empty
/// - `Err(Error::NotificationDelivery)`: A recipient is not a valid address
pub fn build_message(
    sender: &Mailbox,
    cached: &PublicIp,
    current: &PublicIp,
    recipients: &[String],
    detected_at: DateTime<Utc>,
) -> Result<Message> {
    if recipients.is_empty() {
        return Err(Error::MissingRecipients);
    }

    let mut builder = Message::builder()
        .from(sender.clone())
        .subject(SUBJECT)
        .header(ContentType::TEXT_HTML);

    for recipient in recipients {
        let mailbox = recipient.parse::<Mailbox>().map_err(|e| {
            Error::notification(format!("Invalid recipient '{}': {}", recipient, e))
        })?;
        builder = builder.to(mailbox);
    }

    builder
        .body(render_body(cached, current, detected_at))
        .map_err(|e| Error::notification(format!("Failed to build message: {}", e)))
}

#[async_trait]
impl Notifier for EmailNotifier {
    async fn notify(
        &self,
        cached: &PublicIp,
        current: &PublicIp,
        recipients: &[String],
    ) -> Result<()> {
        let message = build_message(&self.sender, cached, current, recipients, Utc::now())?;

        tracing::debug!(
            "Sending notification to {} recipient(s) via {}:{}",
            recipients.len(),
            self.settings.host,
            self.settings.port
        );

        self.transport()?
            .send(message)
            .await
            .map_err(|e| Error::notification(format!("SMTP send failed: {}", e)))?;

        Ok(())
    }

    fn notifier_name(&self) -> &'static str {
        "email"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn settings() -> SmtpSettings {
        SmtpSettings {
            host: DEFAULT_SMTP_HOST.to_string(),
            port: DEFAULT_SMTP_PORT,
            username: "ddns@example.com".to_string(),
            password: "app-password".to_string(),
            from: String::new(),
            timeout: Duration::from_secs(5),
        }
    }

    fn detected_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap()
    }

    #[test]
    fn test_sender_defaults_to_username() {
        let notifier = EmailNotifier::new(settings()).unwrap();
        assert_eq!(notifier.sender.email.to_string(), "ddns@example.com");

        let mut custom = settings();
        custom.from = "DDNS <alerts@example.com>".to_string();
        let notifier = EmailNotifier::new(custom).unwrap();
        assert_eq!(notifier.sender.email.to_string(), "alerts@example.com");
    }

    #[test]
    fn test_invalid_sender_rejected() {
        let mut bad = settings();
        bad.username = "not an address".to_string();
        assert!(matches!(EmailNotifier::new(bad), Err(Error::Config(_))));
    }

    #[test]
    fn test_password_not_exposed_in_debug() {
        let notifier = EmailNotifier::new(settings()).unwrap();
        let debug_str = format!("{:?}", notifier);
        assert!(!debug_str.contains("app-password"));
    }

    #[test]
    fn test_body_mentions_both_addresses() {
        let body = render_body(
            &PublicIp::from("1.2.3.4"),
            &PublicIp::from("5.6.7.8"),
            detected_at(),
        );
        assert!(body.contains("Cached: 1.2.3.4, Current: 5.6.7.8"));
        assert!(body.contains("2026-01-02 03:04:05 UTC"));
    }

    #[test]
    fn test_body_first_run_and_escaping() {
        let body = render_body(&PublicIp::empty(), &PublicIp::from("<b>"), detected_at());
        assert!(body.contains("Cached: (none)"));
        assert!(body.contains("&lt;b&gt;"));
    }

    #[test]
    fn test_message_has_all_recipients() {
        let sender: Mailbox = "ddns@example.com".parse().unwrap();
        let recipients = vec!["a@example.com".to_string(), "b@example.com".to_string()];

        let message = build_message(
            &sender,
            &PublicIp::from("1.2.3.4"),
            &PublicIp::from("5.6.7.8"),
            &recipients,
            detected_at(),
        )
        .unwrap();

        assert_eq!(message.envelope().to().len(), 2);
        let formatted = String::from_utf8(message.formatted()).unwrap();
        assert!(formatted.contains(SUBJECT));
        assert!(formatted.contains("text/html"));
    }

    #[test]
    fn test_invalid_recipient_is_delivery_error() {
        let sender: Mailbox = "ddns@example.com".parse().unwrap();
        let result = build_message(
            &sender,
            &PublicIp::empty(),
            &PublicIp::from("5.6.7.8"),
            &["nobody".to_string()],
            detected_at(),
        );
        assert!(matches!(result, Err(Error::NotificationDelivery(_))));
    }

    #[tokio::test]
    async fn test_missing_recipients_fails_without_connecting() {
        let notifier = EmailNotifier::new(settings()).unwrap();
        let result = notifier
            .notify(&PublicIp::from("1.2.3.4"), &PublicIp::from("5.6.7.8"), &[])
            .await;
        assert!(matches!(result, Err(Error::MissingRecipients)));
    }
}
