// src/services/notifier.rs

//! Digest delivery over SMTP.

use std::time::Duration;

use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, Message, SmtpTransport, Transport};

use crate::config::Secrets;
use crate::error::{AppError, Result};
use crate::models::MailConfig;

/// A sink for the rendered digest.
pub trait Notifier {
    /// Deliver one message to `recipient`.
    fn send(&self, subject: &str, body: &str, recipient: &str) -> Result<()>;
}

/// Sends one plain-text email per call through a STARTTLS relay.
///
/// A connection is opened for each send and closed when it completes,
/// whether or not delivery succeeded.
pub struct SmtpNotifier {
    relay_host: String,
    relay_port: u16,
    timeout: Duration,
    sender: Mailbox,
    credentials: Credentials,
}

impl SmtpNotifier {
    /// Create a notifier that sends as `secrets.smtp_user`.
    ///
    /// Both the sender and `secrets.recipient` must parse as addresses.
    pub fn new(config: &MailConfig, secrets: &Secrets) -> Result<Self> {
        let address: Address = secrets.smtp_user.parse().map_err(|e| {
            AppError::config(format!(
                "SMTP_USER '{}' is not an email address: {e}",
                secrets.smtp_user
            ))
        })?;
        secrets.recipient.parse::<Mailbox>().map_err(|e| {
            AppError::config(format!(
                "RECIPIENT_EMAIL '{}' is not an email address: {e}",
                secrets.recipient
            ))
        })?;

        Ok(Self {
            relay_host: config.relay_host.clone(),
            relay_port: config.relay_port,
            timeout: Duration::from_secs(config.timeout_secs),
            sender: Mailbox::new(Some(config.sender_name.clone()), address),
            credentials: Credentials::new(secrets.smtp_user.clone(), secrets.smtp_pass.clone()),
        })
    }

    /// Build the message without sending it.
    pub fn build_message(&self, subject: &str, body: &str, recipient: &str) -> Result<Message> {
        let to: Mailbox = recipient.parse()?;
        let message = Message::builder()
            .from(self.sender.clone())
            .to(to)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())?;
        Ok(message)
    }

    fn transport(&self) -> Result<SmtpTransport> {
        Ok(SmtpTransport::starttls_relay(&self.relay_host)?
            .port(self.relay_port)
            .credentials(self.credentials.clone())
            .timeout(Some(self.timeout))
            .build())
    }
}

impl Notifier for SmtpNotifier {
    fn send(&self, subject: &str, body: &str, recipient: &str) -> Result<()> {
        let message = self.build_message(subject, body, recipient)?;
        let transport = self.transport()?;

        log::debug!(
            "Sending digest to {} via {}:{}",
            recipient,
            self.relay_host,
            self.relay_port
        );
        transport.send(&message)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secrets(user: &str) -> Secrets {
        Secrets {
            serpapi_key: "serp-123456".to_string(),
            smtp_user: user.to_string(),
            smtp_pass: "hunter2".to_string(),
            recipient: "me@example.com".to_string(),
        }
    }

    #[test]
    fn test_build_message_headers() {
        let notifier =
            SmtpNotifier::new(&MailConfig::default(), &secrets("bot@example.com")).unwrap();
        let message = notifier
            .build_message(
                "Daily Job Search - 2 matches",
                "1. SRE fresher",
                "me@example.com",
            )
            .unwrap();
        let raw = String::from_utf8(message.formatted()).unwrap();

        assert!(raw.contains("Subject: Daily Job Search - 2 matches"));
        assert!(raw.contains("Job Bot"));
        assert!(raw.contains("bot@example.com"));
        assert!(raw.contains("To: me@example.com"));
        assert!(raw.contains("text/plain; charset=utf-8"));
        assert!(raw.contains("1. SRE fresher"));
    }

    #[test]
    fn test_invalid_recipient() {
        let notifier =
            SmtpNotifier::new(&MailConfig::default(), &secrets("bot@example.com")).unwrap();
        let err = notifier.build_message("s", "b", "not an address").unwrap_err();
        assert!(matches!(err, AppError::Mail(_)));
    }

    #[test]
    fn test_sender_must_be_address() {
        let err = SmtpNotifier::new(&MailConfig::default(), &secrets("bot"))
            .err()
            .unwrap();
        assert!(err.is_config());
    }

    #[test]
    fn test_recipient_checked_at_construction() {
        let mut bad = secrets("bot@example.com");
        bad.recipient = "not an address".to_string();
        let err = SmtpNotifier::new(&MailConfig::default(), &bad)
            .err()
            .unwrap();
        assert!(err.is_config());
        assert!(err.to_string().contains("RECIPIENT_EMAIL"));
    }
}
