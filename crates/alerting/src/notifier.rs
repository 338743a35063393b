//! Alert notifier

use chrono::Utc;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

/// Notifier error types
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Missing credentials: {0}")]
    MissingCredentials(&'static str),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Message build failed: {0}")]
    Message(String),

    #[error("Transport failed: {0}")]
    Transport(String),
}

/// Attempts delivery of one alert. Failures are recoverable at the loop
/// level; the caller decides whether to advance the cooldown.
pub trait Notifier {
    fn notify(&mut self, labels: &[String]) -> Result<(), NotifyError>;
}

/// Email notifier configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmailConfig {
    /// Sender address, also the SMTP username
    pub sender: Option<String>,
    /// SMTP password or app secret
    pub secret: Option<String>,
    /// Recipient address
    pub recipient: Option<String>,
    /// SMTP relay host
    pub smtp_host: Option<String>,
}

/// SMTP email notifier.
///
/// Refuses to attempt delivery when any credential is absent; the refusal
/// happens before any transport is built, so no network is touched.
pub struct EmailNotifier {
    config: EmailConfig,
}

impl EmailNotifier {
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    fn require(&self) -> Result<(&str, &str, &str, &str), NotifyError> {
        let sender = self
            .config
            .sender
            .as_deref()
            .ok_or(NotifyError::MissingCredentials("sender"))?;
        let secret = self
            .config
            .secret
            .as_deref()
            .ok_or(NotifyError::MissingCredentials("secret"))?;
        let recipient = self
            .config
            .recipient
            .as_deref()
            .ok_or(NotifyError::MissingCredentials("recipient"))?;
        let host = self
            .config
            .smtp_host
            .as_deref()
            .ok_or(NotifyError::MissingCredentials("smtp_host"))?;
        Ok((sender, secret, recipient, host))
    }
}

impl Notifier for EmailNotifier {
    fn notify(&mut self, labels: &[String]) -> Result<(), NotifyError> {
        let (sender, secret, recipient, host) = self.require()?;

        let subject = format!("Security alert: {}", labels.join(", "));
        let body = format!(
            "Dangerous objects detected at {}:\n\n{}\n",
            Utc::now().to_rfc3339(),
            labels.join("\n"),
        );

        let email = Message::builder()
            .from(
                sender
                    .parse()
                    .map_err(|_| NotifyError::InvalidAddress(sender.to_string()))?,
            )
            .to(recipient
                .parse()
                .map_err(|_| NotifyError::InvalidAddress(recipient.to_string()))?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body)
            .map_err(|e| NotifyError::Message(e.to_string()))?;

        let mailer = SmtpTransport::relay(host)
            .map_err(|e| NotifyError::Transport(e.to_string()))?
            .credentials(Credentials::new(sender.to_string(), secret.to_string()))
            .build();

        mailer
            .send(&email)
            .map_err(|e| NotifyError::Transport(e.to_string()))?;

        info!("Alert email delivered to {}", recipient);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels() -> Vec<String> {
        vec!["knife".to_string()]
    }

    #[test]
    fn missing_recipient_refuses_without_transport() {
        let mut notifier = EmailNotifier::new(EmailConfig {
            sender: Some("cam@example.com".into()),
            secret: Some("app-secret".into()),
            recipient: None,
            smtp_host: Some("smtp.example.com".into()),
        });

        // MissingCredentials is raised before any transport is built, so
        // this cannot be a network failure
        assert!(matches!(
            notifier.notify(&labels()),
            Err(NotifyError::MissingCredentials("recipient"))
        ));
    }

    #[test]
    fn unconfigured_notifier_refuses() {
        let mut notifier = EmailNotifier::new(EmailConfig::default());
        assert!(matches!(
            notifier.notify(&labels()),
            Err(NotifyError::MissingCredentials("sender"))
        ));
    }

    #[test]
    fn missing_secret_refuses() {
        let mut notifier = EmailNotifier::new(EmailConfig {
            sender: Some("cam@example.com".into()),
            secret: None,
            recipient: Some("ops@example.com".into()),
            smtp_host: Some("smtp.example.com".into()),
        });
        assert!(matches!(
            notifier.notify(&labels()),
            Err(NotifyError::MissingCredentials("secret"))
        ));
    }
}
