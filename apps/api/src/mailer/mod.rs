//! SMTP delivery. The transport is blocking, so sends run on the blocking
//! pool; the outcome is returned to the caller as a typed result rather
//! than logged and dropped. No retries — delivery failures are the caller's
//! to present.

use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use thiserror::Error;

use crate::config::Config;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("invalid mail address '{0}'")]
    Address(String),

    #[error("failed to build message: {0}")]
    Build(String),

    #[error("SMTP delivery failed: {0}")]
    Transport(String),

    #[error("mail task aborted: {0}")]
    Join(String),
}

#[derive(Debug, Clone)]
pub struct Mailer {
    smtp_server: String,
    smtp_user: String,
    smtp_pass: String,
    from_email: String,
    service_name: String,
}

impl Mailer {
    pub fn new(config: &Config) -> Self {
        Self {
            smtp_server: config.smtp_server.clone(),
            smtp_user: config.smtp_user.clone(),
            smtp_pass: config.smtp_pass.clone(),
            from_email: config.from_email.clone(),
            service_name: "Resume Grader".to_string(),
        }
    }

    fn build_message(&self, to: &str, subject: &str, body: String) -> Result<Message, MailError> {
        let from: Mailbox = format!("{} <{}>", self.service_name, self.from_email)
            .parse()
            .map_err(|_| MailError::Address(self.from_email.clone()))?;
        let to: Mailbox = to
            .parse()
            .map_err(|_| MailError::Address(to.to_string()))?;

        Message::builder()
            .from(from)
            .to(to)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body)
            .map_err(|e| MailError::Build(e.to_string()))
    }

    pub async fn send(&self, to: &str, subject: &str, body: String) -> Result<(), MailError> {
        let message = self.build_message(to, subject, body)?;
        let server = self.smtp_server.clone();
        let credentials = Credentials::new(self.smtp_user.clone(), self.smtp_pass.clone());
        let recipient = to.to_string();

        tokio::task::spawn_blocking(move || {
            let transport = SmtpTransport::relay(&server)
                .map_err(|e| MailError::Transport(e.to_string()))?
                .credentials(credentials)
                .build();
            transport
                .send(&message)
                .map_err(|e| MailError::Transport(e.to_string()))?;
            tracing::info!("Mail sent to {recipient}");
            Ok(())
        })
        .await
        .map_err(|e| MailError::Join(e.to_string()))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mailer() -> Mailer {
        Mailer {
            smtp_server: "smtp.example.com".to_string(),
            smtp_user: "grader".to_string(),
            smtp_pass: "secret".to_string(),
            from_email: "reports@example.com".to_string(),
            service_name: "Resume Grader".to_string(),
        }
    }

    #[test]
    fn test_build_message_with_valid_address() {
        let message = mailer().build_message("ada@example.com", "Your score", "body".to_string());
        assert!(message.is_ok());
    }

    #[test]
    fn test_build_message_rejects_invalid_recipient() {
        let err = mailer()
            .build_message("not-an-address", "Your score", "body".to_string())
            .unwrap_err();
        assert!(matches!(err, MailError::Address(_)));
    }
}
