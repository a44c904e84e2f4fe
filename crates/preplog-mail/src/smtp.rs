//! Authenticated SMTP relay transport.

use lettre::message::header::ContentType;
use lettre::message::{Attachment as LettreAttachment, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials as SmtpAuth;
use lettre::{Message, SmtpTransport, Transport};
use tracing::debug;

use crate::error::MailError;
use crate::{MailMessage, MailTransport};

/// Sign-in details for the SMTP relay.
#[derive(Debug, Clone)]
pub struct SmtpCredentials {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
}

/// Mail delivery via a STARTTLS SMTP relay.
///
/// The connection is established per send; nothing touches the network
/// until a message goes out.
#[derive(Debug)]
pub struct SmtpRelay {
    credentials: SmtpCredentials,
}

impl SmtpRelay {
    pub fn new(credentials: SmtpCredentials) -> Result<Self, MailError> {
        if credentials.host.is_empty() {
            return Err(MailError::Credentials("SMTP host is empty".to_string()));
        }
        Ok(Self { credentials })
    }

    fn transport(&self) -> Result<SmtpTransport, MailError> {
        Ok(SmtpTransport::starttls_relay(&self.credentials.host)
            .map_err(|e| MailError::Smtp(e.to_string()))?
            .port(self.credentials.port)
            .credentials(SmtpAuth::new(
                self.credentials.username.clone(),
                self.credentials.password.clone(),
            ))
            .build())
    }

    fn build(message: &MailMessage) -> Result<Message, MailError> {
        let content_type = ContentType::parse(&message.attachment.content_type)
            .map_err(|e| MailError::InvalidMessage(e.to_string()))?;

        let attachment = LettreAttachment::new(message.attachment.filename.clone())
            .body(message.attachment.bytes.clone(), content_type);

        Message::builder()
            .from(
                message
                    .sender
                    .parse()
                    .map_err(|_| MailError::InvalidMessage(format!("bad sender: {}", message.sender)))?,
            )
            .to(message
                .recipient
                .parse()
                .map_err(|_| {
                    MailError::InvalidMessage(format!("bad recipient: {}", message.recipient))
                })?)
            .subject(&message.subject)
            .multipart(
                MultiPart::mixed()
                    .singlepart(SinglePart::plain(message.body.clone()))
                    .singlepart(attachment),
            )
            .map_err(|e| MailError::InvalidMessage(e.to_string()))
    }
}

impl MailTransport for SmtpRelay {
    fn name(&self) -> &'static str {
        "smtp-relay"
    }

    fn send(&self, message: &MailMessage) -> Result<(), MailError> {
        debug!("sending via SMTP relay to {}", message.recipient);

        let email = Self::build(message)?;
        self.transport()?
            .send(&email)
            .map(|_| ())
            .map_err(|e| MailError::Smtp(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Attachment;

    fn message() -> MailMessage {
        MailMessage {
            sender: "kitchen@example.com".to_string(),
            recipient: "manager@example.com".to_string(),
            subject: "Prep log".to_string(),
            body: "Attached.".to_string(),
            attachment: Attachment::csv("log.csv", b"item,quantity\n".to_vec()),
        }
    }

    #[test]
    fn test_builds_multipart_message() {
        let email = SmtpRelay::build(&message()).unwrap();
        let rendered = String::from_utf8(email.formatted()).unwrap();
        assert!(rendered.contains("Subject: Prep log"));
        assert!(rendered.contains("log.csv"));
    }

    #[test]
    fn test_bad_address_is_invalid_message() {
        let mut bad = message();
        bad.recipient = "not an address".to_string();
        assert!(matches!(
            SmtpRelay::build(&bad).unwrap_err(),
            MailError::InvalidMessage(_)
        ));
    }
}
