//! Mail delivery abstraction for preplog.
//!
//! Two interchangeable transports exist behind the [`MailTransport`] trait:
//! a provider HTTP API ([`ApiTransport`]) and an authenticated SMTP relay
//! ([`SmtpRelay`]). Which one runs is decided by which credential is
//! configured, via [`transport_from_credentials`]; callers never branch on
//! the environment themselves and never see credentials after construction.

mod api;
mod error;
mod smtp;

pub use api::ApiTransport;
pub use error::MailError;
pub use smtp::{SmtpCredentials, SmtpRelay};

/// A file attached to an outgoing message.
#[derive(Debug, Clone)]
pub struct Attachment {
    /// File name presented to the recipient.
    pub filename: String,
    /// MIME type, e.g. `text/csv`.
    pub content_type: String,
    /// Raw file bytes.
    pub bytes: Vec<u8>,
}

impl Attachment {
    /// A CSV attachment with the given name.
    pub fn csv(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            content_type: "text/csv".to_string(),
            bytes,
        }
    }
}

/// One outgoing message with a single attachment.
#[derive(Debug, Clone)]
pub struct MailMessage {
    pub sender: String,
    pub recipient: String,
    pub subject: String,
    pub body: String,
    pub attachment: Attachment,
}

/// A mail delivery transport.
///
/// Sends are synchronous and fallible with no retry logic; failures surface
/// once to the immediate caller.
pub trait MailTransport: std::fmt::Debug {
    /// Short transport name for logs and user-facing status.
    fn name(&self) -> &'static str;

    /// Attempt delivery of one message.
    fn send(&self, message: &MailMessage) -> Result<(), MailError>;
}

/// Credentials for the available transports.
///
/// At most one is expected to be configured; when both are present the
/// provider API wins.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    /// Provider API key (bearer token).
    pub api_key: Option<String>,
    /// SMTP relay sign-in.
    pub smtp: Option<SmtpCredentials>,
}

/// Select a transport from the configured credentials.
pub fn transport_from_credentials(
    credentials: Credentials,
) -> Result<Box<dyn MailTransport>, MailError> {
    if let Some(api_key) = credentials.api_key {
        return Ok(Box::new(ApiTransport::new(api_key)?));
    }
    if let Some(smtp) = credentials.smtp {
        return Ok(Box::new(SmtpRelay::new(smtp)?));
    }
    Err(MailError::Credentials(
        "set a provider API key or SMTP sign-in".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_credentials_is_an_error() {
        let err = transport_from_credentials(Credentials::default()).unwrap_err();
        assert!(matches!(err, MailError::Credentials(_)));
    }

    #[test]
    fn test_api_key_selects_api_transport() {
        let transport = transport_from_credentials(Credentials {
            api_key: Some("sk-test".to_string()),
            smtp: None,
        })
        .unwrap();
        assert_eq!(transport.name(), "provider-api");
    }

    #[test]
    fn test_smtp_credentials_select_relay() {
        let transport = transport_from_credentials(Credentials {
            api_key: None,
            smtp: Some(SmtpCredentials {
                host: "smtp.example.com".to_string(),
                port: 587,
                username: "kitchen@example.com".to_string(),
                password: "hunter2".to_string(),
            }),
        })
        .unwrap();
        assert_eq!(transport.name(), "smtp-relay");
    }

    #[test]
    fn test_api_key_wins_over_smtp() {
        let transport = transport_from_credentials(Credentials {
            api_key: Some("sk-test".to_string()),
            smtp: Some(SmtpCredentials {
                host: "smtp.example.com".to_string(),
                port: 587,
                username: "kitchen@example.com".to_string(),
                password: "hunter2".to_string(),
            }),
        })
        .unwrap();
        assert_eq!(transport.name(), "provider-api");
    }
}
