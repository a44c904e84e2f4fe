//! Provider HTTP API transport.
//!
//! Posts the message as JSON with a bearer key and a base64 attachment;
//! the provider answers 200/202 on acceptance.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::blocking::Client;
use serde::Serialize;
use tracing::debug;

use crate::error::MailError;
use crate::{MailMessage, MailTransport};

const DEFAULT_ENDPOINT: &str = "https://api.sendgrid.com/v3/mail/send";
const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);

/// Mail delivery via the provider's HTTP API.
#[derive(Debug)]
pub struct ApiTransport {
    api_key: String,
    endpoint: String,
    client: Client,
}

impl ApiTransport {
    pub fn new(api_key: impl Into<String>) -> Result<Self, MailError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| MailError::Request(e.to_string()))?;
        Ok(Self {
            api_key: api_key.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            client,
        })
    }

    /// Override the API endpoint (used by tests and self-hosted relays).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    fn payload(message: &MailMessage) -> Payload<'_> {
        Payload {
            personalizations: vec![Personalization {
                to: vec![Address {
                    email: &message.recipient,
                }],
                subject: &message.subject,
            }],
            from: Address {
                email: &message.sender,
            },
            content: vec![Content {
                r#type: "text/plain",
                value: &message.body,
            }],
            attachments: vec![AttachmentPayload {
                content: BASE64.encode(&message.attachment.bytes),
                r#type: &message.attachment.content_type,
                filename: &message.attachment.filename,
                disposition: "attachment",
            }],
        }
    }
}

impl MailTransport for ApiTransport {
    fn name(&self) -> &'static str {
        "provider-api"
    }

    fn send(&self, message: &MailMessage) -> Result<(), MailError> {
        debug!("sending via provider API to {}", message.recipient);

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&Self::payload(message))
            .send()
            .map_err(|e| MailError::Request(e.to_string()))?;

        let status = response.status();
        if status.as_u16() == 200 || status.as_u16() == 202 {
            return Ok(());
        }

        Err(MailError::Rejected {
            status: status.as_u16(),
            body: response.text().unwrap_or_default(),
        })
    }
}

#[derive(Serialize)]
struct Payload<'a> {
    personalizations: Vec<Personalization<'a>>,
    from: Address<'a>,
    content: Vec<Content<'a>>,
    attachments: Vec<AttachmentPayload<'a>>,
}

#[derive(Serialize)]
struct Personalization<'a> {
    to: Vec<Address<'a>>,
    subject: &'a str,
}

#[derive(Serialize)]
struct Address<'a> {
    email: &'a str,
}

#[derive(Serialize)]
struct Content<'a> {
    r#type: &'a str,
    value: &'a str,
}

#[derive(Serialize)]
struct AttachmentPayload<'a> {
    content: String,
    r#type: &'a str,
    filename: &'a str,
    disposition: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Attachment;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_payload_shape() {
        let message = MailMessage {
            sender: "kitchen@example.com".to_string(),
            recipient: "manager@example.com".to_string(),
            subject: "Prep log".to_string(),
            body: "Attached.".to_string(),
            attachment: Attachment::csv("log.csv", b"item,quantity\nRice,5\n".to_vec()),
        };

        let json = serde_json::to_value(ApiTransport::payload(&message)).unwrap();

        assert_eq!(json["from"]["email"], "kitchen@example.com");
        assert_eq!(
            json["personalizations"][0]["to"][0]["email"],
            "manager@example.com"
        );
        assert_eq!(json["personalizations"][0]["subject"], "Prep log");
        assert_eq!(json["content"][0]["type"], "text/plain");
        assert_eq!(json["attachments"][0]["filename"], "log.csv");
        assert_eq!(json["attachments"][0]["type"], "text/csv");
        assert_eq!(json["attachments"][0]["disposition"], "attachment");

        let decoded = BASE64
            .decode(json["attachments"][0]["content"].as_str().unwrap())
            .unwrap();
        assert_eq!(decoded, b"item,quantity\nRice,5\n");
    }
}
