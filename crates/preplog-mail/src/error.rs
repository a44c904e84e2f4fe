//! Error types for mail delivery.

use thiserror::Error;

/// Errors from the mail delivery layer.
///
/// A delivery failure carries the transport's reason; the caller still has
/// the CSV bytes, nothing is lost by a failed send.
#[derive(Error, Debug)]
pub enum MailError {
    /// No usable credential is configured for any transport.
    #[error("no mail credentials configured: {0}")]
    Credentials(String),

    /// The message itself could not be built.
    #[error("invalid message: {0}")]
    InvalidMessage(String),

    /// The provider API request failed before a response arrived.
    #[error("mail API request failed: {0}")]
    Request(String),

    /// The provider API rejected the message.
    #[error("mail API error ({status}): {body}")]
    Rejected { status: u16, body: String },

    /// The SMTP relay refused or failed the transmission.
    #[error("SMTP relay error: {0}")]
    Smtp(String),
}
