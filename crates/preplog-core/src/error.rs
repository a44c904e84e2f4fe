//! Error types for the preplog-core library.

use thiserror::Error;

/// Main error type for the preplog library.
#[derive(Error, Debug)]
pub enum PreplogError {
    /// OCR acquisition error.
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    /// Report serialization error.
    #[error("report error: {0}")]
    Report(#[from] ReportError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors from the OCR collaborator.
///
/// An acquisition failure is fatal for the image it belongs to; callers
/// processing several images report it and keep going with the rest.
#[derive(Error, Debug)]
pub enum OcrError {
    /// Credentials for the OCR service are missing or invalid.
    #[error("missing OCR credentials: {0}")]
    Credentials(String),

    /// The request to the OCR service failed.
    #[error("OCR request failed: {0}")]
    Request(String),

    /// The OCR service returned an error status.
    #[error("OCR service error ({status}): {message}")]
    Service { status: u16, message: String },

    /// The service response could not be decoded into word boxes.
    #[error("malformed OCR response: {0}")]
    MalformedResponse(String),
}

/// Errors from CSV report serialization.
#[derive(Error, Debug)]
pub enum ReportError {
    /// CSV read/write failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Failed to recover the underlying buffer from the CSV writer.
    #[error("failed to finish report: {0}")]
    Finish(String),
}

/// Result type for the preplog library.
pub type Result<T> = std::result::Result<T, PreplogError>;
