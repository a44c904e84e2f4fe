//! OCR collaborator implementations for the CLI.

use reqwest::blocking::Client;
use tracing::debug;

use preplog_core::{parse_word_boxes, OcrError, OcrSource, WordBox};

const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(120);

/// Remote OCR service: POSTs image bytes, receives the normalized
/// word-box JSON payload.
pub struct RemoteOcr {
    endpoint: String,
    api_key: String,
    client: Client,
}

impl RemoteOcr {
    /// Build a client from `PREPLOG_OCR_ENDPOINT` / `PREPLOG_OCR_KEY`.
    pub fn from_env() -> Result<Self, OcrError> {
        let endpoint = std::env::var("PREPLOG_OCR_ENDPOINT")
            .map_err(|_| OcrError::Credentials("PREPLOG_OCR_ENDPOINT not set".to_string()))?;
        let api_key = std::env::var("PREPLOG_OCR_KEY")
            .map_err(|_| OcrError::Credentials("PREPLOG_OCR_KEY not set".to_string()))?;

        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| OcrError::Request(e.to_string()))?;

        Ok(Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key,
            client,
        })
    }
}

impl OcrSource for RemoteOcr {
    fn recognize(&self, image: &[u8]) -> Result<Vec<WordBox>, OcrError> {
        debug!("posting {} image bytes to {}", image.len(), self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .header("X-Api-Key", &self.api_key)
            .header("Content-Type", "application/octet-stream")
            .body(image.to_vec())
            .send()
            .map_err(|e| OcrError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(OcrError::Service {
                status: status.as_u16(),
                message: response.text().unwrap_or_default(),
            });
        }

        let body = response
            .bytes()
            .map_err(|e| OcrError::Request(e.to_string()))?;
        parse_word_boxes(&body)
    }
}

/// Pre-recognized word boxes from disk: the "image" bytes are already the
/// normalized word-box JSON. Used for offline runs and tests.
pub struct WordFileSource;

impl OcrSource for WordFileSource {
    fn recognize(&self, image: &[u8]) -> Result<Vec<WordBox>, OcrError> {
        parse_word_boxes(image)
    }
}
