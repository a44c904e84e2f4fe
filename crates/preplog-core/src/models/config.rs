//! Configuration structures for the preplog pipeline.

use serde::{Deserialize, Serialize};

/// Main configuration for the preplog pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PreplogConfig {
    /// Extraction configuration.
    pub extraction: ExtractionConfig,

    /// Known-label disambiguation configuration.
    pub labels: LabelConfig,

    /// Mail delivery settings (non-secret; credentials come from the
    /// environment, never from this file).
    pub mail: MailSettings,
}

/// Field extraction and sanitization configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Minimum OCR confidence (0-100) for a numeric token to count as a
    /// quantity.
    pub confidence_threshold: i32,

    /// Vertical tolerance for grouping word boxes into one visual line,
    /// in image coordinates.
    pub line_tolerance: i32,

    /// Smallest quantity accepted by the range sanitizer (inclusive).
    pub min_quantity: i64,

    /// Largest quantity accepted by the range sanitizer (inclusive).
    pub max_quantity: i64,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: 80,
            line_tolerance: 12,
            min_quantity: 0,
            max_quantity: 10_000,
        }
    }
}

/// Known-label splitting for merged menu rows.
///
/// Disabled by default; the core pipeline stays vocabulary-agnostic.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    /// Enable the splitter stage.
    pub enabled: bool,

    /// Canonical item labels to match as substrings of extracted items.
    pub known_labels: Vec<String>,
}

/// Mail delivery settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MailSettings {
    /// From address.
    pub sender: String,

    /// Default To address.
    pub recipient: String,

    /// Default subject line.
    pub subject: String,

    /// Attachment file name for the exported CSV.
    pub attachment_name: String,

    /// SMTP relay host (used when no provider API key is configured).
    pub smtp_host: String,

    /// SMTP relay port.
    pub smtp_port: u16,

    /// SMTP username; defaults to the sender address when empty.
    pub smtp_user: String,
}

impl Default for MailSettings {
    fn default() -> Self {
        Self {
            sender: String::new(),
            recipient: String::new(),
            subject: "Production log report".to_string(),
            attachment_name: "production_log.csv".to_string(),
            smtp_host: "smtp.gmail.com".to_string(),
            smtp_port: 587,
            smtp_user: String::new(),
        }
    }
}

impl PreplogConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| crate::PreplogError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> crate::Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| crate::PreplogError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = PreplogConfig::default();
        assert_eq!(config.extraction.confidence_threshold, 80);
        assert_eq!(config.extraction.line_tolerance, 12);
        assert_eq!(config.extraction.min_quantity, 0);
        assert_eq!(config.extraction.max_quantity, 10_000);
        assert!(!config.labels.enabled);
        assert!(config.labels.known_labels.is_empty());
        assert_eq!(config.mail.smtp_port, 587);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: PreplogConfig =
            serde_json::from_str(r#"{"extraction": {"confidence_threshold": 60}}"#).unwrap();
        assert_eq!(config.extraction.confidence_threshold, 60);
        assert_eq!(config.extraction.line_tolerance, 12);
        assert_eq!(config.mail.attachment_name, "production_log.csv");
    }
}
