//! OCR collaborator interface and the normalized word-box payload.
//!
//! The OCR engine itself is a black box: anything that can turn image bytes
//! into positioned text tokens can feed the pipeline. The core only depends
//! on the normalized form below.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::OcrError;

/// One OCR-recognized text token with position and confidence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordBox {
    /// Recognized text content.
    pub text: String,

    /// Left edge of the token, in image coordinates.
    pub x: i32,

    /// Top edge of the token, in image coordinates.
    pub y: i32,

    /// Engine confidence (0-100), or -1 when unavailable.
    pub confidence: i32,
}

impl WordBox {
    pub fn new(text: impl Into<String>, x: i32, y: i32, confidence: i32) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            confidence,
        }
    }

    /// Whether the token is a digit-only string (a quantity candidate).
    pub fn is_numeric(&self) -> bool {
        !self.text.is_empty() && self.text.chars().all(|c| c.is_ascii_digit())
    }
}

/// Source of recognized word boxes for one image.
///
/// Implementations are synchronous and fallible; no retry logic lives here.
pub trait OcrSource {
    /// Recognize text in the given image bytes.
    fn recognize(&self, image: &[u8]) -> std::result::Result<Vec<WordBox>, OcrError>;
}

/// Parse the normalized OCR service payload into word boxes.
///
/// Expected shape: `{"words": [{"text", "left", "top", "conf"}, ...]}` or a
/// bare array of the same objects. Tokens with empty text are skipped.
/// `conf` may arrive as a number or a string; anything unparseable becomes -1.
pub fn parse_word_boxes(bytes: &[u8]) -> std::result::Result<Vec<WordBox>, OcrError> {
    let value: Value = serde_json::from_slice(bytes)
        .map_err(|e| OcrError::MalformedResponse(e.to_string()))?;

    let words = match &value {
        Value::Array(items) => items.as_slice(),
        Value::Object(obj) => obj
            .get("words")
            .and_then(|w| w.as_array())
            .map(|a| a.as_slice())
            .ok_or_else(|| OcrError::MalformedResponse("no \"words\" array".to_string()))?,
        _ => {
            return Err(OcrError::MalformedResponse(
                "expected object or array".to_string(),
            ))
        }
    };

    let mut boxes = Vec::with_capacity(words.len());
    for word in words {
        let text = word
            .get("text")
            .and_then(|t| t.as_str())
            .unwrap_or("")
            .trim();
        if text.is_empty() {
            continue;
        }

        let x = read_coord(word, "left")
            .ok_or_else(|| OcrError::MalformedResponse(format!("token {text:?} has no left")))?;
        let y = read_coord(word, "top")
            .ok_or_else(|| OcrError::MalformedResponse(format!("token {text:?} has no top")))?;

        boxes.push(WordBox::new(text, x, y, read_confidence(word.get("conf"))));
    }

    debug!("parsed {} word boxes from OCR payload", boxes.len());

    Ok(boxes)
}

fn read_coord(word: &Value, key: &str) -> Option<i32> {
    word.get(key).and_then(|v| {
        v.as_i64()
            .or_else(|| v.as_f64().map(|f| f as i64))
            .map(|n| n as i32)
    })
}

/// Coerce a confidence value to an integer score, -1 on failure.
///
/// Engines report this field inconsistently: integers, floats, or strings
/// like "96.3" all occur in practice.
fn read_confidence(value: Option<&Value>) -> i32 {
    match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .map(|n| n as i32)
            .unwrap_or(-1),
        Some(Value::String(s)) => s.trim().parse::<f64>().map(|f| f as i32).unwrap_or(-1),
        _ => -1,
    }
}
