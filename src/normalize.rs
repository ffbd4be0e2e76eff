//! Recovers a tag list from the model's free-form completion text.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// A single descriptive label with its confidence in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub label: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum NormalizeError {
    #[error("Model response is not valid JSON: {0}")]
    InvalidJson(String),
    #[error("Invalid response from vision model - missing tags array")]
    MissingTags,
    #[error("Invalid tag at index {index}: {reason}")]
    InvalidTag { index: usize, reason: String },
}

/// Strips a leading ```json / ``` fence and a trailing ``` fence.
///
/// This is a literal prefix/suffix removal, not markdown parsing.
pub fn strip_code_fence(raw: &str) -> &str {
    let text = raw.trim();

    let body = if let Some(rest) = text.strip_prefix("```json") {
        rest
    } else if let Some(rest) = text.strip_prefix("```") {
        rest
    } else {
        return text;
    };

    let body = body.trim_start();
    body.strip_suffix("```").unwrap_or(body).trim_end()
}

pub fn parse_tags(raw: &str) -> Result<Vec<Tag>, NormalizeError> {
    let cleaned = strip_code_fence(raw);
    let cleaned = if cleaned.is_empty() { "{}" } else { cleaned };

    let parsed: Value =
        serde_json::from_str(cleaned).map_err(|e| NormalizeError::InvalidJson(e.to_string()))?;

    let items = parsed
        .get("tags")
        .and_then(Value::as_array)
        .ok_or(NormalizeError::MissingTags)?;

    items
        .iter()
        .enumerate()
        .map(|(index, item)| tag_from_value(index, item))
        .collect()
}

fn tag_from_value(index: usize, item: &Value) -> Result<Tag, NormalizeError> {
    let invalid = |reason: &str| NormalizeError::InvalidTag {
        index,
        reason: reason.to_string(),
    };

    let label = item
        .get("label")
        .and_then(Value::as_str)
        .map(str::trim)
        .ok_or_else(|| invalid("label must be a string"))?;
    if label.is_empty() {
        return Err(invalid("label is empty"));
    }

    let confidence = item
        .get("confidence")
        .and_then(Value::as_f64)
        .ok_or_else(|| invalid("confidence must be a number"))?;

    let clamped = confidence.clamp(0.0, 1.0);
    if clamped != confidence {
        tracing::warn!(
            "Clamping confidence {} for tag '{}' into [0, 1]",
            confidence,
            label
        );
    }

    Ok(Tag {
        label: label.to_string(),
        confidence: clamped,
    })
}
