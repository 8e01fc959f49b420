//! Decoded response from the `generateContent` endpoint.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Structured response returned by the remote service.
///
/// The shape is defined by the external API, so the decoded JSON is kept
/// as-is and only inspected on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnalysisResult(Value);

impl AnalysisResult {
    /// Wraps a decoded JSON value.
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Returns the decoded JSON.
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Consumes the result, returning the decoded JSON.
    pub fn into_value(self) -> Value {
        self.0
    }

    /// Returns the generated text of the first candidate.
    ///
    /// Text parts are concatenated in order. Returns `None` when the
    /// response carries no candidate text (for example a blocked prompt).
    pub fn text(&self) -> Option<String> {
        let parts = self
            .0
            .get("candidates")?
            .get(0)?
            .get("content")?
            .get("parts")?
            .as_array()?;

        let texts: Vec<&str> = parts
            .iter()
            .filter_map(|part| part.get("text").and_then(Value::as_str))
            .collect();

        if texts.is_empty() {
            None
        } else {
            Some(texts.concat())
        }
    }

    /// Returns the finish reason reported for the first candidate.
    pub fn finish_reason(&self) -> Option<&str> {
        self.0
            .get("candidates")?
            .get(0)?
            .get("finishReason")?
            .as_str()
    }
}

impl From<Value> for AnalysisResult {
    fn from(value: Value) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_text_from_candidates() {
        let result = AnalysisResult::new(json!({
            "candidates": [{
                "content": {
                    "parts": [{ "text": "A cat " }, { "text": "on a mat." }],
                    "role": "model"
                },
                "finishReason": "STOP"
            }]
        }));

        assert_eq!(result.text().as_deref(), Some("A cat on a mat."));
        assert_eq!(result.finish_reason(), Some("STOP"));
    }

    #[test]
    fn test_text_missing() {
        let result = AnalysisResult::new(json!({ "promptFeedback": { "blockReason": "SAFETY" } }));
        assert!(result.text().is_none());
        assert!(result.finish_reason().is_none());
    }

    #[test]
    fn test_serializes_transparently() {
        let body = json!({ "text": "a cat" });
        let result = AnalysisResult::from(body.clone());

        assert_eq!(serde_json::to_value(&result).unwrap(), body);
        assert_eq!(result.into_value(), body);
    }
}
