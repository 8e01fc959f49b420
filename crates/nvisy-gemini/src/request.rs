//! Request body for the `generateContent` endpoint.

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f64 = 0.4;

/// Default top-k sampling cutoff.
pub const DEFAULT_TOP_K: u32 = 32;

/// Default nucleus sampling threshold.
pub const DEFAULT_TOP_P: f64 = 1.0;

/// Default cap on generated tokens.
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 2048;

/// Parameters controlling the remote model's output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder)]
#[builder(
    name = "GenerationConfigBuilder",
    pattern = "owned",
    setter(into, prefix = "with"),
    build_fn(validate = "Self::validate_config")
)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Sampling temperature.
    #[builder(default = "DEFAULT_TEMPERATURE")]
    pub temperature: f64,
    /// Number of highest-probability tokens considered at each step.
    #[builder(default = "DEFAULT_TOP_K")]
    pub top_k: u32,
    /// Cumulative probability cutoff for sampling.
    #[builder(default = "DEFAULT_TOP_P")]
    pub top_p: f64,
    /// Maximum number of tokens in the response.
    #[builder(default = "DEFAULT_MAX_OUTPUT_TOKENS")]
    pub max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
            top_k: DEFAULT_TOP_K,
            top_p: DEFAULT_TOP_P,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
        }
    }
}

impl GenerationConfig {
    /// Create a new configuration builder.
    pub fn builder() -> GenerationConfigBuilder {
        GenerationConfigBuilder::default()
    }
}

impl GenerationConfigBuilder {
    fn validate_config(&self) -> std::result::Result<(), String> {
        if let Some(temperature) = self.temperature
            && !(0.0..=2.0).contains(&temperature)
        {
            return Err("Temperature must be between 0.0 and 2.0".to_string());
        }

        if let Some(top_p) = self.top_p
            && !(0.0..=1.0).contains(&top_p)
        {
            return Err("Top-p must be between 0.0 and 1.0".to_string());
        }

        if self.top_k == Some(0) {
            return Err("Top-k must be greater than 0".to_string());
        }

        if self.max_output_tokens == Some(0) {
            return Err("Max output tokens must be greater than 0".to_string());
        }

        Ok(())
    }
}

/// Base64 image payload embedded directly in the request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineData {
    /// Declared content type of the image.
    pub mime_type: String,
    /// Base64-encoded image bytes.
    pub data: String,
}

impl InlineData {
    /// Creates inline data from a content type and base64 text.
    pub fn new(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }
}

/// One part of a content block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Part {
    /// Prompt text.
    Text { text: String },
    /// Inline image data.
    InlineData { inline_data: InlineData },
}

/// A content block made of ordered parts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    /// Parts in the order the model should read them.
    pub parts: Vec<Part>,
}

/// A single-image analysis request.
///
/// The body always holds one content block with the prompt text followed by
/// the inline image, plus the generation configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

impl AnalysisRequest {
    /// Creates a request with the default generation configuration.
    pub fn new(prompt: impl Into<String>, image: InlineData) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![
                    Part::Text {
                        text: prompt.into(),
                    },
                    Part::InlineData { inline_data: image },
                ],
            }],
            generation_config: GenerationConfig::default(),
        }
    }

    /// Replaces the generation configuration.
    #[must_use]
    pub fn with_generation_config(mut self, generation_config: GenerationConfig) -> Self {
        self.generation_config = generation_config;
        self
    }

    /// Returns the prompt text.
    pub fn prompt(&self) -> &str {
        self.parts()
            .find_map(|part| match part {
                Part::Text { text } => Some(text.as_str()),
                Part::InlineData { .. } => None,
            })
            .unwrap_or_default()
    }

    /// Returns the inline image.
    pub fn image(&self) -> Option<&InlineData> {
        self.parts().find_map(|part| match part {
            Part::InlineData { inline_data } => Some(inline_data),
            Part::Text { .. } => None,
        })
    }

    /// Returns the generation configuration.
    pub fn generation_config(&self) -> &GenerationConfig {
        &self.generation_config
    }

    fn parts(&self) -> impl Iterator<Item = &Part> {
        self.contents.iter().flat_map(|content| content.parts.iter())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_request_wire_shape() {
        let request = AnalysisRequest::new("describe", InlineData::new("image/jpeg", "aGk="));
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(
            value,
            json!({
                "contents": [{
                    "parts": [
                        { "text": "describe" },
                        { "inline_data": { "mime_type": "image/jpeg", "data": "aGk=" } }
                    ]
                }],
                "generationConfig": {
                    "temperature": 0.4,
                    "topK": 32,
                    "topP": 1.0,
                    "maxOutputTokens": 2048
                }
            })
        );
    }

    #[test]
    fn test_request_accessors() {
        let request = AnalysisRequest::new("what is this?", InlineData::new("image/png", "AAAA"));

        assert_eq!(request.prompt(), "what is this?");
        assert_eq!(request.image().unwrap().mime_type, "image/png");
        assert_eq!(request.generation_config(), &GenerationConfig::default());
    }

    #[test]
    fn test_generation_config_builder() {
        let config = GenerationConfig::builder()
            .with_temperature(0.9)
            .with_max_output_tokens(512u32)
            .build()
            .expect("Valid config");

        assert_eq!(config.temperature, 0.9);
        assert_eq!(config.top_k, DEFAULT_TOP_K);
        assert_eq!(config.top_p, DEFAULT_TOP_P);
        assert_eq!(config.max_output_tokens, 512);
    }

    #[test]
    fn test_generation_config_validation() {
        assert!(GenerationConfig::builder().with_temperature(3.0).build().is_err());
        assert!(GenerationConfig::builder().with_top_p(1.5).build().is_err());
        assert!(GenerationConfig::builder().with_top_k(0u32).build().is_err());
        assert!(
            GenerationConfig::builder()
                .with_max_output_tokens(0u32)
                .build()
                .is_err()
        );
    }

    #[test]
    fn test_part_round_trip_from_json() {
        let part: Part = serde_json::from_value(json!({ "text": "hello" })).unwrap();
        assert_eq!(
            part,
            Part::Text {
                text: "hello".to_string()
            }
        );
    }
}
