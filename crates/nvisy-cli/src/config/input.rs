//! Input selection and output format.

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use serde::{Deserialize, Serialize};

/// Prompt used when none is given.
pub const DEFAULT_PROMPT: &str = "Describe the contents of this image";

/// How results are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[derive(strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum OutputFormat {
    /// Raw API response as pretty-printed JSON.
    #[default]
    Json,
    /// Extracted response text, one block per image.
    Text,
}

/// Images to analyze and how to report them.
#[derive(Debug, Clone, Args, Serialize, Deserialize)]
pub struct InputConfig {
    /// Image files or directories of images
    #[arg(required = true, value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Instruction sent along with each image
    #[arg(long, default_value = DEFAULT_PROMPT)]
    #[serde(default = "default_prompt")]
    pub prompt: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    #[serde(default)]
    pub output: OutputFormat,
}

fn default_prompt() -> String {
    DEFAULT_PROMPT.to_string()
}

impl InputConfig {
    /// Validates the input configuration.
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(!self.paths.is_empty(), "at least one path is required");
        anyhow::ensure!(!self.prompt.trim().is_empty(), "prompt cannot be empty");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_display() {
        assert_eq!(OutputFormat::Json.to_string(), "json");
        assert_eq!(OutputFormat::Text.to_string(), "text");
    }

    #[test]
    fn test_validate_rejects_blank_prompt() {
        let config = InputConfig {
            paths: vec![PathBuf::from("photo.jpg")],
            prompt: "   ".to_string(),
            output: OutputFormat::Text,
        };

        assert!(config.validate().is_err());
    }
}
