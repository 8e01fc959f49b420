//! CLI configuration management.
//!
//! ```text
//! Cli
//! ├── gemini: GeminiConfig   # API key, model, endpoint, HTTP options
//! └── input: InputConfig     # Image paths, prompt, output format
//! ```
//!
//! All configuration can be provided via CLI arguments or environment variables.
//! Use `--help` to see all available options.
//!
//! # Example
//!
//! ```bash
//! nvisy --api-key "..." photo.jpg --prompt "What breed is this dog?"
//!
//! # Or via environment variables
//! GEMINI_API_KEY="..." GEMINI_MODEL="gemini-2.5-flash" nvisy ./images
//! ```

mod input;

use std::process;

use anyhow::Context;
use clap::Parser;
use input::InputConfig;
pub use input::OutputFormat;
use nvisy_gemini::GeminiConfig;
use serde::{Deserialize, Serialize};

use crate::{TRACING_TARGET_CONFIG, TRACING_TARGET_STARTUP};

/// Complete CLI configuration.
#[derive(Debug, Clone, Parser, Serialize, Deserialize)]
#[command(name = "nvisy")]
#[command(about = "Analyze images with Google Gemini")]
#[command(version)]
pub struct Cli {
    /// Gemini connection and model configuration.
    #[clap(flatten)]
    pub gemini: GeminiConfig,

    /// Images to analyze and how to report them.
    #[clap(flatten)]
    pub input: InputConfig,
}

impl Cli {
    /// Loads environment variables from .env file (if enabled) and parses CLI arguments.
    ///
    /// The .env file is loaded first so that clap's `env` lookups see its values.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    #[cfg(feature = "dotenv")]
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }

    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}

    /// Validates all configuration values.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.gemini
            .validate()
            .context("invalid Gemini configuration")?;
        self.input.validate().context("invalid input configuration")?;
        Ok(())
    }

    /// Logs build information and configuration at debug level.
    ///
    /// The API key is never logged, only whether one is present.
    pub fn log(&self) {
        tracing::debug!(
            target: TRACING_TARGET_STARTUP,
            version = env!("CARGO_PKG_VERSION"),
            pid = process::id(),
            arch = std::env::consts::ARCH,
            os = std::env::consts::OS,
            "Build information"
        );

        tracing::debug!(
            target: TRACING_TARGET_CONFIG,
            model = %self.gemini.model,
            base_url = %self.gemini.base_url,
            has_api_key = self.gemini.has_api_key(),
            http_timeout = ?self.gemini.http_timeout,
            paths = self.input.paths.len(),
            output = %self.input.output,
            "Configuration loaded"
        );
    }
}
