#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod config;
mod discover;
mod render;
mod telemetry;

use std::process;

use anyhow::Context;
use nvisy_gemini::{ImageAnalyzer, ImageInput};

use crate::config::{Cli, OutputFormat};

// Tracing target constants
pub const TRACING_TARGET_STARTUP: &str = "nvisy_cli::startup";
pub const TRACING_TARGET_SHUTDOWN: &str = "nvisy_cli::shutdown";
pub const TRACING_TARGET_CONFIG: &str = "nvisy_cli::config";
pub const TRACING_TARGET_DISCOVER: &str = "nvisy_cli::discover";

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        tracing::debug!(
            target: TRACING_TARGET_SHUTDOWN,
            "application terminated successfully"
        );
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_SHUTDOWN,
            error = %error,
            "application terminated with error"
        );
    }

    eprintln!("Error: {error:#}");
    process::exit(1);
}

/// Main application entry point.
async fn run() -> anyhow::Result<()> {
    let cli = Cli::init();

    telemetry::init_tracing()?;
    cli.log();
    cli.validate()?;

    let images = discover::collect_images(&cli.input.paths).await?;
    anyhow::ensure!(!images.is_empty(), "no supported images found in the given paths");

    let analyzer = ImageAnalyzer::from_config(cli.gemini.clone())
        .context("failed to create image analyzer")?;

    let output = match images.as_slice() {
        [image] => analyze_single(&analyzer, image, &cli.input.prompt, cli.input.output).await?,
        _ => analyze_many(&analyzer, &images, &cli.input.prompt, cli.input.output).await?,
    };

    println!("{output}");
    Ok(())
}

/// Analyzes one image; any failure is fatal.
async fn analyze_single(
    analyzer: &ImageAnalyzer,
    image: &ImageInput,
    prompt: &str,
    format: OutputFormat,
) -> anyhow::Result<String> {
    let result = analyzer
        .analyze(image, prompt)
        .await
        .with_context(|| format!("failed to analyze {}", image.name()))?;

    render::render_result(&result, format)
}

/// Analyzes images in order; failures are reported per image.
async fn analyze_many(
    analyzer: &ImageAnalyzer,
    images: &[ImageInput],
    prompt: &str,
    format: OutputFormat,
) -> anyhow::Result<String> {
    let batch = analyzer.analyze_batch(images, prompt).await;
    let output = render::render_batch(&batch, format)?;

    // JSON output stays parseable, so the summary goes to stderr there.
    if format == OutputFormat::Json {
        eprintln!("{}", render::summary(&batch));
    }

    Ok(output)
}
