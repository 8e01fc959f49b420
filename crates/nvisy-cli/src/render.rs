//! Formats analysis results for stdout.

use std::fmt::Write;

use nvisy_gemini::{AnalysisResult, BatchResult, BatchStatus};

use crate::config::OutputFormat;

/// Renders a single analysis result.
///
/// Text output falls back to the JSON body when the response carries no text.
pub fn render_result(result: &AnalysisResult, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
        OutputFormat::Text => match result.text() {
            Some(text) => Ok(text),
            None => Ok(serde_json::to_string_pretty(result)?),
        },
    }
}

/// Renders every outcome of a batch, in input order.
///
/// Text output ends with the [`summary`] line.
pub fn render_batch(batch: &BatchResult, format: OutputFormat) -> anyhow::Result<String> {
    if format == OutputFormat::Json {
        return Ok(serde_json::to_string_pretty(batch)?);
    }

    let mut output = String::new();
    for outcome in batch {
        writeln!(output, "== {} ==", outcome.filename)?;
        match &outcome.status {
            BatchStatus::Success(result) => {
                writeln!(output, "{}", render_result(result, format)?)?;
            }
            BatchStatus::Failure { error } => {
                writeln!(output, "error: {error}")?;
            }
        }
        output.push('\n');
    }

    output.push_str(&summary(batch));
    Ok(output)
}

/// Returns the `n succeeded, m failed` line for a batch.
pub fn summary(batch: &BatchResult) -> String {
    format!("{} succeeded, {} failed", batch.succeeded(), batch.failed())
}

#[cfg(test)]
mod tests {
    use nvisy_gemini::BatchOutcome;
    use serde_json::json;

    use super::*;

    fn candidate(text: &str) -> AnalysisResult {
        AnalysisResult::new(json!({
            "candidates": [{ "content": { "parts": [{ "text": text }] } }]
        }))
    }

    fn sample_batch() -> BatchResult {
        BatchResult::new(vec![
            BatchOutcome::success("a.jpg", candidate("a cat")),
            BatchOutcome::failure("b.jpg", "[transport]: HTTP error, status: 500"),
            BatchOutcome::success("c.jpg", candidate("a dog")),
        ])
    }

    #[test]
    fn test_render_result_text() {
        let output = render_result(&candidate("a cat"), OutputFormat::Text).unwrap();
        assert_eq!(output, "a cat");
    }

    #[test]
    fn test_render_result_text_falls_back_to_json() {
        let result = AnalysisResult::new(json!({ "text": "a cat" }));
        let output = render_result(&result, OutputFormat::Text).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed, json!({ "text": "a cat" }));
    }

    #[test]
    fn test_render_batch_json() {
        let output = render_batch(&sample_batch(), OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(parsed.as_array().unwrap().len(), 3);
        assert_eq!(parsed[0]["success"], json!(true));
        assert_eq!(parsed[1]["success"], json!(false));
        assert_eq!(parsed[1]["error"], json!("[transport]: HTTP error, status: 500"));
        assert_eq!(parsed[2]["filename"], json!("c.jpg"));
    }

    #[test]
    fn test_render_batch_text() {
        let output = render_batch(&sample_batch(), OutputFormat::Text).unwrap();

        let a = output.find("== a.jpg ==").unwrap();
        let b = output.find("== b.jpg ==").unwrap();
        let c = output.find("== c.jpg ==").unwrap();
        assert!(a < b && b < c);
        assert!(output.contains("a cat"));
        assert!(output.contains("error: [transport]: HTTP error, status: 500"));
        assert!(output.ends_with("2 succeeded, 1 failed"));
    }

    #[test]
    fn test_summary_of_empty_batch() {
        assert_eq!(summary(&BatchResult::default()), "0 succeeded, 0 failed");
    }
}
