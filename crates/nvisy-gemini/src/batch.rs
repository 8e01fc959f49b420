//! Per-image outcomes of a batch analysis.

use serde::ser::{Serialize, Serializer};

use crate::AnalysisResult;

/// Whether a single image in a batch was analyzed.
#[derive(Debug, Clone, PartialEq)]
pub enum BatchStatus {
    /// The image was analyzed.
    Success(AnalysisResult),
    /// Analysis failed with the given message.
    Failure { error: String },
}

/// Outcome for one input of a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchOutcome {
    /// Name of the originating input.
    pub filename: String,
    /// Result or failure message.
    pub status: BatchStatus,
}

impl BatchOutcome {
    /// Records a successful analysis.
    pub fn success(filename: impl Into<String>, result: AnalysisResult) -> Self {
        Self {
            filename: filename.into(),
            status: BatchStatus::Success(result),
        }
    }

    /// Records a failed analysis.
    pub fn failure(filename: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            status: BatchStatus::Failure {
                error: error.into(),
            },
        }
    }

    /// Returns whether the image was analyzed.
    pub fn is_success(&self) -> bool {
        matches!(self.status, BatchStatus::Success(_))
    }

    /// Returns the result of a successful analysis.
    pub fn result(&self) -> Option<&AnalysisResult> {
        match &self.status {
            BatchStatus::Success(result) => Some(result),
            BatchStatus::Failure { .. } => None,
        }
    }

    /// Returns the failure message.
    pub fn error(&self) -> Option<&str> {
        match &self.status {
            BatchStatus::Success(_) => None,
            BatchStatus::Failure { error } => Some(error),
        }
    }
}

/// Serialized as `{"filename", "success", "result" | "error"}`.
impl Serialize for BatchOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(serde::Serialize)]
        struct Record<'a> {
            filename: &'a str,
            success: bool,
            #[serde(skip_serializing_if = "Option::is_none")]
            result: Option<&'a AnalysisResult>,
            #[serde(skip_serializing_if = "Option::is_none")]
            error: Option<&'a str>,
        }

        Record {
            filename: &self.filename,
            success: self.is_success(),
            result: self.result(),
            error: self.error(),
        }
        .serialize(serializer)
    }
}

/// Ordered outcomes of a batch, one per input.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
#[serde(transparent)]
pub struct BatchResult {
    outcomes: Vec<BatchOutcome>,
}

impl BatchResult {
    /// Wraps outcomes that are already in input order.
    pub fn new(outcomes: Vec<BatchOutcome>) -> Self {
        Self { outcomes }
    }

    /// Returns the outcomes in input order.
    pub fn outcomes(&self) -> &[BatchOutcome] {
        &self.outcomes
    }

    /// Iterates over the outcomes in input order.
    pub fn iter(&self) -> std::slice::Iter<'_, BatchOutcome> {
        self.outcomes.iter()
    }

    /// Number of outcomes.
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Returns whether the batch had no inputs.
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Number of images analyzed successfully.
    pub fn succeeded(&self) -> usize {
        self.iter().filter(|outcome| outcome.is_success()).count()
    }

    /// Number of images that failed.
    pub fn failed(&self) -> usize {
        self.len() - self.succeeded()
    }
}

impl IntoIterator for BatchResult {
    type IntoIter = std::vec::IntoIter<BatchOutcome>;
    type Item = BatchOutcome;

    fn into_iter(self) -> Self::IntoIter {
        self.outcomes.into_iter()
    }
}

impl<'a> IntoIterator for &'a BatchResult {
    type IntoIter = std::slice::Iter<'a, BatchOutcome>;
    type Item = &'a BatchOutcome;

    fn into_iter(self) -> Self::IntoIter {
        self.outcomes.iter()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_outcome_serialization() {
        let success = BatchOutcome::success("a.jpg", AnalysisResult::new(json!({ "text": "a cat" })));
        let failure = BatchOutcome::failure("b.jpg", "[transport]: HTTP error, status: 500");

        assert_eq!(
            serde_json::to_value(&success).unwrap(),
            json!({ "filename": "a.jpg", "success": true, "result": { "text": "a cat" } })
        );
        assert_eq!(
            serde_json::to_value(&failure).unwrap(),
            json!({
                "filename": "b.jpg",
                "success": false,
                "error": "[transport]: HTTP error, status: 500"
            })
        );
    }

    #[test]
    fn test_batch_counts() {
        let batch = BatchResult::new(vec![
            BatchOutcome::success("a.jpg", AnalysisResult::new(json!({}))),
            BatchOutcome::failure("b.jpg", "boom"),
            BatchOutcome::success("c.jpg", AnalysisResult::new(json!({}))),
        ]);

        assert_eq!(batch.len(), 3);
        assert_eq!(batch.succeeded(), 2);
        assert_eq!(batch.failed(), 1);
        assert_eq!(batch.outcomes()[1].error(), Some("boom"));

        let names: Vec<_> = batch.iter().map(|outcome| outcome.filename.as_str()).collect();
        assert_eq!(names, ["a.jpg", "b.jpg", "c.jpg"]);
    }

    #[test]
    fn test_empty_batch() {
        let batch = BatchResult::default();
        assert!(batch.is_empty());
        assert_eq!(batch.failed(), 0);
        assert_eq!(serde_json::to_value(&batch).unwrap(), json!([]));
    }
}
