//! Core data types and error definitions for the summarization pipeline.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::generation::GenerationClientError;

/// Jurisdiction applied when the caller does not name one.
pub const DEFAULT_JURISDICTION: &str = "General";

/// Errors emitted while orchestrating a summarization.
#[derive(Debug, Error)]
pub enum SummarizeError {
    /// Submitted text was empty after trimming.
    #[error("Document text is empty")]
    EmptyInput,
    /// The generation backend failed at the transport level.
    #[error("Summarization service unavailable: {message}")]
    ServiceUnavailable {
        /// Human-readable description of the upstream failure.
        message: String,
        /// Whether the caller may retry the same request.
        retryable: bool,
    },
}

impl From<GenerationClientError> for SummarizeError {
    fn from(error: GenerationClientError) -> Self {
        Self::ServiceUnavailable {
            retryable: error.is_retryable(),
            message: error.to_string(),
        }
    }
}

/// One legally significant excerpt identified by the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClauseRecord {
    /// Clause label, e.g. "Termination" or "Liability".
    #[serde(rename = "type")]
    pub clause_type: String,
    /// Verbatim or lightly paraphrased excerpt from the document.
    pub snippet: String,
}

/// Outcome of a summarization round-trip.
///
/// `clauses` preserves the order the model produced; an empty list is a valid
/// result, never `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummarizationResult {
    /// Plain-language summary; may be empty when the model found nothing to say.
    pub summary: String,
    /// Ordered clause records recovered from the reply.
    pub clauses: Vec<ClauseRecord>,
}
