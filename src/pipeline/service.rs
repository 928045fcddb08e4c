//! Pipeline service coordinating extraction, prompt assembly, and the
//! generation backend.

use crate::{
    config::get_config,
    extraction::{self, ExtractedText, ExtractionError},
    generation::{GenerationClient, GenerationRequest, get_generation_client},
    metrics::{MetricsSnapshot, PipelineMetrics},
    pipeline::{
        parse::interpret_reply,
        prompt::build_summary_prompt,
        types::{DEFAULT_JURISDICTION, SummarizationResult, SummarizeError},
    },
};
use async_trait::async_trait;
use std::sync::Arc;

/// Coordinates the document pipeline: extraction, summarization, and metrics.
///
/// The service owns the long-lived generation client and metrics registry. It
/// holds no per-request state, so a single instance shared through an `Arc`
/// serves concurrent requests without locking. Construct it once near process
/// start.
pub struct PipelineService {
    generation_client: Box<dyn GenerationClient + Send + Sync>,
    metrics: Arc<PipelineMetrics>,
}

/// Abstraction over the pipeline used by the HTTP surface.
#[async_trait]
pub trait PipelineApi: Send + Sync {
    /// Detect the document format, extract its text, and normalize it.
    async fn extract_document(
        &self,
        raw: Vec<u8>,
        filename: String,
    ) -> Result<ExtractedText, ExtractionError>;

    /// Summarize normalized text under a jurisdiction label.
    async fn summarize(
        &self,
        text: &str,
        jurisdiction: Option<&str>,
    ) -> Result<SummarizationResult, SummarizeError>;

    /// Retrieve the current metrics snapshot for diagnostics.
    fn metrics_snapshot(&self) -> MetricsSnapshot;
}

impl PipelineService {
    /// Build a new pipeline service from the loaded configuration.
    pub fn new() -> Self {
        tracing::info!("Initializing generation client");
        Self {
            generation_client: get_generation_client(),
            metrics: Arc::new(PipelineMetrics::new()),
        }
    }

    /// Extract and normalize one uploaded document.
    ///
    /// Parsing is CPU-bound, so it runs on the blocking pool; the upload
    /// buffer moves into the task and is dropped when extraction finishes.
    pub async fn extract_document(
        &self,
        raw: Vec<u8>,
        filename: String,
    ) -> Result<ExtractedText, ExtractionError> {
        let task_filename = filename.clone();
        let extracted =
            tokio::task::spawn_blocking(move || extraction::extract(&raw, &task_filename))
                .await
                .map_err(|error| ExtractionError::ExtractionFailed {
                    filename: filename.clone(),
                    cause: format!("extraction task failed: {error}"),
                })??;

        self.metrics
            .record_extraction(extracted.pages.map(|pages| pages as u64));
        tracing::info!(
            filename = %filename,
            filetype = ?extracted.filetype,
            pages = ?extracted.pages,
            text_len = extracted.text.len(),
            "Document extracted"
        );
        Ok(extracted)
    }

    /// Summarize normalized text, conditioning the tone on a jurisdiction.
    ///
    /// The jurisdiction passes through verbatim; absent or blank values fall
    /// back to [`DEFAULT_JURISDICTION`]. The reply is parsed tolerantly, so a
    /// backend that answers in prose still yields a usable summary with an
    /// empty clause list.
    pub async fn summarize(
        &self,
        text: &str,
        jurisdiction: Option<&str>,
    ) -> Result<SummarizationResult, SummarizeError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(SummarizeError::EmptyInput);
        }
        let jurisdiction = jurisdiction
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or(DEFAULT_JURISDICTION);

        let config = get_config();
        let prompt = build_summary_prompt(trimmed, jurisdiction);
        let reply = self
            .generation_client
            .generate(GenerationRequest {
                model: config.summary_model.clone(),
                prompt,
            })
            .await?;

        let result = interpret_reply(&reply).into_result();
        self.metrics.record_summary();
        tracing::info!(
            jurisdiction,
            summary_len = result.summary.len(),
            clauses = result.clauses.len(),
            "Summarization completed"
        );
        Ok(result)
    }

    /// Return the current pipeline metrics snapshot.
    pub fn metrics_snapshot(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}

impl Default for PipelineService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PipelineApi for PipelineService {
    async fn extract_document(
        &self,
        raw: Vec<u8>,
        filename: String,
    ) -> Result<ExtractedText, ExtractionError> {
        PipelineService::extract_document(self, raw, filename).await
    }

    async fn summarize(
        &self,
        text: &str,
        jurisdiction: Option<&str>,
    ) -> Result<SummarizationResult, SummarizeError> {
        PipelineService::summarize(self, text, jurisdiction).await
    }

    fn metrics_snapshot(&self) -> MetricsSnapshot {
        PipelineService::metrics_snapshot(self)
    }
}
