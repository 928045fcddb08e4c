use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe counters describing pipeline activity.
#[derive(Default)]
pub struct PipelineMetrics {
    documents_extracted: AtomicU64,
    pages_extracted: AtomicU64,
    summaries_generated: AtomicU64,
}

impl PipelineMetrics {
    /// Create an empty metrics accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successfully extracted document and its page count, when known.
    pub fn record_extraction(&self, pages: Option<u64>) {
        self.documents_extracted.fetch_add(1, Ordering::Relaxed);
        if let Some(pages) = pages {
            self.pages_extracted.fetch_add(pages, Ordering::Relaxed);
        }
    }

    /// Record a completed summarization round-trip.
    pub fn record_summary(&self) {
        self.summaries_generated.fetch_add(1, Ordering::Relaxed);
    }

    /// Return a snapshot of the current counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            documents_extracted: self.documents_extracted.load(Ordering::Relaxed),
            pages_extracted: self.pages_extracted.load(Ordering::Relaxed),
            summaries_generated: self.summaries_generated.load(Ordering::Relaxed),
        }
    }
}

/// Immutable view of pipeline counters used for reporting.
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct MetricsSnapshot {
    /// Number of documents extracted since startup.
    pub documents_extracted: u64,
    /// Total PDF pages seen across extracted documents.
    pub pages_extracted: u64,
    /// Number of summaries produced by the generation backend.
    pub summaries_generated: u64,
}
