//! Summarization pipeline: prompt assembly, backend invocation, and tolerant
//! parsing of the reply into a summary plus clause records.

mod parse;
mod prompt;
mod service;
mod types;

pub use service::{PipelineApi, PipelineService};
pub use types::{ClauseRecord, SummarizationResult, SummarizeError};
