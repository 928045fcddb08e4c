#![deny(missing_docs)]

//! Core library for the Veris document ingestion and summarization service.

/// HTTP routing and REST handlers.
pub mod api;
/// Environment-driven configuration management.
pub mod config;
/// Document text extraction for PDF and DOCX uploads.
pub mod extraction;
/// Generative-language client abstraction and adapters.
pub mod generation;
/// Structured logging and tracing setup.
pub mod logging;
/// Pipeline metrics helpers.
pub mod metrics;
/// Summarization orchestration over the generation backend.
pub mod pipeline;
