//! Document text extraction: filetype detection, format-specific parsing,
//! and normalization of the recovered text.
//!
//! The extractor is a pure function over the uploaded bytes: it never touches
//! the filesystem and holds no state between calls. A scanned PDF with no text
//! layer is a valid document; it extracts to an empty string with the physical
//! page count intact, and downstream consumers treat that as "no content
//! found" rather than a failure.

mod docx;
pub mod normalize;
mod pdf;

use serde::Serialize;
use std::path::Path;
use thiserror::Error;

pub use normalize::normalize;

/// Document formats the extractor understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Filetype {
    /// Portable Document Format.
    Pdf,
    /// Office Open XML word-processing document.
    Docx,
}

/// Normalized text recovered from one uploaded document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    /// Normalized plain text; empty when the document carries no text layer.
    pub text: String,
    /// Detected document format.
    pub filetype: Filetype,
    /// Physical page count for PDFs; `None` for DOCX, where pages are not meaningful.
    pub pages: Option<usize>,
}

/// Errors produced while turning uploaded bytes into plain text.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// The declared extension (or sniffed content) is not a supported format.
    #[error("Unsupported file format: {extension}")]
    UnsupportedFormat {
        /// Extension declared by the client, lowercased.
        extension: String,
    },
    /// The document matched a supported format but could not be parsed.
    #[error("Failed to extract text from '{filename}': {cause}")]
    ExtractionFailed {
        /// Filename declared by the client.
        filename: String,
        /// Description of the underlying parser failure.
        cause: String,
    },
}


const PDF_MAGIC: &[u8] = b"%PDF-";
// DOCX is a ZIP container; this matches the local-file-header signature.
const ZIP_MAGIC: &[u8] = &[0x50, 0x4B, 0x03, 0x04];

/// Determine the document format from the declared filename, falling back to
/// content signatures only when no extension is present.
///
/// A declared but unrecognized extension always fails with
/// [`ExtractionError::UnsupportedFormat`]; sniffing never overrides what the
/// client claimed.
pub fn detect_filetype(raw: &[u8], filename: &str) -> Result<Filetype, ExtractionError> {
    match declared_extension(filename) {
        Some(extension) => match extension.as_str() {
            "pdf" => Ok(Filetype::Pdf),
            "docx" => Ok(Filetype::Docx),
            _ => Err(ExtractionError::UnsupportedFormat { extension }),
        },
        None => {
            if raw.starts_with(PDF_MAGIC) {
                Ok(Filetype::Pdf)
            } else if raw.starts_with(ZIP_MAGIC) {
                Ok(Filetype::Docx)
            } else {
                Err(ExtractionError::UnsupportedFormat {
                    extension: "unknown".into(),
                })
            }
        }
    }
}

fn declared_extension(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
}

/// Extract normalized plain text and metadata from an uploaded document.
///
/// This is the extractor's whole contract: detect the format, run the
/// format-specific parser, and normalize whatever text came out. Parser
/// failures surface as [`ExtractionError::ExtractionFailed`] with the
/// offending filename attached; they are reportable outcomes, not crashes.
pub fn extract(raw: &[u8], filename: &str) -> Result<ExtractedText, ExtractionError> {
    let filetype = detect_filetype(raw, filename)?;
    let (text, pages) = match filetype {
        Filetype::Pdf => {
            let (text, pages) = pdf::extract_pdf(raw, filename)?;
            (text, Some(pages))
        }
        Filetype::Docx => (docx::extract_docx(raw, filename)?, None),
    };

    Ok(ExtractedText {
        text: normalize(&text),
        filetype,
        pages,
    })
}
