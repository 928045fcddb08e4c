//! PDF text extraction backed by `lopdf`.

use lopdf::Document;

use super::ExtractionError;

/// Extract text from a PDF, page by page, returning the concatenated text and
/// the physical page count.
///
/// Pages without an extractable text layer contribute an empty string; a fully
/// scanned document therefore yields empty text alongside the real page count.
/// Only a document that cannot be parsed at all is an error.
pub(super) fn extract_pdf(raw: &[u8], filename: &str) -> Result<(String, usize), ExtractionError> {
    let document = Document::load_mem(raw).map_err(|error| ExtractionError::ExtractionFailed {
        filename: filename.to_string(),
        cause: error.to_string(),
    })?;

    if document.is_encrypted() {
        return Err(ExtractionError::ExtractionFailed {
            filename: filename.to_string(),
            cause: "document is encrypted".into(),
        });
    }

    let pages = document.get_pages();
    let page_count = pages.len();
    let mut page_texts = Vec::with_capacity(page_count);

    for &page_number in pages.keys() {
        match document.extract_text(&[page_number]) {
            Ok(text) => page_texts.push(text),
            Err(error) => {
                // No text layer on this page; keep going.
                tracing::debug!(page = page_number, error = %error, "No extractable text on page");
                page_texts.push(String::new());
            }
        }
    }

    // Page boundary becomes a paragraph break; the normalizer drops empty ones.
    Ok((page_texts.join("\n\n"), page_count))
}
