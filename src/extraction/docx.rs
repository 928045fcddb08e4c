//! DOCX text extraction backed by `docx-rs`.

use docx_rs::{DocumentChild, Paragraph, ParagraphChild, RunChild, read_docx};

use super::ExtractionError;

/// Extract paragraph text from a DOCX document in document order. Paragraphs
/// are separated by blank lines so the normalizer keeps them distinct. Page
/// count is not meaningful for word-processing documents and is never
/// reported.
pub(super) fn extract_docx(raw: &[u8], filename: &str) -> Result<String, ExtractionError> {
    let docx = read_docx(raw).map_err(|error| ExtractionError::ExtractionFailed {
        filename: filename.to_string(),
        cause: error.to_string(),
    })?;

    let mut paragraphs = Vec::new();
    for child in &docx.document.children {
        if let DocumentChild::Paragraph(paragraph) = child {
            let text = paragraph_text(paragraph);
            if !text.is_empty() {
                paragraphs.push(text);
            }
        }
    }

    Ok(paragraphs.join("\n\n"))
}

fn paragraph_text(paragraph: &Paragraph) -> String {
    let mut text = String::new();
    for child in &paragraph.children {
        if let ParagraphChild::Run(run) = child {
            for part in &run.children {
                match part {
                    RunChild::Text(content) => text.push_str(&content.text),
                    RunChild::Tab(_) => text.push(' '),
                    RunChild::Break(_) => text.push('\n'),
                    _ => {}
                }
            }
        }
    }
    text.trim().to_string()
}
