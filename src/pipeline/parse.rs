//! Tolerant parsing of generation-backend replies.
//!
//! Models answer in two shapes: the JSON object the prompt asked for, or free
//! prose (sometimes with the JSON wrapped in a code fence or surrounded by
//! commentary). Parsing attempts the structured shape first and downgrades to
//! treating the whole reply as summary text, so a malformed clause list never
//! fails the request.

use serde_json::Value;

use super::types::{ClauseRecord, SummarizationResult};

/// How a backend reply was understood.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ParsedReply {
    /// The reply carried the requested JSON shape.
    Structured(SummarizationResult),
    /// The reply was free text; it becomes the summary with no clauses.
    Raw(String),
}

impl ParsedReply {
    pub(crate) fn into_result(self) -> SummarizationResult {
        match self {
            Self::Structured(result) => result,
            Self::Raw(text) => SummarizationResult {
                summary: text,
                clauses: Vec::new(),
            },
        }
    }
}

/// Interpret a raw backend reply, structured shape first.
pub(crate) fn interpret_reply(raw: &str) -> ParsedReply {
    if let Some(result) = structured_result(raw) {
        ParsedReply::Structured(result)
    } else {
        ParsedReply::Raw(raw.trim().to_string())
    }
}

fn structured_result(raw: &str) -> Option<SummarizationResult> {
    let value = extract_json_object(raw).and_then(|s| serde_json::from_str::<Value>(s).ok())?;
    let object = value.as_object()?;

    let summary = object.get("summary").and_then(Value::as_str);
    let clauses = object.get("clauses").and_then(Value::as_array);
    // A reply with neither field is not a structured result at all.
    if summary.is_none() && clauses.is_none() {
        return None;
    }

    let clauses = clauses
        .map(|entries| {
            entries
                .iter()
                // Entries missing `type` or `snippet` are dropped, not fatal.
                .filter_map(|entry| serde_json::from_value::<ClauseRecord>(entry.clone()).ok())
                .collect()
        })
        .unwrap_or_default();

    Some(SummarizationResult {
        summary: summary.unwrap_or_default().trim().to_string(),
        clauses,
    })
}

/// Slice out the outermost JSON object, skipping code fences and prose.
fn extract_json_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (end >= start).then_some(&raw[start..=end])
}
