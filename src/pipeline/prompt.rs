//! Prompt assembly for the summarization backend.

/// Character budget for document text embedded in a prompt. Keeps the request
/// inside common model context windows; legal boilerplate beyond this point
/// rarely changes the summary.
const MAX_DOCUMENT_CHARS: usize = 24_000;

/// Build the summarization prompt for a document under a jurisdiction label.
///
/// The jurisdiction is embedded verbatim: unrecognized labels are forwarded as
/// free text so new jurisdictions need no code change here.
pub(crate) fn build_summary_prompt(text: &str, jurisdiction: &str) -> String {
    let mut prompt = String::new();
    prompt.push_str(
        "System: You are a legal assistant. Summarize the document below in plain language \
         a non-lawyer understands, then list its key clauses (for example Termination, \
         Liability, Payment). Respond with a single JSON object of the form \
         {\"summary\": string, \"clauses\": [{\"type\": string, \"snippet\": string}]} \
         and nothing else. Quote snippets from the document verbatim where possible.\n\n",
    );
    prompt.push_str(&format!(
        "Assume the legal framework and conventions of the following jurisdiction: {jurisdiction}.\n\n"
    ));
    prompt.push_str("Document:\n");
    prompt.push_str(truncate_chars(text, MAX_DOCUMENT_CHARS));
    prompt.push('\n');
    prompt
}

/// Truncate to a character budget without splitting a code point.
fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((offset, _)) => &text[..offset],
        None => text,
    }
}
