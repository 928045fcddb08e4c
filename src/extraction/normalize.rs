//! Normalization of extracted text into clean prose.
//!
//! Extraction leaves artifacts behind: typographic ligatures, non-breaking
//! spaces, hyphenated line breaks, and stray control characters. `normalize`
//! collapses these into plain prose while keeping paragraph breaks intact.
//! The function is pure and idempotent, and its output is never longer (in
//! bytes) than its input.

/// Normalize raw extracted text.
///
/// - folds ligatures, smart quotes, and non-breaking spaces to ASCII
/// - strips non-printable control characters
/// - joins hyphenation breaks (`pay-\nment` becomes `payment`)
/// - collapses whitespace runs to single spaces, preserving paragraph breaks
/// - trims leading and trailing whitespace
pub fn normalize(raw: &str) -> String {
    let folded = fold_artifacts(raw);
    let joined = join_hyphen_breaks(&folded);
    collapse_whitespace(&joined)
}

/// Replace typographic artifacts with ASCII equivalents and drop control
/// characters, keeping newlines for paragraph detection.
fn fold_artifacts(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '\u{FB00}' => out.push_str("ff"),
            '\u{FB01}' => out.push_str("fi"),
            '\u{FB02}' => out.push_str("fl"),
            '\u{FB03}' => out.push_str("ffi"),
            '\u{FB04}' => out.push_str("ffl"),
            '\u{FB05}' | '\u{FB06}' => out.push_str("st"),
            '\u{2018}' | '\u{2019}' => out.push('\''),
            '\u{201C}' | '\u{201D}' => out.push('"'),
            '\u{2013}' | '\u{2014}' => out.push('-'),
            '\u{2026}' => out.push_str("..."),
            '\u{00A0}' => out.push(' '),
            '\n' => out.push('\n'),
            '\t' => out.push(' '),
            c if c.is_control() => {}
            c => out.push(c),
        }
    }
    out
}

/// Join words split across a line break with a hyphen. The continuation must
/// start with a lowercase letter, so hyphenated proper names keep their
/// hyphen.
fn join_hyphen_breaks(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let chars: Vec<char> = text.chars().collect();
    let mut index = 0;
    while index < chars.len() {
        let ch = chars[index];
        let splits_word = ch == '-'
            && index > 0
            && chars[index - 1].is_alphanumeric()
            && chars.get(index + 1) == Some(&'\n')
            && chars
                .get(index + 2)
                .is_some_and(|next| next.is_lowercase());
        if splits_word {
            index += 2;
            continue;
        }
        out.push(ch);
        index += 1;
    }
    out
}

/// Collapse whitespace runs to single spaces within a paragraph and rejoin
/// paragraphs with a blank line.
fn collapse_whitespace(text: &str) -> String {
    let mut paragraphs = Vec::new();
    let mut current = Vec::new();
    for line in text.lines() {
        let collapsed = line.split_whitespace().collect::<Vec<_>>().join(" ");
        if collapsed.is_empty() {
            if !current.is_empty() {
                paragraphs.push(current.join(" "));
                current.clear();
            }
        } else {
            current.push(collapsed);
        }
    }
    if !current.is_empty() {
        paragraphs.push(current.join(" "));
    }
    paragraphs.join("\n\n")
}
