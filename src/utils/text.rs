/// Pulls the payload out of a markdown code fence, preferring a ```json block.
/// Text without fences is returned trimmed.
pub fn strip_code_fences(raw: &str) -> &str {
    let inner = if let Some((_, rest)) = raw.split_once("```json") {
        rest.split("```").next().unwrap_or(rest)
    } else if let Some((_, rest)) = raw.split_once("```") {
        rest.split("```").next().unwrap_or(rest)
    } else {
        raw
    };
    inner.trim()
}

/// First `n` whitespace-separated words of `text`, lowercased and space-joined.
pub fn word_signature(text: &str, n: usize) -> String {
    text.to_lowercase()
        .split_whitespace()
        .take(n)
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
