//! Text preparation ahead of embedding and tabular export.
//!
//! Two independent, stateless operations:
//! - [`truncate_to_budget`] keeps embedding inputs under the model's token
//!   limit using a cheap character estimate;
//! - [`sanitize`] makes a field safe for single-line TSV display.
//!
//! Truncation is applied to the embedding input, sanitization only to the
//! metadata title, so the model sees raw (but bounded) text while the
//! metadata table stays single-line.

/// Truncates `text` to an estimated token budget.
///
/// The budget is `max_tokens * avg_chars_per_token` characters. This is an
/// approximation of the true tokenizer and may under- or over-truncate;
/// [`token_count`] gives the exact count for calibration. Counts characters,
/// not bytes, so the cut never lands inside a UTF-8 sequence. Idempotent.
pub fn truncate_to_budget(text: &str, max_tokens: usize, avg_chars_per_token: f32) -> &str {
    let max_chars = (max_tokens as f32 * avg_chars_per_token) as usize;
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

/// Replaces line feeds and carriage returns with spaces and trims the ends.
///
/// Idempotent; the result never contains a raw `\n` or `\r`.
pub fn sanitize(text: &str) -> String {
    text.replace(['\n', '\r'], " ").trim().to_string()
}

/// Exact token count of `text` under the `cl100k_base` encoding.
///
/// Useful for checking how far the character estimate in
/// [`truncate_to_budget`] drifts from the real tokenizer.
#[cfg(feature = "tiktoken")]
pub fn token_count(text: &str) -> usize {
    use std::sync::OnceLock;
    use tiktoken_rs::CoreBPE;

    static ENCODING: OnceLock<CoreBPE> = OnceLock::new();
    let encoding = ENCODING.get_or_init(|| {
        tiktoken_rs::cl100k_base().expect("cl100k_base encoding tables are bundled")
    });
    encoding.encode_ordinary(text).len()
}
