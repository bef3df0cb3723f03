//! Response normalizer
//!
//! Cleans raw model output into a single-line description within the length
//! contract. Truncation is a plain character cut and may split a word.

/// Characters treated as wrapping quotation
const QUOTE_CHARS: [char; 7] = ['"', '\'', '`', '\u{201C}', '\u{201D}', '\u{2018}', '\u{2019}'];

/// Normalizes raw generated text.
///
/// Applies trim, quote stripping, first-line selection and truncation to
/// `max_length` characters, repeating until the text stops changing. Every
/// step only removes characters, so the loop terminates, and the result is a
/// fixed point: normalizing it again returns it unchanged.
///
/// # Example
///
/// ```
/// use aboutgen::normalize::normalize;
///
/// assert_eq!(normalize("  \"A tiny HTTP client.\"\nExtra", 160), "A tiny HTTP client.");
/// assert_eq!(normalize("abcdef", 3), "abc");
/// ```
pub fn normalize(raw: &str, max_length: usize) -> String {
    let mut current = raw.to_string();
    loop {
        let next = normalize_once(&current, max_length);
        if next == current {
            return next;
        }
        current = next;
    }
}

fn normalize_once(text: &str, max_length: usize) -> String {
    let trimmed = text.trim();
    let unquoted = strip_quotes(trimmed);
    let first_line = unquoted.split(['\r', '\n']).next().unwrap_or_default();
    first_line.chars().take(max_length).collect()
}

fn strip_quotes(text: &str) -> &str {
    let text = text.strip_prefix(&QUOTE_CHARS[..]).unwrap_or(text);
    text.strip_suffix(&QUOTE_CHARS[..]).unwrap_or(text)
}
