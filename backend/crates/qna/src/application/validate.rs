//! Text Body Validation
//!
//! Explicit validator functions returning the first violation's fixed
//! human-readable label. Questions and answers share the same rule and
//! label: text of at least 6 characters.

/// Label returned for a too-short (or missing) text body
pub const TEXT_LABEL: &str = "A question should be atleast 6 characters long";

/// Minimum text length for questions and answers
const TEXT_MIN_LENGTH: usize = 6;

/// Validate a question/answer body
pub fn text_body(text: &str) -> Result<String, String> {
    if text.chars().count() < TEXT_MIN_LENGTH {
        return Err(TEXT_LABEL.to_string());
    }
    Ok(text.to_string())
}
