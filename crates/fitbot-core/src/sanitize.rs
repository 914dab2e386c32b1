//! Inbound text normalization.
//!
//! Messaging clients pad user input with whitespace and invisible
//! characters (zero-width spaces from copy/paste, byte-order marks,
//! stray control codes). Menu matching is exact, so these are stripped
//! before the text reaches the dialogue engine.

/// Result of normalizing a user message.
#[derive(Debug)]
pub struct SanitizeResult {
    /// The cleaned text.
    pub text: String,
    /// Whether anything besides surrounding whitespace was removed.
    pub was_modified: bool,
    /// Descriptions of what was stripped.
    pub warnings: Vec<String>,
}

/// Characters that render as nothing but break exact matching.
const INVISIBLE: [char; 5] = ['\u{200B}', '\u{200C}', '\u{200D}', '\u{2060}', '\u{FEFF}'];

/// Normalize user input before it reaches the dialogue engine.
///
/// Never rejects a message: it only removes characters that cannot be
/// part of a meaningful menu answer, then trims.
pub fn sanitize(input: &str) -> SanitizeResult {
    let mut warnings = Vec::new();

    let invisible = input.chars().filter(|c| INVISIBLE.contains(c)).count();
    if invisible > 0 {
        warnings.push(format!("stripped {invisible} invisible character(s)"));
    }

    let control = input
        .chars()
        .filter(|c| c.is_control() && !matches!(c, '\n' | '\t' | '\r'))
        .count();
    if control > 0 {
        warnings.push(format!("stripped {control} control character(s)"));
    }

    let text: String = input
        .chars()
        .filter(|c| !INVISIBLE.contains(c))
        .filter(|c| !c.is_control() || matches!(c, '\n' | '\t' | '\r'))
        .collect();

    SanitizeResult {
        text: text.trim().to_string(),
        was_modified: !warnings.is_empty(),
        warnings,
    }
}
