//! Text normalization for noisy OCR output.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // C0/C1 control characters, line feed excluded.
    static ref CONTROL_CHARS: Regex =
        Regex::new(r"[\x00-\x08\x0B\x0C\x0E-\x1F\x7F-\x{9F}]").unwrap();
    static ref HORIZONTAL_WS: Regex = Regex::new(r"[ \t]+").unwrap();
    static ref LINE_BREAKS: Regex = Regex::new(r"\n+").unwrap();
}

/// Normalize OCR text for downstream extraction.
///
/// Folds CR/CRLF to LF, strips the remaining C0/C1 control characters,
/// collapses runs of horizontal whitespace to a single space and runs of
/// line feeds to one, then trims. Idempotent, so re-normalizing stored
/// source text is harmless.
pub fn normalize_text(text: &str) -> String {
    let text = text.replace("\r\n", "\n").replace('\r', "\n");
    let text = CONTROL_CHARS.replace_all(&text, "");
    let text = HORIZONTAL_WS.replace_all(&text, " ");
    let text = LINE_BREAKS.replace_all(&text, "\n");
    text.trim().to_string()
}
