//! Line normalization: raw OCR text to an ordered sequence of usable lines.

use super::rules::patterns::DISALLOWED_CHARS;

/// Lines shorter than this after trimming are discarded as noise.
const MIN_LINE_CHARS: usize = 3;

/// Split raw OCR text into trimmed, noise-filtered lines.
///
/// Each line is trimmed, dropped when shorter than three characters, and
/// stripped of every character outside the allow-list (word characters,
/// digits, currency symbols, and `. , : / -`). Source order is preserved:
/// several extractors depend on top-to-bottom reading order.
pub fn normalize_lines(text: &str) -> Vec<String> {
    let mut lines = Vec::new();

    for raw in text.split('\n') {
        let trimmed = raw.trim();
        if trimmed.chars().count() < MIN_LINE_CHARS {
            continue;
        }
        lines.push(DISALLOWED_CHARS.replace_all(trimmed, "").into_owned());
    }

    lines
}
