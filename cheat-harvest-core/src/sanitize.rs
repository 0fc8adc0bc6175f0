//! Turning scraped names into safe path segments.
//!
//! Two flavours exist. [`sanitize_name`] is the aggressive one used for
//! title and cheat folders: it folds Unicode to ASCII, drops leading
//! decoration and keeps only word characters. [`sanitize_filename`] only
//! replaces characters that filesystems reject, and is used where the
//! input is already an identifier (build ids, archive names).

use unicode_normalization::UnicodeNormalization;

/// Characters rejected by at least one common filesystem.
const RESERVED: &[char] = &['\\', '/', '*', '?', ':', '"', '<', '>', '|'];

/// Sanitize a scraped name for use as a folder or file name.
///
/// - Unicode is decomposed (NFKD) and anything without an ASCII form is dropped.
/// - Leading characters are stripped up to the first ASCII letter.
/// - Tabs and line breaks become spaces. Only word characters, spaces and
///   `-` survive; `[` and `]` also survive when `for_folder` is false.
/// - If closing brackets outnumber opening ones, trailing `]` are trimmed
///   until the counts match. `[` is never removed.
///
/// Never fails. An empty result means the caller needs a fallback name;
/// see [`folder_name_or`].
pub fn sanitize_name(raw: &str, for_folder: bool) -> String {
    let ascii: String = raw.nfkd().filter(char::is_ascii).collect();
    let from_letter = ascii.trim_start_matches(|c: char| !c.is_ascii_alphabetic());

    let kept: String = from_letter
        .chars()
        .map(|c| if c.is_whitespace() { ' ' } else { c })
        .filter(|&c| {
            c.is_ascii_alphanumeric()
                || c == '_'
                || c == '-'
                || c == ' '
                || (!for_folder && (c == '[' || c == ']'))
        })
        .collect();

    balance_closing_brackets(kept.trim().to_string())
        .trim()
        .to_string()
}

/// Replace filesystem-reserved characters with `_` and trim whitespace.
pub fn sanitize_filename(raw: &str) -> String {
    raw.chars()
        .map(|c| if RESERVED.contains(&c) { '_' } else { c })
        .collect::<String>()
        .trim()
        .to_string()
}

/// Folder-safe form of `raw`, or `fallback` when sanitizing leaves nothing.
pub fn folder_name_or(raw: &str, fallback: &str) -> String {
    let name = sanitize_name(raw, true);
    if name.is_empty() {
        sanitize_filename(fallback)
    } else {
        name
    }
}

fn count(s: &str, target: char) -> usize {
    s.chars().filter(|&c| c == target).count()
}

fn balance_closing_brackets(mut s: String) -> String {
    while count(&s, ']') > count(&s, '[') && s.ends_with(']') {
        s.pop();
    }
    if count(&s, ']') <= count(&s, '[') {
        return s;
    }

    // Unmatched closers left in the middle of the string
    let mut depth = 0usize;
    s.chars()
        .filter(|&c| match c {
            '[' => {
                depth += 1;
                true
            }
            ']' if depth == 0 => false,
            ']' => {
                depth -= 1;
                true
            }
            _ => true,
        })
        .collect()
}

#[cfg(test)]
#[path = "tests/sanitize_tests.rs"]
mod tests;
