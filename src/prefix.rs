//! Surname folding and prefix bounds
//!
//! A prefix scan over a string-keyed tree becomes a range scan: every
//! string starting with `p` sorts in `[p, successor(p))`, where the
//! successor is the smallest string greater than all of them.

use crate::config::CaseFolding;

/// Fold a surname or query prefix into its secondary-index form
pub fn fold(text: &str, folding: CaseFolding) -> String {
    match folding {
        CaseFolding::Unicode => text.to_lowercase(),
        CaseFolding::Ascii => text.to_ascii_lowercase(),
    }
}

/// Smallest string that sorts after every string starting with `prefix`
///
/// The last character is bumped to the next scalar value (`"smi"` becomes
/// `"smj"`). Trailing `char::MAX` characters cannot be bumped and are
/// dropped first. Returns `None` when nothing is left, meaning the prefix
/// range has no finite upper bound (this includes the empty prefix).
pub fn upper_bound(prefix: &str) -> Option<String> {
    let mut chars: Vec<char> = prefix.chars().collect();

    while let Some(last) = chars.pop() {
        if let Some(next) = next_char(last) {
            chars.push(next);
            return Some(chars.into_iter().collect());
        }
    }

    None
}

/// Next Unicode scalar value, skipping the surrogate gap
fn next_char(c: char) -> Option<char> {
    match c {
        char::MAX => None,
        '\u{D7FF}' => Some('\u{E000}'),
        _ => char::from_u32(c as u32 + 1),
    }
}
