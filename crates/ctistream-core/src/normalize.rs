//! Text normalization for collected message bodies
//!
//! Source messages can carry control bytes that corrupt downstream
//! serialization (columnar snapshots, search queries). The allowed set
//! matches the valid-XML character ranges.

/// Remove characters outside the allowed set.
///
/// `None` yields the empty string. Allowed characters are tab, newline,
/// carriage return, U+0020..=U+D7FF, U+E000..=U+FFFD, and
/// U+10000..=U+10FFFF. Pure and idempotent.
pub fn normalize(text: Option<&str>) -> String {
    match text {
        None => String::new(),
        Some(s) => s.chars().filter(|&c| is_allowed(c)).collect(),
    }
}

fn is_allowed(c: char) -> bool {
    matches!(c,
        '\u{0009}' | '\u{000A}' | '\u{000D}'
        | '\u{0020}'..='\u{D7FF}'
        | '\u{E000}'..='\u{FFFD}'
        | '\u{10000}'..='\u{10FFFF}')
}
