// this_file: crates/duaa-unicode/src/lib.rs

//! Text preparation for right-to-left rendering
//!
//! Two entry points share one contract:
//!
//! - [`normalize`] runs once over the whole input, before wrapping.
//! - [`shape_line`] runs once per wrapped line, never over a paragraph, so
//!   reordering cannot move words across line boundaries.
//!
//! Shaping here means contextual joining into Arabic presentation forms
//! followed by bidi reordering. The output is a visual-order string that a
//! renderer can lay out strictly left to right.

mod bidi;
mod reshape;

pub use bidi::reorder_line;
pub use reshape::reshape;

use unicode_normalization::UnicodeNormalization;

/// Combining marks (harakat among them) travel with the preceding letter
pub fn is_transparent(ch: char) -> bool {
    unicode_normalization::char::is_combining_mark(ch)
}

/// Zero-width and bidi formatting controls removed by [`normalize`]
pub fn is_format_control(ch: char) -> bool {
    matches!(
        ch,
        '\u{200B}'..='\u{200F}'
            | '\u{202A}'..='\u{202E}'
            | '\u{2060}'..='\u{2064}'
            | '\u{2066}'..='\u{2069}'
            | '\u{FEFF}'
    )
}

/// Canonical composition, invisible controls stripped, outer whitespace trimmed
pub fn normalize(text: &str) -> String {
    let composed: String = text.chars().filter(|ch| !is_format_control(*ch)).nfc().collect();
    composed.trim().to_string()
}

/// Join and reorder one already-wrapped line into visual order.
///
/// Pure: the same input always yields the same output. Harakat are kept.
pub fn shape_line(line: &str) -> String {
    reorder_line(&reshape(line))
}

#[cfg(test)]
mod tests;

#[cfg(test)]
mod proptests;
