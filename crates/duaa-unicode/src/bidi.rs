// this_file: crates/duaa-unicode/src/bidi.rs

//! Logical-to-visual reordering of a single line

use unicode_bidi::BidiInfo;

use crate::is_transparent;

/// Reorder one line from logical to visual (left-to-right pixel) order.
///
/// Paragraph direction comes from the first strong character. Right-to-left
/// runs are reversed cluster by cluster so combining marks stay after their
/// base, and paired brackets inside them are mirrored.
pub fn reorder_line(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let bidi = BidiInfo::new(text, None);
    let mut out = String::with_capacity(text.len());

    for paragraph in &bidi.paragraphs {
        let line = paragraph.range.clone();
        let (levels, runs) = bidi.visual_runs(paragraph, line);

        for run in runs {
            if run.start >= run.end {
                continue;
            }
            let slice = &text[run.clone()];
            let rtl = levels
                .get(run.start)
                .map(|level| level.is_rtl())
                .unwrap_or(paragraph.level.is_rtl());
            if rtl {
                push_reversed(slice, &mut out);
            } else {
                out.push_str(slice);
            }
        }
    }

    out
}

fn push_reversed(run: &str, out: &mut String) {
    let mut clusters = Vec::new();
    let mut start = 0;
    for (idx, ch) in run.char_indices() {
        if idx > start && !is_transparent(ch) {
            clusters.push(&run[start..idx]);
            start = idx;
        }
    }
    clusters.push(&run[start..]);

    for cluster in clusters.into_iter().rev() {
        let mut chars = cluster.chars();
        if let Some(base) = chars.next() {
            out.push(mirror(base));
            out.extend(chars);
        }
    }
}

/// Bidi_Mirrored pairs for brackets and quotation marks.
///
/// The ornate parentheses U+FD3E/U+FD3F are absent: they are not mirrored.
const MIRRORED_PAIRS: &[(char, char)] = &[
    ('(', ')'),
    ('<', '>'),
    ('[', ']'),
    ('{', '}'),
    ('\u{00AB}', '\u{00BB}'),
    ('\u{2039}', '\u{203A}'),
    ('\u{2045}', '\u{2046}'),
    ('\u{207D}', '\u{207E}'),
    ('\u{208D}', '\u{208E}'),
    ('\u{2264}', '\u{2265}'),
    ('\u{2308}', '\u{2309}'),
    ('\u{230A}', '\u{230B}'),
    ('\u{2329}', '\u{232A}'),
    ('\u{2768}', '\u{2769}'),
    ('\u{276A}', '\u{276B}'),
    ('\u{276C}', '\u{276D}'),
    ('\u{276E}', '\u{276F}'),
    ('\u{2770}', '\u{2771}'),
    ('\u{2772}', '\u{2773}'),
    ('\u{2774}', '\u{2775}'),
    ('\u{27E6}', '\u{27E7}'),
    ('\u{27E8}', '\u{27E9}'),
    ('\u{27EA}', '\u{27EB}'),
    ('\u{2983}', '\u{2984}'),
    ('\u{2985}', '\u{2986}'),
    ('\u{3008}', '\u{3009}'),
    ('\u{300A}', '\u{300B}'),
    ('\u{300C}', '\u{300D}'),
    ('\u{300E}', '\u{300F}'),
    ('\u{3010}', '\u{3011}'),
    ('\u{3014}', '\u{3015}'),
    ('\u{3016}', '\u{3017}'),
    ('\u{3018}', '\u{3019}'),
    ('\u{301A}', '\u{301B}'),
    ('\u{FE59}', '\u{FE5A}'),
    ('\u{FE5B}', '\u{FE5C}'),
    ('\u{FE5D}', '\u{FE5E}'),
    ('\u{FF08}', '\u{FF09}'),
    ('\u{FF1C}', '\u{FF1E}'),
    ('\u{FF3B}', '\u{FF3D}'),
    ('\u{FF5B}', '\u{FF5D}'),
    ('\u{FF5F}', '\u{FF60}'),
    ('\u{FF62}', '\u{FF63}'),
];

/// Mirrored glyph for `ch` inside a right-to-left run
pub(crate) fn mirror(ch: char) -> char {
    MIRRORED_PAIRS
        .iter()
        .find_map(|&(open, close)| {
            if ch == open {
                Some(close)
            } else if ch == close {
                Some(open)
            } else {
                None
            }
        })
        .unwrap_or(ch)
}
