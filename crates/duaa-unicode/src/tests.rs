// this_file: crates/duaa-unicode/src/tests.rs

use super::*;

const BISMILLAH: &str = "بِسْمِ اللهِ";

#[test]
fn test_normalize_strips_invisible_controls() {
    let text = "\u{FEFF}  بسم\u{200B}\u{200D} الله\u{200F} ";
    assert_eq!(normalize(text), "بسم الله");
}

#[test]
fn test_normalize_composes() {
    // Alef + madda above composes to U+0622
    assert_eq!(normalize("\u{0627}\u{0653}"), "\u{0622}");
    // Latin e + acute composes too
    assert_eq!(normalize("e\u{0301}"), "\u{00E9}");
}

#[test]
fn test_normalize_empty_and_blank() {
    assert_eq!(normalize(""), "");
    assert_eq!(normalize(" \u{200B}\u{FEFF} "), "");
}

#[test]
fn test_shape_line_reverses_arabic() {
    // بب -> initial beh, final beh, displayed final-first
    assert_eq!(shape_line("\u{0628}\u{0628}"), "\u{FE90}\u{FE91}");
}

#[test]
fn test_shape_line_keeps_harakat_after_base() {
    let shaped = shape_line(BISMILLAH);
    let marks: Vec<char> = shaped.chars().filter(|c| is_transparent(*c)).collect();
    assert_eq!(marks.len(), 4);
    // No mark may lead a cluster in visual order
    assert!(!is_transparent(shaped.chars().next().unwrap()));
    for (prev, next) in shaped.chars().zip(shaped.chars().skip(1)) {
        if is_transparent(next) {
            assert!(prev != ' ', "mark detached from its letter");
        }
    }
}

#[test]
fn test_shape_line_word_order_is_reversed() {
    let shaped = shape_line("\u{0628} \u{062A}");
    // teh first on the left, then the space, then beh
    assert_eq!(shaped, "\u{FE95} \u{FE8F}");
}

#[test]
fn test_shape_line_keeps_digits_left_to_right() {
    let shaped = shape_line("\u{0628} 123");
    assert!(shaped.starts_with("123"));
    assert!(shaped.ends_with('\u{FE8F}'));
}

#[test]
fn test_shape_line_latin_unchanged() {
    assert_eq!(shape_line("Hello world"), "Hello world");
}

#[test]
fn test_shape_line_mirrors_brackets_in_rtl() {
    let shaped = shape_line("\u{0628} (\u{062A})");
    assert!(shaped.starts_with('('));
    assert!(shaped.contains(')'));
    assert_eq!(shaped.chars().filter(|c| *c == '(').count(), 1);
}

#[test]
fn test_shape_line_mirrors_exactly_once() {
    // Whole line is right-to-left: reversed, then each bracket mirrored once
    assert_eq!(shape_line("(\u{0628}\u{062A})"), "(\u{FE96}\u{FE91})");
}

#[test]
fn test_ornate_parentheses_are_not_mirrored() {
    assert_eq!(
        shape_line("\u{FD3E}\u{0628}\u{FD3F}"),
        "\u{FD3F}\u{FE8F}\u{FD3E}"
    );
}

#[test]
fn test_mirror_pairs_are_symmetric() {
    for ch in ['(', ']', '\u{00AB}', '\u{300A}', '\u{FF09}'] {
        let other = crate::bidi::mirror(ch);
        assert_ne!(other, ch);
        assert_eq!(crate::bidi::mirror(other), ch);
    }
    assert_eq!(crate::bidi::mirror('a'), 'a');
}

#[test]
fn test_reshape_joins_extended_letters() {
    // beh, tteh, beh: all three connect
    assert_eq!(reshape("\u{0628}\u{0679}\u{0628}"), "\u{FE91}\u{FB69}\u{FE90}");
}

#[test]
fn test_reshape_lam_alef_ligature() {
    assert_eq!(reshape("\u{0644}\u{0627}"), "\u{FEFB}");
}

#[test]
fn test_reshape_keeps_harakat_in_logical_order() {
    let reshaped = reshape("\u{0628}\u{0650}\u{0628}");
    let chars: Vec<char> = reshaped.chars().collect();
    assert_eq!(chars, vec!['\u{FE91}', '\u{0650}', '\u{FE90}']);
}

#[test]
fn test_lines_are_shaped_independently() {
    // Two lines that would join if shaped as one string without the break
    let first = shape_line("\u{0628}\u{0628}");
    let second = shape_line("\u{0628}\u{0628}");
    // The visually-rightmost glyph of each line is an initial form, the
    // leftmost a final form: nothing joins across the boundary.
    assert_eq!(first.chars().last(), Some('\u{FE91}'));
    assert_eq!(second.chars().next(), Some('\u{FE90}'));
    assert_eq!(format!("{first}{second}").chars().count(), 4);
}

#[test]
fn test_shape_line_empty() {
    assert_eq!(shape_line(""), "");
}
