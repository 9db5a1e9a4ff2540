// this_file: crates/duaa-unicode/src/proptests.rs

use super::*;
use proptest::prelude::*;

/// Short Arabic words with optional harakat, separated by spaces
fn arabic_line() -> impl Strategy<Value = String> {
    let letter = prop::sample::select(vec![
        '\u{0627}', '\u{0628}', '\u{062A}', '\u{062D}', '\u{062F}', '\u{0631}', '\u{0633}',
        '\u{0639}', '\u{0644}', '\u{0645}', '\u{0646}', '\u{0647}', '\u{0648}', '\u{064A}',
    ]);
    let mark = prop::option::of(prop::sample::select(vec!['\u{064E}', '\u{064F}', '\u{0650}', '\u{0652}']));
    let cluster = (letter, mark).prop_map(|(l, m)| {
        let mut s = l.to_string();
        if let Some(m) = m {
            s.push(m);
        }
        s
    });
    prop::collection::vec(prop::collection::vec(cluster, 1..6), 1..5)
        .prop_map(|words| {
            words
                .into_iter()
                .map(|w| w.concat())
                .collect::<Vec<_>>()
                .join(" ")
        })
}

proptest! {
    #[test]
    fn prop_shape_line_deterministic(line in arabic_line()) {
        prop_assert_eq!(shape_line(&line), shape_line(&line));
    }

    #[test]
    fn prop_shape_line_preserves_harakat(line in arabic_line()) {
        let count = |s: &str| s.chars().filter(|c| matches!(c, '\u{064B}'..='\u{065F}')).count();
        prop_assert_eq!(count(&shape_line(&line)), count(&line));
    }

    #[test]
    fn prop_shape_line_preserves_word_count(line in arabic_line()) {
        prop_assert_eq!(
            shape_line(&line).split(' ').count(),
            line.split(' ').count()
        );
    }

    #[test]
    fn prop_normalize_idempotent(s in "\\PC*") {
        let once = normalize(&s);
        prop_assert_eq!(normalize(&once), once);
    }
}
