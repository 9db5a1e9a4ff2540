// this_file: crates/duaa-render/src/wrap.rs

//! Greedy word wrap on logical-order text

use duaa_core::traits::FontFace;

/// Split `text` into lines no wider than `max_width` when measured with `face`.
///
/// Words are separated by whitespace and rejoined with single spaces. A word
/// wider than the budget still gets a line of its own. Explicit newlines
/// always start a new line; blank paragraphs produce nothing.
pub fn wrap_text(text: &str, face: &dyn FontFace, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            if current.is_empty() {
                current.push_str(word);
                continue;
            }

            let candidate = format!("{current} {word}");
            if face.measure(&candidate) <= max_width {
                current = candidate;
            } else {
                lines.push(std::mem::replace(&mut current, word.to_string()));
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MonoFace;
    use proptest::prelude::*;

    #[test]
    fn empty_text_has_no_lines() {
        let face = MonoFace::new(10.0);
        assert!(wrap_text("", &face, 100.0).is_empty());
        assert!(wrap_text("   \n \n", &face, 100.0).is_empty());
    }

    #[test]
    fn fills_lines_greedily() {
        let face = MonoFace::new(10.0);
        // "aaa bbb" is 70 wide, adding " ccc" makes 110
        assert_eq!(
            wrap_text("aaa bbb ccc", &face, 100.0),
            vec!["aaa bbb".to_string(), "ccc".to_string()]
        );
    }

    #[test]
    fn long_word_gets_its_own_line() {
        let face = MonoFace::new(10.0);
        assert_eq!(
            wrap_text("a verylongword b", &face, 50.0),
            vec!["a", "verylongword", "b"]
        );
    }

    #[test]
    fn newline_forces_a_break() {
        let face = MonoFace::new(10.0);
        assert_eq!(
            wrap_text("بسم الله\n\nالرحمن", &face, 1000.0),
            vec!["بسم الله", "الرحمن"]
        );
    }

    #[test]
    fn collapses_runs_of_spaces() {
        let face = MonoFace::new(10.0);
        assert_eq!(wrap_text("  a   b  ", &face, 1000.0), vec!["a b"]);
    }

    proptest! {
        #[test]
        fn lines_respect_budget(words in prop::collection::vec("[a-z]{1,8}", 0..30), budget in 10u32..200) {
            let face = MonoFace::new(5.0);
            let text = words.join(" ");
            let lines = wrap_text(&text, &face, budget as f32);

            for line in &lines {
                // Either it fits or it is a single word that cannot be split
                prop_assert!(face.measure(line) <= budget as f32 || !line.contains(' '));
            }

            let rejoined: Vec<&str> = lines.iter().flat_map(|l| l.split(' ')).collect();
            let original: Vec<&str> = text.split_whitespace().collect();
            prop_assert_eq!(rejoined, original);
        }
    }
}
