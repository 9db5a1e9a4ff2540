// this_file: crates/duaa-fontdb/src/builtin.rs

//! The face of last resort: a 5x7 bitmap font drawn as square outlines
//!
//! Covers digits, Latin letters (lowercase shares the uppercase shapes) and
//! common punctuation. Everything else, Arabic included, draws as a hollow
//! box. Glyph rows are 5 bits wide, most significant bit leftmost.

use duaa_core::traits::{FontFace, OutlineSink};

const ROWS: usize = 7;
const COLS: u32 = 5;
/// Cell advance in font pixels: five columns plus one of spacing
const ADVANCE: f32 = 6.0;

type Bitmap = [u8; ROWS];

const TOFU: Bitmap = [
    0b11111, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11111,
];

fn bitmap(ch: char) -> Option<Bitmap> {
    let rows = match ch.to_ascii_uppercase() {
        ' ' => [0, 0, 0, 0, 0, 0, 0],
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        '3' => [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        'A' => [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'B' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110],
        'C' => [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110],
        'D' => [0b11100, 0b10010, 0b10001, 0b10001, 0b10001, 0b10010, 0b11100],
        'E' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111],
        'F' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000],
        'G' => [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111],
        'H' => [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'I' => [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        'J' => [0b00111, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100],
        'K' => [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001],
        'L' => [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
        'M' => [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001],
        'N' => [0b10001, 0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001],
        'O' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'P' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        'Q' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101],
        'R' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
        'S' => [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110],
        'T' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        'U' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'V' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100],
        'W' => [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b10101, 0b01010],
        'X' => [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001],
        'Y' => [0b10001, 0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100],
        'Z' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111],
        '.' => [0, 0, 0, 0, 0, 0b01100, 0b01100],
        ',' => [0, 0, 0, 0, 0b01100, 0b00100, 0b01000],
        ':' => [0, 0b01100, 0b01100, 0, 0b01100, 0b01100, 0],
        ';' => [0, 0b01100, 0b01100, 0, 0b01100, 0b00100, 0b01000],
        '!' => [0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0, 0b00100],
        '?' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0, 0b00100],
        '-' => [0, 0, 0, 0b11111, 0, 0, 0],
        '+' => [0, 0b00100, 0b00100, 0b11111, 0b00100, 0b00100, 0],
        '=' => [0, 0, 0b11111, 0, 0b11111, 0, 0],
        '\'' => [0b01100, 0b00100, 0b01000, 0, 0, 0, 0],
        '"' => [0b01010, 0b01010, 0b01010, 0, 0, 0, 0],
        '(' => [0b00010, 0b00100, 0b01000, 0b01000, 0b01000, 0b00100, 0b00010],
        ')' => [0b01000, 0b00100, 0b00010, 0b00010, 0b00010, 0b00100, 0b01000],
        '[' => [0b01110, 0b01000, 0b01000, 0b01000, 0b01000, 0b01000, 0b01110],
        ']' => [0b01110, 0b00010, 0b00010, 0b00010, 0b00010, 0b00010, 0b01110],
        '<' => [0b00010, 0b00100, 0b01000, 0b10000, 0b01000, 0b00100, 0b00010],
        '>' => [0b01000, 0b00100, 0b00010, 0b00001, 0b00010, 0b00100, 0b01000],
        '/' => [0, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0],
        '_' => [0, 0, 0, 0, 0, 0, 0b11111],
        '&' => [0b01100, 0b10010, 0b10100, 0b01000, 0b10101, 0b10010, 0b01101],
        '@' => [0b01110, 0b10001, 0b00001, 0b01101, 0b10101, 0b10101, 0b01110],
        '#' => [0b01010, 0b01010, 0b11111, 0b01010, 0b11111, 0b01010, 0b01010],
        '%' => [0b11000, 0b11001, 0b00010, 0b00100, 0b01000, 0b10011, 0b00011],
        '*' => [0, 0b00100, 0b10101, 0b01110, 0b10101, 0b00100, 0],
        _ => return None,
    };
    Some(rows)
}

/// ASCII-only bitmap face, scaled by whole pixels
#[derive(Debug, Clone)]
pub struct BuiltinFont {
    size: f32,
    scale: f32,
}

impl BuiltinFont {
    pub const NAME: &'static str = "builtin-5x7";

    /// Each font pixel becomes `max(1, round(size / 8))` canvas pixels
    pub fn new(size: f32) -> Self {
        let scale = (size / 8.0).round().max(1.0);
        Self { size, scale }
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }
}

impl FontFace for BuiltinFont {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn size(&self) -> f32 {
        self.size
    }

    fn ascent(&self) -> f32 {
        ROWS as f32 * self.scale
    }

    fn has_glyph(&self, ch: char) -> bool {
        bitmap(ch).is_some()
    }

    fn advance(&self, _ch: char) -> f32 {
        ADVANCE * self.scale
    }

    fn draw(&self, text: &str, origin: (f32, f32), sink: &mut dyn OutlineSink) {
        let s = self.scale;
        let mut pen_x = origin.0;

        for ch in text.chars() {
            let rows = bitmap(ch).unwrap_or(TOFU);
            for (row, bits) in rows.iter().enumerate() {
                for col in 0..COLS {
                    if bits & (1 << (COLS - 1 - col)) == 0 {
                        continue;
                    }
                    let x = pen_x + col as f32 * s;
                    let y = origin.1 + row as f32 * s;
                    sink.move_to(x, y);
                    sink.line_to(x + s, y);
                    sink.line_to(x + s, y + s);
                    sink.line_to(x, y + s);
                    sink.close();
                }
            }
            pen_x += ADVANCE * s;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Squares(usize);

    impl OutlineSink for Squares {
        fn move_to(&mut self, _x: f32, _y: f32) {
            self.0 += 1;
        }
        fn line_to(&mut self, _x: f32, _y: f32) {}
        fn quad_to(&mut self, _: f32, _: f32, _: f32, _: f32) {}
        fn curve_to(&mut self, _: f32, _: f32, _: f32, _: f32, _: f32, _: f32) {}
        fn close(&mut self) {}
    }

    #[test]
    fn scale_follows_size() {
        assert_eq!(BuiltinFont::new(80.0).scale(), 10.0);
        assert_eq!(BuiltinFont::new(30.0).scale(), 4.0);
        assert_eq!(BuiltinFont::new(3.0).scale(), 1.0);
    }

    #[test]
    fn no_arabic_coverage() {
        let font = BuiltinFont::new(80.0);
        assert!(!font.supports_arabic());
        assert!(font.has_glyph('a'));
        assert!(font.has_glyph('Z'));
        assert!(!font.has_glyph('\u{0628}'));
    }

    #[test]
    fn measure_is_uniform() {
        let font = BuiltinFont::new(16.0);
        assert_eq!(font.measure("abc"), 3.0 * 6.0 * 2.0);
        assert_eq!(font.measure("\u{0628}\u{0628}"), 2.0 * 6.0 * 2.0);
    }

    #[test]
    fn unknown_characters_draw_as_boxes() {
        let font = BuiltinFont::new(8.0);
        let mut squares = Squares::default();
        font.draw("\u{0628}", (0.0, 0.0), &mut squares);
        // 5 top + 5 bottom + 2 * 5 side pixels
        assert_eq!(squares.0, 20);
    }

    #[test]
    fn space_draws_nothing() {
        let font = BuiltinFont::new(8.0);
        let mut squares = Squares::default();
        font.draw("   ", (0.0, 0.0), &mut squares);
        assert_eq!(squares.0, 0);
    }
}
