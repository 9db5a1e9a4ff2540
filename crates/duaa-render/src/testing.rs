//! Fixed-pitch face for layout tests

use duaa_core::traits::{FontFace, OutlineSink};

/// Every character advances `size` pixels; non-space characters draw as a
/// solid block filling the left 80% of their cell.
pub(crate) struct MonoFace {
    size: f32,
}

impl MonoFace {
    pub(crate) fn new(size: f32) -> Self {
        Self { size }
    }
}

impl FontFace for MonoFace {
    fn name(&self) -> &str {
        "mono"
    }

    fn size(&self) -> f32 {
        self.size
    }

    fn ascent(&self) -> f32 {
        self.size
    }

    fn has_glyph(&self, _ch: char) -> bool {
        true
    }

    fn advance(&self, _ch: char) -> f32 {
        self.size
    }

    fn draw(&self, text: &str, origin: (f32, f32), sink: &mut dyn OutlineSink) {
        let (mut x, y) = origin;
        for ch in text.chars() {
            if !ch.is_whitespace() {
                let w = self.size * 0.8;
                sink.move_to(x, y);
                sink.line_to(x + w, y);
                sink.line_to(x + w, y + self.size);
                sink.line_to(x, y + self.size);
                sink.close();
            }
            x += self.size;
        }
    }
}
