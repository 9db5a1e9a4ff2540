// this_file: crates/duaa-render/src/text.rs

//! Line placement and the shadow / outline / fill passes

use tiny_skia::{FillRule, Paint, Path, PathBuilder, Pixmap, Transform};

use duaa_core::{
    config::MAX_OUTLINE_WIDTH,
    traits::{FontFace, OutlineSink},
    types::ShapedLine,
    Color, RenderConfig, TextAlign,
};

/// Collects glyph contours into one tiny-skia path
#[derive(Default)]
pub struct PathSink {
    builder: PathBuilder,
}

impl PathSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// `None` when nothing visible was drawn
    pub fn finish(self) -> Option<Path> {
        self.builder.finish()
    }
}

impl OutlineSink for PathSink {
    fn move_to(&mut self, x: f32, y: f32) {
        self.builder.move_to(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.builder.line_to(x, y);
    }

    fn quad_to(&mut self, cx: f32, cy: f32, x: f32, y: f32) {
        self.builder.quad_to(cx, cy, x, y);
    }

    fn curve_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32) {
        self.builder.cubic_to(cx0, cy0, cx1, cy1, x, y);
    }

    fn close(&mut self) {
        self.builder.close();
    }
}

/// Outline of a whole line with its box's top-left at the origin
pub fn line_path(face: &dyn FontFace, text: &str) -> Option<Path> {
    let mut sink = PathSink::new();
    face.draw(text, (0.0, 0.0), &mut sink);
    sink.finish()
}

/// A shaped line pinned to canvas coordinates (top-left of its line box)
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
}

/// Stack lines vertically around the canvas center and align each one.
///
/// Left and right alignment are relative to the centered text column, not
/// to the canvas edges.
pub fn layout_lines(lines: &[ShapedLine], canvas: (u32, u32), config: &RenderConfig) -> Vec<PlacedLine> {
    let (width, height) = (canvas.0 as i64, canvas.1 as i64);
    let line_height = config.line_height() as i64;
    let column = config.max_text_width(canvas.0) as i64;
    let block = lines.len() as i64 * line_height;
    let margin = (width - column).div_euclid(2);

    let mut y = (height - block).div_euclid(2);
    lines
        .iter()
        .map(|line| {
            let w = line.width.round() as i64;
            let x = match config.text_align {
                TextAlign::Center => (width - w).div_euclid(2),
                TextAlign::Left => margin,
                TextAlign::Right => width - margin - w,
            };
            let placed = PlacedLine {
                text: line.text.clone(),
                x: x as f32,
                y: y as f32,
                width: line.width,
            };
            y += line_height;
            placed
        })
        .collect()
}

/// Colors and effects for one family of lines
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub fill: Color,
    pub shadow: Option<(Color, (i32, i32))>,
    pub outline: Option<(Color, u32)>,
}

impl TextStyle {
    /// Main text: fill plus whichever effects the config enables
    pub fn body(config: &RenderConfig) -> Self {
        Self {
            fill: config.text_color,
            shadow: config
                .text_shadow
                .then_some((config.shadow_color, config.shadow_offset)),
            outline: config
                .text_outline
                .then_some((config.outline_color, config.outline_width)),
        }
    }

    /// Footer: plain fill in the footer color
    pub fn footer(config: &RenderConfig) -> Self {
        Self::plain(config.footer_color)
    }

    pub fn plain(fill: Color) -> Self {
        Self {
            fill,
            shadow: None,
            outline: None,
        }
    }
}

fn paint(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, color.a);
    paint.anti_alias = true;
    paint
}

/// Draw one placed line: shadow, then outline, then fill
pub fn draw_line(pixmap: &mut Pixmap, face: &dyn FontFace, line: &PlacedLine, style: &TextStyle) {
    let Some(path) = line_path(face, &line.text) else {
        return;
    };
    let mut fill_at = |color: Color, dx: f32, dy: f32| {
        pixmap.fill_path(
            &path,
            &paint(color),
            FillRule::Winding,
            Transform::from_translate(line.x + dx, line.y + dy),
            None,
        );
    };

    if let Some((color, (dx, dy))) = style.shadow {
        fill_at(color, dx as f32, dy as f32);
    }

    if let Some((color, width)) = style.outline {
        let width = width.min(MAX_OUTLINE_WIDTH) as i32;
        for ax in -width..=width {
            for ay in -width..=width {
                fill_at(color, ax as f32, ay as f32);
            }
        }
    }

    fill_at(style.fill, 0.0, 0.0);
}
