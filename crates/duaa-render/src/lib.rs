// this_file: crates/duaa-render/src/lib.rs

//! Drawing a duaa image: background, text block, footer and logo
//!
//! - [`background`] builds the canvas from an image, gradient or color
//! - [`wrap`] splits logical-order text into lines that fit the column
//! - [`text`] places lines and runs the shadow, outline and fill passes
//! - [`decorate`] adds the footer and the corner logo
//! - [`canvas`] converts between `image` buffers and tiny-skia pixmaps

pub mod background;
pub mod canvas;
pub mod decorate;
pub mod text;
pub mod wrap;

#[cfg(test)]
mod testing;

pub use background::{create_gradient_background, Background, BackgroundCompositor};
pub use decorate::{load_logo, overlay_logo};
pub use text::{layout_lines, PlacedLine, TextStyle};
pub use wrap::wrap_text;

use image::{RgbImage, RgbaImage};

use duaa_core::{
    error::RenderError, traits::FontFace, types::ShapedLine, RenderConfig,
};

/// Wrap normalized text to `max_width`, then shape and measure each line
pub fn shape_text(text: &str, face: &dyn FontFace, max_width: f32) -> Vec<ShapedLine> {
    wrap_text(text, face, max_width)
        .iter()
        .map(|line| shaped(line, face))
        .collect()
}

/// The footer is never wrapped; `None` when there is nothing to draw
pub fn shape_footer(text: &str, face: &dyn FontFace) -> Option<ShapedLine> {
    let text = duaa_unicode::normalize(text);
    (!text.is_empty()).then(|| shaped(&text, face))
}

fn shaped(line: &str, face: &dyn FontFace) -> ShapedLine {
    let text = duaa_unicode::shape_line(line);
    let width = face.measure(&text);
    ShapedLine { text, width }
}

/// Everything drawn on top of the background
pub struct Frame<'a> {
    pub lines: &'a [ShapedLine],
    pub face: &'a dyn FontFace,
    pub footer: Option<(ShapedLine, &'a dyn FontFace)>,
    pub logo: Option<&'a RgbaImage>,
}

/// Draw `frame` over `background` and return the finished canvas
pub fn render_frame(
    background: &RgbImage,
    frame: &Frame<'_>,
    config: &RenderConfig,
) -> Result<RgbImage, RenderError> {
    let mut pixmap = canvas::pixmap_from_rgb(background)?;
    let canvas_size = (pixmap.width(), pixmap.height());

    let style = TextStyle::body(config);
    for line in layout_lines(frame.lines, canvas_size, config) {
        text::draw_line(&mut pixmap, frame.face, &line, &style);
    }

    if let Some((line, face)) = &frame.footer {
        decorate::draw_footer(
            &mut pixmap,
            *face,
            line,
            config.footer_font_size,
            &TextStyle::footer(config),
        );
    }

    if let Some(logo) = frame.logo {
        overlay_logo(&mut pixmap, logo, config.logo_position)?;
    }

    log::debug!(
        "Rendered {} line(s) on {}x{}",
        frame.lines.len(),
        canvas_size.0,
        canvas_size.1
    );
    Ok(canvas::rgb_from_pixmap(&pixmap))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MonoFace;
    use duaa_core::Color;

    #[test]
    fn shaped_lines_are_visual_and_measured() {
        let face = MonoFace::new(10.0);
        let lines = shape_text("\u{0628}\u{0628} \u{062A}", &face, 1000.0);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "\u{FE95} \u{FE90}\u{FE91}");
        assert_eq!(lines[0].width, 40.0);
    }

    #[test]
    fn blank_footer_is_skipped() {
        let face = MonoFace::new(10.0);
        assert!(shape_footer("  \u{200B} ", &face).is_none());
        assert!(shape_footer("duaa.app", &face).is_some());
    }

    #[test]
    fn frame_draws_text_over_background() {
        let face = MonoFace::new(20.0);
        let config = RenderConfig {
            format: duaa_core::FormatPreset::Custom,
            width: 100,
            height: 100,
            font_size: 20,
            text_shadow: false,
            ..RenderConfig::default()
        };
        let background = background::solid(100, 100, Color::black());
        let lines = shape_text("abc", &face, 85.0);
        let frame = Frame {
            lines: &lines,
            face: &face,
            footer: None,
            logo: None,
        };

        let image = render_frame(&background, &frame, &config).unwrap();
        assert_eq!(image.dimensions(), (100, 100));
        // line box: x = (100 - 60) / 2 = 20, y = (100 - 30) / 2 = 35
        assert_eq!(image.get_pixel(25, 45).0, [255, 255, 255]);
        assert_eq!(image.get_pixel(5, 5).0, [0, 0, 0]);
    }
}
