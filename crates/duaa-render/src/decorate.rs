// this_file: crates/duaa-render/src/decorate.rs

//! Footer line and corner logo

use std::path::{Component, Path};

use image::{imageops::FilterType, RgbaImage};
use tiny_skia::{Pixmap, PixmapPaint, Transform};

use duaa_core::{
    error::{RenderError, Result},
    geometry::{corner_origin, thumbnail_size},
    traits::FontFace,
    types::ShapedLine,
    DuaaError, LogoPosition,
};

use crate::{
    background::decode,
    canvas::pixmap_from_rgba,
    text::{draw_line, PlacedLine, TextStyle},
};

/// Distance between the footer's line box and the bottom edge, on top of
/// the footer font size
pub const FOOTER_BOTTOM_MARGIN: i64 = 30;

/// Footer position: horizontally centered, `footer_font_size + 30` pixels
/// above the bottom edge
pub fn place_footer(line: &ShapedLine, canvas: (u32, u32), footer_font_size: u32) -> PlacedLine {
    let (width, height) = (canvas.0 as i64, canvas.1 as i64);
    let x = (width - line.width.round() as i64).div_euclid(2);
    let y = height - footer_font_size as i64 - FOOTER_BOTTOM_MARGIN;
    PlacedLine {
        text: line.text.clone(),
        x: x as f32,
        y: y as f32,
        width: line.width,
    }
}

pub fn draw_footer(
    pixmap: &mut Pixmap,
    face: &dyn FontFace,
    line: &ShapedLine,
    footer_font_size: u32,
    style: &TextStyle,
) {
    let canvas = (pixmap.width(), pixmap.height());
    let placed = place_footer(line, canvas, footer_font_size);
    draw_line(pixmap, face, &placed, style);
}

/// Load a logo from `dir` and shrink it to fit `size`×`size` (never enlarged)
pub fn load_logo(dir: &Path, name: &str, size: u32) -> Result<RgbaImage> {
    let relative = Path::new(name);
    if name.is_empty() || !relative.components().all(|c| matches!(c, Component::Normal(_))) {
        return Err(DuaaError::Other(format!("invalid logo path '{}'", name)));
    }

    let path = dir.join(relative);
    if !path.is_file() {
        return Err(DuaaError::Other(format!("logo {} not found", path.display())));
    }

    let logo = decode(&path)?.to_rgba8();
    let (width, height) = thumbnail_size(logo.dimensions(), size.max(1));
    if (width, height) == logo.dimensions() {
        return Ok(logo);
    }
    Ok(image::imageops::resize(&logo, width, height, FilterType::Lanczos3))
}

/// Alpha-composite `logo` at a corner, 20 px from both edges
pub fn overlay_logo(
    pixmap: &mut Pixmap,
    logo: &RgbaImage,
    position: LogoPosition,
) -> std::result::Result<(), RenderError> {
    let overlay = pixmap_from_rgba(logo)?;
    let (x, y) = corner_origin(
        (pixmap.width(), pixmap.height()),
        logo.dimensions(),
        position,
    );
    pixmap.draw_pixmap(
        x as i32,
        y as i32,
        overlay.as_ref(),
        &PixmapPaint::default(),
        Transform::identity(),
        None,
    );
    Ok(())
}
