//! The contracts that bind the pipeline together
//!
//! - [`FontFace`] - A resolved font at a fixed pixel size
//! - [`OutlineSink`] - Receives glyph outlines in canvas coordinates
//! - [`Fetcher`] - Brings remote bytes (backgrounds, fallback fonts) home
//! - [`Generator`] - Turns one request into one artifact on disk

use std::path::{Path, PathBuf};

use crate::{
    error::{FetchError, Result},
    request::RenderRequest,
};

/// Anything that can receive glyph contours
///
/// Coordinates are canvas pixels with y growing downward, so a sink can hand
/// them straight to a rasterizer.
pub trait OutlineSink {
    fn move_to(&mut self, x: f32, y: f32);
    fn line_to(&mut self, x: f32, y: f32);
    fn quad_to(&mut self, cx: f32, cy: f32, x: f32, y: f32);
    fn curve_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32);
    fn close(&mut self);
}

/// A font loaded at one pixel size
///
/// Text handed to [`FontFace::draw`] is already in visual order: glyphs are
/// laid out strictly left to right with no shaping of their own.
pub trait FontFace: Send + Sync {
    /// Where the font came from, for logs
    fn name(&self) -> &str;

    /// Pixel size this face was resolved at
    fn size(&self) -> f32;

    /// Distance from the top of a line box to its baseline
    fn ascent(&self) -> f32;

    /// Whether the font maps this character to a real glyph
    fn has_glyph(&self, ch: char) -> bool;

    /// Horizontal advance of one character in pixels
    fn advance(&self, ch: char) -> f32;

    /// Advance width of a run of characters in pixels
    fn measure(&self, text: &str) -> f32 {
        text.chars().map(|ch| self.advance(ch)).sum()
    }

    /// Emit the outlines of `text` with the line box's top-left at `origin`
    fn draw(&self, text: &str, origin: (f32, f32), sink: &mut dyn OutlineSink);

    /// Fonts without Arabic coverage produce unreadable duaa images
    fn supports_arabic(&self) -> bool {
        self.has_glyph('\u{0627}') && self.has_glyph('\u{0644}')
    }
}

/// Remote byte source
///
/// Implementations must identify themselves with a recognizable user agent,
/// bound every request with a timeout and report an empty body as
/// [`FetchError::EmptyBody`] rather than success.
pub trait Fetcher: Send + Sync {
    fn fetch(&self, url: &str) -> std::result::Result<Vec<u8>, FetchError>;
}

/// What a finished generation produced
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationReport {
    pub output_path: PathBuf,
    pub file_name: String,
    pub width: u32,
    pub height: u32,
    /// Degraded-output notices (missing Arabic font, unreadable logo, ...)
    pub warnings: Vec<String>,
}

/// Runs a full request through compositing, layout, rendering and encoding
pub trait Generator: Send + Sync {
    fn generate(&self, request: &RenderRequest) -> Result<GenerationReport>;

    /// Directory artifacts are written to
    fn output_dir(&self) -> &Path;
}
