//! Where fonts come from: loading, resolution and the last-resort face
//!
//! The second stage of the pipeline. A font identifier from the render
//! config is turned into a [`FontFace`] at a fixed pixel size, searching
//! local directories first, then remote fallback sources, and finally the
//! built-in bitmap face so rendering never stops for lack of a font.
//!
//! ## Memory Management
//!
//! [`OutlineFont`] stores the raw file bytes and creates a `FontRef`
//! on-demand for every query. Nothing borrows from a leaked buffer, and TTC
//! collections work by face index.

mod builtin;
mod resolver;

pub use builtin::BuiltinFont;
pub use resolver::{
    default_search_dirs, FallbackSource, FontOrigin, FontResolver, ResolvedFont, FALLBACK_SOURCES,
};

use std::fs;
use std::path::Path;

use read_fonts::{FontRef as ReadFontRef, TableProvider};
use skrifa::{
    instance::{LocationRef, Size},
    outline::{DrawSettings, OutlinePen},
    GlyphId, MetadataProvider,
};

use duaa_core::{
    error::{FontLoadError, Result},
    traits::{FontFace, OutlineSink},
};

/// A scalable font file loaded at one pixel size
pub struct OutlineFont {
    name: String,
    data: Vec<u8>,
    face_index: u32,
    size: f32,
    ascent: f32,
    units_per_em: u16,
}

impl OutlineFont {
    /// Opens a font file from disk at the given pixel size
    pub fn from_file(path: impl AsRef<Path>, size: f32) -> Result<Self> {
        let path = path.as_ref();
        let data =
            fs::read(path).map_err(|_| FontLoadError::FileNotFound(path.display().to_string()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Self::from_data(name, data, size)
    }

    /// Turns raw font bytes into a face (first face of a collection)
    pub fn from_data(name: impl Into<String>, data: Vec<u8>, size: f32) -> Result<Self> {
        Self::from_data_index(name, data, 0, size)
    }

    /// Turns raw font bytes into a specific face (for TTC collections)
    pub fn from_data_index(
        name: impl Into<String>,
        data: Vec<u8>,
        face_index: u32,
        size: f32,
    ) -> Result<Self> {
        if !(size.is_finite() && size > 0.0) {
            return Err(FontLoadError::InvalidSize(size).into());
        }

        // Validate the font data by attempting to parse it
        let font_ref =
            ReadFontRef::from_index(&data, face_index).map_err(|_| FontLoadError::InvalidData)?;
        // A face without a character map cannot draw text at all
        font_ref.cmap().map_err(|_| FontLoadError::InvalidData)?;

        let units_per_em = font_ref
            .head()
            .map(|head| head.units_per_em())
            .unwrap_or(1000);

        let ascent = skrifa::FontRef::from_index(&data, face_index)
            .map(|font| font.metrics(Size::new(size), LocationRef::default()).ascent)
            .unwrap_or(size * 0.8);

        Ok(Self {
            name: name.into(),
            data,
            face_index,
            size,
            ascent,
            units_per_em,
        })
    }

    /// Returns the face index for TTC collections (0 for single fonts)
    pub fn face_index(&self) -> u32 {
        self.face_index
    }

    pub fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    /// Creates a FontRef on-demand for parsing operations
    fn font_ref(&self) -> Option<skrifa::FontRef<'_>> {
        skrifa::FontRef::from_index(&self.data, self.face_index).ok()
    }

    fn glyph_id(font: &skrifa::FontRef<'_>, ch: char) -> GlyphId {
        font.charmap().map(ch).unwrap_or(GlyphId::NOTDEF)
    }
}

impl FontFace for OutlineFont {
    fn name(&self) -> &str {
        &self.name
    }

    fn size(&self) -> f32 {
        self.size
    }

    fn ascent(&self) -> f32 {
        self.ascent
    }

    fn has_glyph(&self, ch: char) -> bool {
        self.font_ref()
            .and_then(|font| font.charmap().map(ch))
            .is_some_and(|gid| gid != GlyphId::NOTDEF)
    }

    fn advance(&self, ch: char) -> f32 {
        self.font_ref()
            .and_then(|font| {
                let gid = Self::glyph_id(&font, ch);
                font.glyph_metrics(Size::new(self.size), LocationRef::default())
                    .advance_width(gid)
            })
            .unwrap_or(0.0)
    }

    fn measure(&self, text: &str) -> f32 {
        let Some(font) = self.font_ref() else {
            return 0.0;
        };
        let charmap = font.charmap();
        let metrics = font.glyph_metrics(Size::new(self.size), LocationRef::default());
        text.chars()
            .map(|ch| {
                let gid = charmap.map(ch).unwrap_or(GlyphId::NOTDEF);
                metrics.advance_width(gid).unwrap_or(0.0)
            })
            .sum()
    }

    fn draw(&self, text: &str, origin: (f32, f32), sink: &mut dyn OutlineSink) {
        let Some(font) = self.font_ref() else {
            return;
        };

        let size = Size::new(self.size);
        let charmap = font.charmap();
        let metrics = font.glyph_metrics(size, LocationRef::default());
        let outlines = font.outline_glyphs();
        let baseline = origin.1 + self.ascent;
        let mut pen_x = origin.0;

        for ch in text.chars() {
            let gid = charmap.map(ch).unwrap_or(GlyphId::NOTDEF);
            if let Some(glyph) = outlines.get(gid) {
                let mut pen = SinkPen {
                    sink: &mut *sink,
                    x: pen_x,
                    baseline,
                };
                let settings = DrawSettings::unhinted(size, LocationRef::default());
                if let Err(e) = glyph.draw(settings, &mut pen) {
                    log::debug!("{}: no outline for {:?}: {}", self.name, ch, e);
                }
            }
            pen_x += metrics.advance_width(gid).unwrap_or(0.0);
        }
    }
}

/// Bridge between skrifa's outline commands and an [`OutlineSink`]
///
/// Font units arrive already scaled to pixels with y pointing up; the pen
/// moves them to the glyph's pen position and flips them onto the canvas.
struct SinkPen<'a, S: ?Sized> {
    sink: &'a mut S,
    x: f32,
    baseline: f32,
}

impl<S: OutlineSink + ?Sized> SinkPen<'_, S> {
    fn map(&self, x: f32, y: f32) -> (f32, f32) {
        (self.x + x, self.baseline - y)
    }
}

impl<S: OutlineSink + ?Sized> OutlinePen for SinkPen<'_, S> {
    fn move_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.map(x, y);
        self.sink.move_to(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.map(x, y);
        self.sink.line_to(x, y);
    }

    fn quad_to(&mut self, cx0: f32, cy0: f32, x: f32, y: f32) {
        let (cx0, cy0) = self.map(cx0, cy0);
        let (x, y) = self.map(x, y);
        self.sink.quad_to(cx0, cy0, x, y);
    }

    fn curve_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32) {
        let (cx0, cy0) = self.map(cx0, cy0);
        let (cx1, cy1) = self.map(cx1, cy1);
        let (x, y) = self.map(x, y);
        self.sink.curve_to(cx0, cy0, cx1, cy1, x, y);
    }

    fn close(&mut self) {
        self.sink.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_from_garbage_data() {
        let result = OutlineFont::from_data("garbage", vec![0; 100], 32.0);
        assert!(result.is_err());
    }

    #[test]
    fn test_font_rejects_non_positive_size() {
        let result = OutlineFont::from_data("any", vec![0; 100], 0.0);
        assert!(matches!(
            result,
            Err(duaa_core::DuaaError::FontLoad(FontLoadError::InvalidSize(_)))
        ));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let result = OutlineFont::from_file("/definitely/not/here.ttf", 32.0);
        match result {
            Err(duaa_core::DuaaError::FontLoad(FontLoadError::FileNotFound(path))) => {
                assert!(path.contains("not/here.ttf"));
            }
            _ => panic!("expected FileNotFound"),
        }
    }

    #[derive(Default)]
    struct Recorder {
        points: Vec<(f32, f32)>,
        closes: usize,
    }

    impl OutlineSink for Recorder {
        fn move_to(&mut self, x: f32, y: f32) {
            self.points.push((x, y));
        }
        fn line_to(&mut self, x: f32, y: f32) {
            self.points.push((x, y));
        }
        fn quad_to(&mut self, _cx: f32, _cy: f32, x: f32, y: f32) {
            self.points.push((x, y));
        }
        fn curve_to(&mut self, _: f32, _: f32, _: f32, _: f32, x: f32, y: f32) {
            self.points.push((x, y));
        }
        fn close(&mut self) {
            self.closes += 1;
        }
    }

    #[test]
    fn test_pen_flips_onto_canvas() {
        let mut recorder = Recorder::default();
        {
            let mut pen = SinkPen {
                sink: &mut recorder,
                x: 10.0,
                baseline: 50.0,
            };
            pen.move_to(0.0, 0.0);
            pen.line_to(5.0, 20.0);
            pen.close();
        }
        assert_eq!(recorder.points, vec![(10.0, 50.0), (15.0, 30.0)]);
        assert_eq!(recorder.closes, 1);
    }
}
