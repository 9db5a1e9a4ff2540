//! Resize and crop arithmetic shared by the compositor and the decorators

use crate::config::LogoPosition;

/// Distance kept between a logo and the canvas edges
pub const LOGO_MARGIN: i64 = 20;

/// A pixel rectangle inside an image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Size an image must be resized to so it covers `target` entirely while
/// keeping its aspect ratio.
///
/// The smaller relative dimension matches the target exactly and the other
/// one overflows; nothing is ever letterboxed.
pub fn cover_size(source: (u32, u32), target: (u32, u32)) -> (u32, u32) {
    let (src_w, src_h) = (source.0.max(1) as f64, source.1.max(1) as f64);
    let (dst_w, dst_h) = target;
    let source_ratio = src_w / src_h;
    let target_ratio = dst_w as f64 / dst_h.max(1) as f64;

    if source_ratio > target_ratio {
        let width = (dst_h as f64 * source_ratio) as u32;
        (width.max(dst_w), dst_h)
    } else {
        let height = (dst_w as f64 / source_ratio) as u32;
        (dst_w, height.max(dst_h))
    }
}

/// Centered crop of `target` size out of an image of `size`
pub fn center_crop(size: (u32, u32), target: (u32, u32)) -> CropRect {
    let width = target.0.min(size.0);
    let height = target.1.min(size.1);
    CropRect {
        x: (size.0 - width) / 2,
        y: (size.1 - height) / 2,
        width,
        height,
    }
}

/// Size that fits inside a `bound`×`bound` box, preserving aspect ratio.
///
/// Images already inside the box keep their size; nothing is upscaled.
pub fn thumbnail_size(size: (u32, u32), bound: u32) -> (u32, u32) {
    let (width, height) = size;
    if width <= bound && height <= bound {
        return size;
    }
    let scale = (bound as f64 / width as f64).min(bound as f64 / height as f64);
    let scaled = |v: u32| ((v as f64 * scale).round() as u32).max(1);
    (scaled(width), scaled(height))
}

/// Top-left corner for an overlay of `overlay` size pinned to a canvas corner
pub fn corner_origin(canvas: (u32, u32), overlay: (u32, u32), position: LogoPosition) -> (i64, i64) {
    let right = canvas.0 as i64 - overlay.0 as i64 - LOGO_MARGIN;
    let bottom = canvas.1 as i64 - overlay.1 as i64 - LOGO_MARGIN;
    match position {
        LogoPosition::TopLeft => (LOGO_MARGIN, LOGO_MARGIN),
        LogoPosition::TopRight => (right, LOGO_MARGIN),
        LogoPosition::BottomLeft => (LOGO_MARGIN, bottom),
        LogoPosition::BottomRight => (right, bottom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cover_wide_source_matches_height() {
        assert_eq!(cover_size((2000, 1000), (1080, 1080)), (2160, 1080));
    }

    #[test]
    fn cover_tall_source_matches_width() {
        assert_eq!(cover_size((1000, 3000), (1080, 1080)), (1080, 3240));
    }

    #[test]
    fn cover_never_undershoots() {
        for source in [(333, 777), (1921, 1080), (7, 3), (1080, 1920)] {
            for target in [(1080, 1080), (1200, 630), (1000, 1500)] {
                let (w, h) = cover_size(source, target);
                assert!(w >= target.0 && h >= target.1, "{source:?} -> {target:?}");
            }
        }
    }

    #[test]
    fn crop_is_centered() {
        let rect = center_crop((2160, 1080), (1080, 1080));
        assert_eq!(rect, CropRect { x: 540, y: 0, width: 1080, height: 1080 });
    }

    #[test]
    fn thumbnail_only_shrinks() {
        assert_eq!(thumbnail_size((50, 40), 100), (50, 40));
        assert_eq!(thumbnail_size((400, 200), 100), (100, 50));
        assert_eq!(thumbnail_size((200, 400), 100), (50, 100));
    }

    #[test]
    fn corners_keep_margin() {
        let canvas = (1080, 1080);
        let logo = (100, 50);
        assert_eq!(corner_origin(canvas, logo, LogoPosition::TopLeft), (20, 20));
        assert_eq!(corner_origin(canvas, logo, LogoPosition::TopRight), (960, 20));
        assert_eq!(corner_origin(canvas, logo, LogoPosition::BottomLeft), (20, 1010));
        assert_eq!(corner_origin(canvas, logo, LogoPosition::BottomRight), (960, 1010));
    }
}
