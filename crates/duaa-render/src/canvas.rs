// this_file: crates/duaa-render/src/canvas.rs

//! Moving pixels between `image` buffers and tiny-skia pixmaps

use image::{Rgb, RgbImage, RgbaImage};
use tiny_skia::{ColorU8, Pixmap};

use duaa_core::error::RenderError;

/// Opaque RGB image → pixmap
pub fn pixmap_from_rgb(image: &RgbImage) -> Result<Pixmap, RenderError> {
    let (width, height) = image.dimensions();
    let mut pixmap =
        Pixmap::new(width, height).ok_or(RenderError::PixmapCreationFailed { width, height })?;

    for (dst, src) in pixmap.data_mut().chunks_exact_mut(4).zip(image.pixels()) {
        dst.copy_from_slice(&[src[0], src[1], src[2], 255]);
    }
    Ok(pixmap)
}

/// Straight-alpha RGBA image → premultiplied pixmap
pub fn pixmap_from_rgba(image: &RgbaImage) -> Result<Pixmap, RenderError> {
    let (width, height) = image.dimensions();
    let mut pixmap =
        Pixmap::new(width, height).ok_or(RenderError::PixmapCreationFailed { width, height })?;

    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(image.pixels()) {
        *dst = ColorU8::from_rgba(src[0], src[1], src[2], src[3]).premultiply();
    }
    Ok(pixmap)
}

/// Pixmap → RGB image, dropping alpha
pub fn rgb_from_pixmap(pixmap: &Pixmap) -> RgbImage {
    let mut image = RgbImage::new(pixmap.width(), pixmap.height());
    for (dst, src) in image.pixels_mut().zip(pixmap.pixels()) {
        let color = src.demultiply();
        *dst = Rgb([color.red(), color.green(), color.blue()]);
    }
    image
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn rgb_survives_a_round_trip() {
        let mut image = RgbImage::from_pixel(3, 2, Rgb([26, 71, 42]));
        image.put_pixel(2, 1, Rgb([255, 215, 0]));

        let pixmap = pixmap_from_rgb(&image).unwrap();
        assert_eq!(rgb_from_pixmap(&pixmap), image);
    }

    #[test]
    fn rgba_is_premultiplied() {
        let image = RgbaImage::from_pixel(1, 1, Rgba([200, 100, 0, 0]));
        let pixmap = pixmap_from_rgba(&image).unwrap();
        let px = pixmap.pixels()[0];
        assert_eq!((px.red(), px.alpha()), (0, 0));
    }

    #[test]
    fn zero_sized_canvas_is_an_error() {
        let image = RgbImage::new(0, 10);
        assert!(matches!(
            pixmap_from_rgb(&image),
            Err(RenderError::PixmapCreationFailed { width: 0, height: 10 })
        ));
    }
}
