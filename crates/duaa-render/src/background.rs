// this_file: crates/duaa-render/src/background.rs

//! The first stage of every image: a canvas-sized background
//!
//! Sources, in priority order: a remote or local image, a two-color gradient,
//! the solid background color. An image that cannot be fetched or decoded is
//! never fatal; the solid color stands in and a warning is recorded.

use std::io::Write;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use image::{imageops, imageops::FilterType, DynamicImage, ImageReader, Rgb, RgbImage};

use duaa_core::{
    config::MAX_BORDER_WIDTH,
    error::{RenderError, Result},
    geometry::{center_crop, cover_size},
    traits::Fetcher,
    Color, DuaaError, LinearGradient, RenderConfig,
};

/// A composed background and any notices raised while building it
#[derive(Debug, Clone)]
pub struct Background {
    pub image: RgbImage,
    pub warnings: Vec<String>,
}

/// Builds backgrounds from images, gradients or flat colors
pub struct BackgroundCompositor {
    fetcher: Arc<dyn Fetcher>,
    temp_dir: PathBuf,
    backgrounds_dir: PathBuf,
}

impl BackgroundCompositor {
    pub fn new(
        fetcher: Arc<dyn Fetcher>,
        temp_dir: impl Into<PathBuf>,
        backgrounds_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            fetcher,
            temp_dir: temp_dir.into(),
            backgrounds_dir: backgrounds_dir.into(),
        }
    }

    pub fn compose(&self, config: &RenderConfig) -> Result<Background> {
        let (width, height) = config.checked_dimensions()?;

        let mut warnings = Vec::new();
        let mut image = match config.background_image.as_deref() {
            Some(source) => match self.acquire(source) {
                Ok(acquired) => {
                    log::debug!(
                        "Background {} is {}x{}",
                        source,
                        acquired.width(),
                        acquired.height()
                    );
                    let mut image = cover(&acquired, (width, height));
                    if config.background_blur > 0.0 {
                        image = imageops::blur(&image, config.background_blur);
                    }
                    if config.background_overlay {
                        darken(&mut image, config.overlay_opacity);
                    }
                    image
                }
                Err(e) => {
                    let notice = format!(
                        "Background '{}' unavailable ({}); used background color {}",
                        source, e, config.background_color
                    );
                    log::warn!("{}", notice);
                    warnings.push(notice);
                    solid(width, height, config.background_color)
                }
            },
            None => match config.background_gradient {
                Some((start, end)) => create_gradient_background(
                    width,
                    height,
                    &LinearGradient::new(start, end, config.gradient_direction),
                ),
                None => solid(width, height, config.background_color),
            },
        };

        if config.add_border && config.border_width > 0 {
            image = add_border(&image, config.border_width, config.border_color);
        }

        Ok(Background { image, warnings })
    }

    fn acquire(&self, source: &str) -> Result<DynamicImage> {
        if is_remote(source) {
            self.acquire_remote(source)
        } else {
            self.acquire_local(source)
        }
    }

    /// Download into a scratch file that is removed when it goes out of scope
    fn acquire_remote(&self, url: &str) -> Result<DynamicImage> {
        let bytes = self.fetcher.fetch(url)?;

        std::fs::create_dir_all(&self.temp_dir)?;
        let mut scratch = tempfile::Builder::new()
            .prefix("bg_")
            .tempfile_in(&self.temp_dir)?;
        scratch.write_all(&bytes)?;
        scratch.flush()?;

        decode(scratch.path())
    }

    fn acquire_local(&self, name: &str) -> Result<DynamicImage> {
        let relative = Path::new(name);
        if !relative.components().all(|c| matches!(c, Component::Normal(_))) {
            return Err(DuaaError::Other(format!(
                "'{}' is outside the backgrounds directory",
                name
            )));
        }

        let path = self.backgrounds_dir.join(relative);
        if !path.is_file() {
            return Err(DuaaError::Other(format!("{} not found", path.display())));
        }
        decode(&path)
    }
}

/// Anything addressed over HTTP(S) is fetched, everything else is a local file
pub fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

pub(crate) fn decode(path: &Path) -> Result<DynamicImage> {
    let image = ImageReader::open(path)?
        .with_guessed_format()?
        .decode()
        .map_err(|e| RenderError::DecodeFailed(e.to_string()))?;
    Ok(image)
}

pub fn solid(width: u32, height: u32, color: Color) -> RgbImage {
    RgbImage::from_pixel(width, height, Rgb(color.to_rgb()))
}

/// One color per row (vertical) or per column (horizontal)
pub fn create_gradient_background(width: u32, height: u32, gradient: &LinearGradient) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb(gradient.sample_at(x, y, width, height).to_rgb())
    })
}

/// Resize to cover `target` with Lanczos3, then crop the center
pub fn cover(image: &DynamicImage, target: (u32, u32)) -> RgbImage {
    let rgb = image.to_rgb8();
    let (width, height) = cover_size(rgb.dimensions(), target);
    let resized = if (width, height) == rgb.dimensions() {
        rgb
    } else {
        imageops::resize(&rgb, width, height, FilterType::Lanczos3)
    };

    let crop = center_crop(resized.dimensions(), target);
    imageops::crop_imm(&resized, crop.x, crop.y, crop.width, crop.height).to_image()
}

/// Composite black at `opacity` over every pixel
pub fn darken(image: &mut RgbImage, opacity: f32) {
    let alpha = (255.0 * opacity.clamp(0.0, 1.0)) as u32;
    let keep = 255 - alpha;
    for pixel in image.pixels_mut() {
        for channel in pixel.0.iter_mut() {
            *channel = ((*channel as u32 * keep + 127) / 255) as u8;
        }
    }
}

/// Frame the image with `border` pixels of `color`, then scale the framed
/// image back to the original size. Content shrinks along with the frame.
///
/// `border` is clamped to [`MAX_BORDER_WIDTH`]; a frame whose size would not
/// fit in `u32` leaves the image unframed.
pub fn add_border(image: &RgbImage, border: u32, color: Color) -> RgbImage {
    let (width, height) = image.dimensions();
    let border = border.min(MAX_BORDER_WIDTH);
    let framed_size = border
        .checked_mul(2)
        .and_then(|both| Some((width.checked_add(both)?, height.checked_add(both)?)));
    let Some((framed_width, framed_height)) = framed_size else {
        log::warn!("Border of {}px does not fit a {}x{} image, skipped", border, width, height);
        return image.clone();
    };

    let mut framed = solid(framed_width, framed_height, color);
    imageops::replace(&mut framed, image, i64::from(border), i64::from(border));
    imageops::resize(&framed, width, height, FilterType::Lanczos3)
}
