//! The synchronous generator behind every job

// this_file: crates/duaa/src/pipeline.rs

use std::path::{Path, PathBuf};
use std::sync::Arc;

use duaa_core::{
    error::{RenderError, Result},
    traits::{Fetcher, GenerationReport, Generator},
    Directories, RenderRequest,
};
use duaa_export::{exporter_for, save_artifact};
use duaa_fetch::HttpFetcher;
use duaa_fontdb::{FallbackSource, FontResolver};
use duaa_render::{load_logo, render_frame, shape_footer, shape_text, BackgroundCompositor, Frame};

/// Background → fonts → wrap → shape → render → export, for one request
///
/// ```ignore
/// use duaa::ImagePipeline;
///
/// let pipeline = ImagePipeline::builder()
///     .directories(Directories::under("/srv/duaa"))
///     .build()?;
/// let report = pipeline.generate(&request)?;
/// ```
///
/// Missing fonts, unreachable backgrounds and unreadable logos degrade the
/// output instead of failing it; each one adds a line to
/// [`GenerationReport::warnings`].
pub struct ImagePipeline {
    dirs: Directories,
    fonts: FontResolver,
    backgrounds: BackgroundCompositor,
}

impl ImagePipeline {
    pub fn builder() -> ImagePipelineBuilder {
        ImagePipelineBuilder::new()
    }

    pub fn directories(&self) -> &Directories {
        &self.dirs
    }

    pub fn fonts(&self) -> &FontResolver {
        &self.fonts
    }
}

impl Generator for ImagePipeline {
    fn generate(&self, request: &RenderRequest) -> Result<GenerationReport> {
        let config = &request.config;
        let (width, height) = config.checked_dimensions()?;

        let text = duaa_unicode::normalize(&request.text);
        if text.is_empty() {
            return Err(RenderError::EmptyText.into());
        }

        let background = self.backgrounds.compose(config)?;
        let mut warnings = background.warnings;

        let body_font = self.fonts.resolve(&config.font_name, config.font_size);
        warnings.extend(body_font.warning(&config.font_name));
        let lines = shape_text(&text, body_font.face.as_ref(), config.max_text_width(width) as f32);

        let wants_footer = config.add_footer && !config.footer_text.trim().is_empty();
        let footer_font = wants_footer
            .then(|| self.fonts.resolve(&config.font_name, config.footer_font_size));
        let footer = footer_font.as_ref().and_then(|font| {
            if !body_font.degraded {
                warnings.extend(font.warning(&config.font_name));
            }
            shape_footer(&config.footer_text, font.face.as_ref())
                .map(|line| (line, font.face.as_ref()))
        });

        let logo = match (config.add_logo, config.logo_path.as_deref()) {
            (true, Some(name)) => match load_logo(&self.dirs.backgrounds, name, config.logo_size) {
                Ok(logo) => Some(logo),
                Err(e) => {
                    log::warn!("Logo skipped: {}", e);
                    warnings.push(format!("Logo '{}' could not be loaded: {}", name, e));
                    None
                },
            },
            _ => None,
        };

        let frame = Frame {
            lines: &lines,
            face: body_font.face.as_ref(),
            footer,
            logo: logo.as_ref(),
        };
        let image = render_frame(&background.image, &frame, config)?;

        let exporter = exporter_for(config.format_output, config.quality);
        let file_name = request.artifact_file_name();
        let output_path = save_artifact(&image, &self.dirs.outputs, &file_name, exporter.as_ref())?;

        log::info!(
            "Rendered {} line(s) into {} ({}x{}, {} warning(s))",
            lines.len(),
            output_path.display(),
            width,
            height,
            warnings.len()
        );
        Ok(GenerationReport {
            output_path,
            file_name,
            width,
            height,
            warnings,
        })
    }

    fn output_dir(&self) -> &Path {
        &self.dirs.outputs
    }
}

/// Configures an [`ImagePipeline`]; every setting has a working default
#[derive(Default)]
pub struct ImagePipelineBuilder {
    dirs: Option<Directories>,
    fetcher: Option<Arc<dyn Fetcher>>,
    search_dirs: Option<Vec<PathBuf>>,
    fallbacks: Option<Vec<FallbackSource>>,
}

impl ImagePipelineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Working directories; defaults to [`Directories::from_env`]
    pub fn directories(mut self, dirs: Directories) -> Self {
        self.dirs = Some(dirs);
        self
    }

    /// Source for remote backgrounds and fallback fonts; defaults to
    /// [`HttpFetcher`]
    pub fn fetcher(mut self, fetcher: Arc<dyn Fetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    /// Extra directories searched for fonts after the fonts directory
    pub fn font_search_dirs(mut self, dirs: Vec<PathBuf>) -> Self {
        self.search_dirs = Some(dirs);
        self
    }

    /// Fonts downloaded when the requested one is not installed
    pub fn fallback_fonts(mut self, fallbacks: Vec<FallbackSource>) -> Self {
        self.fallbacks = Some(fallbacks);
        self
    }

    /// Create the working directories and assemble the pipeline
    pub fn build(self) -> Result<ImagePipeline> {
        let dirs = self.dirs.unwrap_or_else(Directories::from_env);
        dirs.ensure()?;

        let fetcher: Arc<dyn Fetcher> = match self.fetcher {
            Some(fetcher) => fetcher,
            None => Arc::new(HttpFetcher::new()?),
        };

        let mut fonts = FontResolver::new(&dirs.fonts, Arc::clone(&fetcher));
        if let Some(search_dirs) = self.search_dirs {
            fonts = fonts.with_search_dirs(search_dirs);
        }
        if let Some(fallbacks) = self.fallbacks {
            fonts = fonts.with_fallbacks(fallbacks);
        }

        let backgrounds = BackgroundCompositor::new(fetcher, &dirs.temp, &dirs.backgrounds);
        log::debug!("Pipeline ready, writing to {}", dirs.outputs.display());
        Ok(ImagePipeline {
            dirs,
            fonts,
            backgrounds,
        })
    }
}
