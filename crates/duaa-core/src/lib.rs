//! Duaa Core: the shared vocabulary of the image pipeline
//!
//! A duaa image is produced in a fixed order:
//!
//! 1. **Compositing** - A background canvas is built (color, gradient or image)
//! 2. **Font resolution** - The requested font is found, fetched or replaced
//! 3. **Wrapping** - Logical-order text is split into lines that fit
//! 4. **Shaping** - Each line is joined and reordered into visual order
//! 5. **Rendering** - Lines, footer and logo are drawn onto the canvas
//! 6. **Export** - The canvas is encoded as PNG or JPEG and saved
//!
//! This crate holds what every stage agrees on: [`RenderConfig`] and its
//! defaults, [`Color`] and the geometry helpers, the error taxonomy, and the
//! traits at the seams ([`traits::FontFace`], [`traits::Fetcher`],
//! [`traits::Generator`]).

pub mod color;
pub mod config;
pub mod dirs;
pub mod error;
pub mod geometry;
pub mod request;
pub mod traits;

pub use color::{Color, GradientDirection, LinearGradient};
pub use config::{
    FormatPreset, LogoPosition, MergeReport, OutputFormat, RenderConfig, TextAlign,
};
pub use dirs::Directories;
pub use error::{DuaaError, Result};
pub use request::{artifact_file_name, sanitize_output_name, RenderRequest};
pub use traits::{FontFace, Fetcher, GenerationReport, Generator, OutlineSink};

/// Data that flows between stages
pub mod types {
    /// One wrapped line after shaping, ready to draw
    #[derive(Debug, Clone, PartialEq)]
    pub struct ShapedLine {
        /// Visual-order text with contextual forms applied
        pub text: String,
        /// Advance width of `text` in the font it will be drawn with
        pub width: f32,
    }
}
