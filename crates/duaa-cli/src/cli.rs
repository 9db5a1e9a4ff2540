//! CLI argument definitions using Clap v4

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Duaa - Arabic supplications rendered as shareable images
#[derive(Parser, Debug)]
#[command(name = "duaa")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Root of the outputs/temp/backgrounds/fonts layout
    #[arg(long, global = true, env = "DUAA_HOME")]
    pub root: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render one duaa to an image file
    #[command(alias = "g")]
    Generate(GenerateArgs),

    /// List canvas presets and output formats
    #[command(alias = "f")]
    Formats,

    /// Run many requests from a JSON-lines file
    Batch(BatchArgs),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ImageFormat {
    Png,
    Jpeg,
}

impl ImageFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpeg",
        }
    }
}

/// Arguments for the generate command
#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// Duaa text (reads from stdin if omitted)
    pub text: Option<String>,

    /// Read the duaa text from a file
    #[arg(short = 'T', long = "text-file", conflicts_with = "text")]
    pub text_file: Option<PathBuf>,

    /// Artifact name, without extension
    #[arg(short, long)]
    pub output: Option<String>,

    /// JSON file with render options; flags below override it
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Canvas preset, see `duaa formats`
    #[arg(short = 'p', long = "preset")]
    pub preset: Option<String>,

    /// Text size in pixels
    #[arg(short = 's', long = "font-size")]
    pub font_size: Option<u32>,

    /// Font file name, looked up in the fonts directory and system folders
    #[arg(long = "font")]
    pub font: Option<String>,

    /// Background image: file under the backgrounds directory, or http(s) URL
    #[arg(short, long)]
    pub background: Option<String>,

    /// Footer line drawn near the bottom edge
    #[arg(long)]
    pub footer: Option<String>,

    /// Output encoding
    #[arg(long = "format", value_enum)]
    pub format: Option<ImageFormat>,

    /// Seconds to wait for the job to finish
    #[arg(long, default_value = "60")]
    pub timeout: u64,
}

/// Arguments for the batch command
#[derive(Parser, Debug)]
pub struct BatchArgs {
    /// JSON-lines input, one request body per line (stdin if omitted)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Worker threads; 0 uses DUAA_WORKERS or the CPU count
    #[arg(short = 'j', long, default_value = "0")]
    pub workers: usize,

    /// Seconds to wait for each job to finish
    #[arg(long, default_value = "120")]
    pub timeout: u64,

    /// Suppress the summary on stderr
    #[arg(short, long)]
    pub quiet: bool,
}
