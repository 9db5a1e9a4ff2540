//! Export module for duaa
//!
//! Encodes the finished canvas and writes it into the outputs directory.

use std::fs;
use std::path::{Path, PathBuf};

use image::RgbImage;

use duaa_core::{
    error::{ExportError, Result},
    OutputFormat,
};

pub mod jpeg;
pub mod png;

pub use jpeg::JpegExporter;
pub use png::PngExporter;

/// Turns a canvas into file bytes
pub trait Exporter: Send + Sync {
    fn name(&self) -> &'static str;

    fn export(&self, image: &RgbImage) -> Result<Vec<u8>>;

    /// File extension without the dot
    fn extension(&self) -> &'static str;

    fn mime_type(&self) -> &'static str;
}

/// Exporter for a configured output format
pub fn exporter_for(format: OutputFormat, quality: u8) -> Box<dyn Exporter> {
    match format {
        OutputFormat::Png => Box::new(PngExporter::new()),
        OutputFormat::Jpeg => Box::new(JpegExporter::new(quality)),
    }
}

/// Encode `image` and write it as `dir/file_name`, creating `dir` if needed
pub fn save_artifact(
    image: &RgbImage,
    dir: &Path,
    file_name: &str,
    exporter: &dyn Exporter,
) -> Result<PathBuf> {
    let bytes = exporter.export(image)?;
    let path = dir.join(file_name);

    let write_failed = |source: std::io::Error| ExportError::WriteFailed {
        path: path.display().to_string(),
        source,
    };
    fs::create_dir_all(dir).map_err(write_failed)?;
    fs::write(&path, &bytes).map_err(write_failed)?;

    log::debug!(
        "Wrote {} ({} bytes, {})",
        path.display(),
        bytes.len(),
        exporter.mime_type()
    );
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn exporter_matches_format() {
        assert_eq!(exporter_for(OutputFormat::Png, 95).extension(), "png");
        assert_eq!(exporter_for(OutputFormat::Jpeg, 80).extension(), "jpg");
        assert_eq!(
            exporter_for(OutputFormat::Jpeg, 80).extension(),
            OutputFormat::Jpeg.extension()
        );
    }

    #[test]
    fn saves_into_missing_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let outputs = tmp.path().join("outputs");
        let image = RgbImage::from_pixel(8, 8, Rgb([26, 71, 42]));

        let path = save_artifact(&image, &outputs, "duaa_test.png", &PngExporter::new()).unwrap();
        assert_eq!(path, outputs.join("duaa_test.png"));

        let decoded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(decoded.dimensions(), (8, 8));
        assert_eq!(decoded.get_pixel(3, 3).0, [26, 71, 42]);
    }

    #[test]
    fn write_failure_names_the_path() {
        let tmp = tempfile::tempdir().unwrap();
        // A file where the directory should be
        let blocker = tmp.path().join("outputs");
        fs::write(&blocker, b"x").unwrap();
        let image = RgbImage::new(2, 2);

        let err = save_artifact(&image, &blocker, "a.png", &PngExporter::new()).unwrap_err();
        match err {
            duaa_core::DuaaError::ExportFailed(ExportError::WriteFailed { path, .. }) => {
                assert!(path.ends_with("a.png"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
