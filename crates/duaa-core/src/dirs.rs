//! Filesystem layout used by the pipeline

use std::io;
use std::path::{Path, PathBuf};

/// The four working directories: finished artifacts, scratch downloads,
/// local background/logo images and local fonts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directories {
    pub outputs: PathBuf,
    pub temp: PathBuf,
    pub backgrounds: PathBuf,
    pub fonts: PathBuf,
}

impl Default for Directories {
    fn default() -> Self {
        Self::under(".")
    }
}

impl Directories {
    /// Standard layout below `root`
    pub fn under(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            outputs: root.join("outputs"),
            temp: root.join("temp"),
            backgrounds: root.join("backgrounds"),
            fonts: root.join("fonts"),
        }
    }

    /// Default layout with `DUAA_OUTPUT_DIR`, `DUAA_TEMP_DIR`,
    /// `DUAA_BACKGROUNDS_DIR` and `DUAA_FONTS_DIR` overrides applied.
    pub fn from_env() -> Self {
        let mut dirs = Self::default();
        let overrides: [(&str, &mut PathBuf); 4] = [
            ("DUAA_OUTPUT_DIR", &mut dirs.outputs),
            ("DUAA_TEMP_DIR", &mut dirs.temp),
            ("DUAA_BACKGROUNDS_DIR", &mut dirs.backgrounds),
            ("DUAA_FONTS_DIR", &mut dirs.fonts),
        ];
        for (var, slot) in overrides {
            if let Some(value) = std::env::var_os(var).filter(|v| !v.is_empty()) {
                log::debug!("{} overrides directory: {:?}", var, value);
                *slot = PathBuf::from(value);
            }
        }
        dirs
    }

    /// Create any missing directory
    pub fn ensure(&self) -> io::Result<()> {
        for dir in [&self.outputs, &self.temp, &self.backgrounds, &self.fonts] {
            std::fs::create_dir_all(dir)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_under_root() {
        let dirs = Directories::under("/srv/duaa");
        assert_eq!(dirs.outputs, PathBuf::from("/srv/duaa/outputs"));
        assert_eq!(dirs.fonts, PathBuf::from("/srv/duaa/fonts"));
    }

    #[test]
    fn ensure_creates_all_four() {
        let root = tempfile::tempdir().unwrap();
        let dirs = Directories::under(root.path().join("nested"));
        dirs.ensure().unwrap();
        assert!(dirs.outputs.is_dir());
        assert!(dirs.temp.is_dir());
        assert!(dirs.backgrounds.is_dir());
        assert!(dirs.fonts.is_dir());
        // Existing directories are fine
        dirs.ensure().unwrap();
    }
}
