// this_file: crates/duaa-fontdb/src/resolver.rs

//! Font identifier → usable face, cached by (identifier, size)
//!
//! Search order, first hit wins:
//!
//! 1. the identifier itself when it is an absolute path
//! 2. the fonts directory
//! 3. the search directories (working directory, `<exe dir>/fonts`, system
//!    font folders)
//! 4. remote fallback sources, reusing a copy already in the fonts directory
//! 5. [`BuiltinFont`], flagged as degraded

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::Mutex;

use duaa_core::traits::{Fetcher, FontFace};

use crate::{BuiltinFont, OutlineFont};

/// An Arabic-capable font that can be downloaded when nothing local works
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackSource {
    /// File name inside the fonts directory
    pub file_name: String,
    pub url: String,
}

impl FallbackSource {
    pub fn new(file_name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            url: url.into(),
        }
    }
}

/// Default remote fallbacks, tried in order
pub const FALLBACK_SOURCES: [(&str, &str); 2] = [
    (
        "Amiri-Regular.ttf",
        "https://github.com/alif-type/amiri/raw/main/Amiri-Regular.ttf",
    ),
    (
        "Scheherazade-Regular.ttf",
        "https://github.com/silnrsi/font-scheherazade/raw/master/results/Scheherazade-Regular.ttf",
    ),
];

/// Where a resolved face came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontOrigin {
    Local(PathBuf),
    Downloaded { url: String, path: PathBuf },
    Builtin,
}

impl fmt::Display for FontOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontOrigin::Local(path) => write!(f, "{}", path.display()),
            FontOrigin::Downloaded { url, .. } => write!(f, "{}", url),
            FontOrigin::Builtin => f.write_str(BuiltinFont::NAME),
        }
    }
}

/// A face ready to draw with, plus how it was obtained
#[derive(Clone)]
pub struct ResolvedFont {
    pub face: Arc<dyn FontFace>,
    pub origin: FontOrigin,
    /// The built-in face stands in: Arabic will not render
    pub degraded: bool,
}

impl ResolvedFont {
    /// Notice for job records when the output is degraded
    pub fn warning(&self, requested: &str) -> Option<String> {
        self.degraded.then(|| {
            format!(
                "No usable font for '{}'; rendered with the built-in bitmap font, which has no Arabic glyphs",
                requested
            )
        })
    }
}

impl fmt::Debug for ResolvedFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedFont")
            .field("face", &self.face.name())
            .field("size", &self.face.size())
            .field("origin", &self.origin)
            .field("degraded", &self.degraded)
            .finish()
    }
}

/// Finds, fetches and caches font faces
pub struct FontResolver {
    fonts_dir: PathBuf,
    search_dirs: Vec<PathBuf>,
    fallbacks: Vec<FallbackSource>,
    fetcher: Arc<dyn Fetcher>,
    cache: DashMap<(String, u32), ResolvedFont>,
    /// Serializes fallback downloads so parallel jobs fetch each file once
    download_lock: Mutex<()>,
}

impl FontResolver {
    /// Resolver with the default search directories and fallback sources
    pub fn new(fonts_dir: impl Into<PathBuf>, fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            fonts_dir: fonts_dir.into(),
            search_dirs: default_search_dirs(),
            fallbacks: FALLBACK_SOURCES
                .iter()
                .map(|(file, url)| FallbackSource::new(*file, *url))
                .collect(),
            fetcher,
            cache: DashMap::new(),
            download_lock: Mutex::new(()),
        }
    }

    /// Replace the directories searched after the fonts directory
    pub fn with_search_dirs(mut self, dirs: Vec<PathBuf>) -> Self {
        self.search_dirs = dirs;
        self
    }

    /// Replace the remote fallback sources
    pub fn with_fallbacks(mut self, fallbacks: Vec<FallbackSource>) -> Self {
        self.fallbacks = fallbacks;
        self
    }

    pub fn fonts_dir(&self) -> &Path {
        &self.fonts_dir
    }

    /// Number of cached (identifier, size) entries
    pub fn cached(&self) -> usize {
        self.cache.len()
    }

    /// Resolve `name` at `size` pixels. Never fails: the built-in face is the
    /// last resort and comes back with `degraded` set. Only real fonts are
    /// cached, so a fallback that was unreachable once is fetched again later.
    pub fn resolve(&self, name: &str, size: u32) -> ResolvedFont {
        let key = (name.to_string(), size);
        if let Some(hit) = self.cache.get(&key) {
            return hit.clone();
        }

        let px = size.max(1) as f32;
        let resolved = self
            .find_local(name, px)
            .or_else(|| self.find_fallback(px))
            .unwrap_or_else(|| {
                log::warn!(
                    "No font found for '{}' at {}px, using the built-in bitmap font (no Arabic)",
                    name,
                    size
                );
                ResolvedFont {
                    face: Arc::new(BuiltinFont::new(px)),
                    origin: FontOrigin::Builtin,
                    degraded: true,
                }
            });

        log::debug!("Font '{}' at {}px resolved to {}", name, size, resolved.origin);
        // Degraded results are retried on the next call
        if resolved.degraded {
            return resolved;
        }
        self.cache.entry(key).or_insert(resolved).clone()
    }

    /// Candidate paths for a local identifier, in search order
    pub fn candidates(&self, name: &str) -> Vec<PathBuf> {
        let as_path = Path::new(name);
        let mut out = Vec::with_capacity(self.search_dirs.len() + 2);
        if as_path.is_absolute() {
            out.push(as_path.to_path_buf());
        }
        out.push(self.fonts_dir.join(name));
        out.extend(self.search_dirs.iter().map(|dir| dir.join(name)));
        out
    }

    fn find_local(&self, name: &str, px: f32) -> Option<ResolvedFont> {
        if name.is_empty() {
            return None;
        }
        self.candidates(name)
            .into_iter()
            .filter(|path| path.is_file())
            .find_map(|path| load(&path, px).map(|face| local(face, path)))
    }

    fn find_fallback(&self, px: f32) -> Option<ResolvedFont> {
        let _guard = self.download_lock.lock();

        for source in &self.fallbacks {
            let path = self.fonts_dir.join(&source.file_name);
            if path.is_file() {
                if let Some(face) = load(&path, px) {
                    return Some(local(face, path));
                }
            }

            log::info!("Downloading fallback font {}", source.url);
            let bytes = match self.fetcher.fetch(&source.url) {
                Ok(bytes) => bytes,
                Err(e) => {
                    log::warn!("Fallback font {} unavailable: {}", source.file_name, e);
                    continue;
                }
            };

            let face = match OutlineFont::from_data(source.file_name.clone(), bytes.clone(), px) {
                Ok(face) => face,
                Err(e) => {
                    log::warn!("Downloaded {} is not a usable font: {}", source.url, e);
                    continue;
                }
            };

            if let Err(e) = fs::create_dir_all(&self.fonts_dir).and_then(|()| fs::write(&path, &bytes))
            {
                log::warn!("Could not keep {} in {}: {}", source.file_name, self.fonts_dir.display(), e);
            }

            return Some(ResolvedFont {
                face: Arc::new(face),
                origin: FontOrigin::Downloaded {
                    url: source.url.clone(),
                    path,
                },
                degraded: false,
            });
        }

        None
    }
}

fn load(path: &Path, px: f32) -> Option<OutlineFont> {
    match OutlineFont::from_file(path, px) {
        Ok(face) => {
            if !face.supports_arabic() {
                log::warn!("{} has no Arabic glyphs", path.display());
            }
            Some(face)
        }
        Err(e) => {
            log::warn!("Skipping unreadable font {}: {}", path.display(), e);
            None
        }
    }
}

fn local(face: OutlineFont, path: PathBuf) -> ResolvedFont {
    ResolvedFont {
        face: Arc::new(face),
        origin: FontOrigin::Local(path),
        degraded: false,
    }
}

/// Working directory, `<exe dir>/fonts` and the usual system font folders
pub fn default_search_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd);
    }
    if let Some(exe_dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        dirs.push(exe_dir.join("fonts"));
    }
    dirs.extend(
        [
            "/usr/share/fonts/truetype",
            "/usr/share/fonts",
            "/System/Library/Fonts",
            "C:/Windows/Fonts",
        ]
        .into_iter()
        .map(PathBuf::from),
    );
    dirs
}
