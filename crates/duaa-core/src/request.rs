//! Render requests and artifact naming

use crate::config::{OutputFormat, RenderConfig};

/// Longest artifact stem kept after sanitizing
pub const MAX_OUTPUT_NAME_LEN: usize = 100;

/// One immutable unit of work: text, options and where the result goes
#[derive(Debug, Clone, PartialEq)]
pub struct RenderRequest {
    pub text: String,
    pub config: RenderConfig,
    output_name: String,
}

impl RenderRequest {
    /// Build a request, sanitizing `output_name` before it can reach the
    /// filesystem. A name that sanitizes to nothing becomes `fallback_name`.
    pub fn new(
        text: impl Into<String>,
        config: RenderConfig,
        output_name: &str,
        fallback_name: &str,
    ) -> Self {
        let mut name = sanitize_output_name(output_name);
        if name.is_empty() {
            name = sanitize_output_name(fallback_name);
        }
        Self {
            text: text.into(),
            config,
            output_name: name,
        }
    }

    /// Sanitized artifact stem, without extension
    pub fn output_name(&self) -> &str {
        &self.output_name
    }

    /// `{name}.{png|jpg}` for the configured output format
    pub fn artifact_file_name(&self) -> String {
        artifact_file_name(&self.output_name, self.config.format_output)
    }
}

/// Reduce a user-supplied name to a safe file stem.
///
/// A trailing image extension is dropped, spaces become `_`, colons become
/// `-`, everything outside `[A-Za-z0-9_.-]` is removed and the result is
/// capped at [`MAX_OUTPUT_NAME_LEN`] characters.
pub fn sanitize_output_name(name: &str) -> String {
    let lower = name.to_ascii_lowercase();
    let stem = [".png", ".jpg", ".jpeg"]
        .iter()
        .find(|ext| lower.ends_with(*ext))
        .map(|ext| &name[..name.len() - ext.len()])
        .unwrap_or(name);

    stem.chars()
        .filter_map(|c| match c {
            ' ' => Some('_'),
            ':' => Some('-'),
            c if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') => Some(c),
            _ => None,
        })
        .take(MAX_OUTPUT_NAME_LEN)
        .collect()
}

/// Artifact file name for a sanitized stem
pub fn artifact_file_name(stem: &str, format: OutputFormat) -> String {
    format!("{}.{}", stem, format.extension())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_matches_download_rules() {
        assert_eq!(sanitize_output_name("my duaa: morning.png"), "my_duaa-_morning");
        assert_eq!(sanitize_output_name("../../etc/passwd"), "....etcpasswd");
        assert_eq!(sanitize_output_name("دعاء"), "");
        assert_eq!(sanitize_output_name("photo.JPEG"), "photo");
    }

    #[test]
    fn sanitize_truncates_long_names() {
        let long = "a".repeat(250);
        assert_eq!(sanitize_output_name(&long).len(), MAX_OUTPUT_NAME_LEN);
    }

    #[test]
    fn empty_names_use_fallback() {
        let request = RenderRequest::new("text", RenderConfig::default(), "دعاء", "duaa_ab12cd34");
        assert_eq!(request.output_name(), "duaa_ab12cd34");
        assert_eq!(request.artifact_file_name(), "duaa_ab12cd34.png");
    }

    #[test]
    fn extension_follows_output_format() {
        let mut config = RenderConfig::default();
        config.format_output = OutputFormat::Jpeg;
        let request = RenderRequest::new("text", config, "bismillah", "x");
        assert_eq!(request.artifact_file_name(), "bismillah.jpg");
    }
}
