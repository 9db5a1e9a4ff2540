// this_file: crates/duaa-jobs/src/security.rs

//! Input limits and download-name checks

/// Maximum accepted duaa text length, in bytes
pub const MAX_TEXT_LENGTH: usize = 10_000;

/// Validation errors.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SecurityError {
    #[error("Text too long: {len} bytes (max: {max})")]
    TextTooLong { len: usize, max: usize },

    #[error("Invalid file name: {0}")]
    InvalidFileName(String),
}

/// Validate text input length.
pub fn validate_text_input(text: &str) -> Result<(), SecurityError> {
    if text.len() > MAX_TEXT_LENGTH {
        return Err(SecurityError::TextTooLong {
            len: text.len(),
            max: MAX_TEXT_LENGTH,
        });
    }
    Ok(())
}

/// A download reference must name a file directly inside the outputs
/// directory: no separators, no parent or current directory markers.
pub fn validate_artifact_name(name: &str) -> Result<(), SecurityError> {
    let invalid = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\', '\0'])
        || name.starts_with('~');
    if invalid {
        return Err(SecurityError::InvalidFileName(name.to_string()));
    }
    Ok(())
}
