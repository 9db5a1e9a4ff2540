//! CLI smoke tests
//!
//! Run the `duaa` binary for the commands that need no network:
//! `formats`, argument errors and rejected requests.

use std::process::{Command, Output};

fn duaa(root: &std::path::Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_duaa"))
        .arg("--root")
        .arg(root)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

// ============================================================================
// Formats Command Tests
// ============================================================================

#[test]
fn formats_lists_presets_and_encodings() {
    let root = tempfile::tempdir().unwrap();
    let output = duaa(root.path(), &["formats"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("instagram_square"));
    assert!(stdout.contains("1080x1920"));
    assert!(stdout.contains("image/jpeg"));
}

// ============================================================================
// Generate Command Tests
// ============================================================================

#[test]
fn blank_text_exits_with_error() {
    let root = tempfile::tempdir().unwrap();
    let output = duaa(root.path(), &["generate", "   ", "-o", "blank"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("duaa_text is required"));
    assert!(!root.path().join("outputs/blank.png").exists());
}

#[test]
fn bad_config_value_exits_with_error() {
    let root = tempfile::tempdir().unwrap();
    let config = root.path().join("config.json");
    std::fs::write(&config, r#"{"text_align": "diagonal"}"#).unwrap();

    let output = duaa(root.path(), &["generate", "ذكر", "-c", config.to_str().unwrap()]);
    assert!(!output.status.success());
}

#[test]
fn unknown_format_is_rejected_by_clap() {
    let root = tempfile::tempdir().unwrap();
    let output = duaa(root.path(), &["generate", "x", "--format", "gif"]);

    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(2));
}
