//! Batch command implementation
//!
//! Each non-empty input line is a request body
//! (`{"duaa_text", "output_name"?, "config"?}`). All lines are submitted
//! first, then awaited; one JSON job snapshot per line goes to stdout.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde_json::{json, Value};

use duaa::jobs::{JobManager, JobStatus};

use crate::cli::BatchArgs;

/// Outcome counts for one batch run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub submitted: usize,
    pub rejected: usize,
    pub completed: usize,
    pub failed: usize,
}

pub fn run(args: &BatchArgs, root: Option<&Path>) -> Result<()> {
    let reader: Box<dyn BufRead> = match &args.input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("Failed to open {}", path.display()))?,
        )),
        None => {
            if !args.quiet {
                eprintln!("Reading requests from stdin...");
            }
            Box::new(BufReader::new(io::stdin()))
        },
    };

    let manager = super::manager(root, args.workers)?;
    let summary = process(
        &manager,
        reader,
        Duration::from_secs(args.timeout),
        &mut io::stdout().lock(),
    )?;

    if !args.quiet {
        eprintln!();
        eprintln!("Batch finished:");
        eprintln!("  Submitted: {}", summary.submitted);
        eprintln!("  Rejected:  {}", summary.rejected);
        eprintln!("  Completed: {}", summary.completed);
        eprintln!("  Failed:    {}", summary.failed);
    }
    Ok(())
}

/// Submit every line, wait for every job and write one result line each
pub fn process(
    manager: &JobManager,
    reader: impl BufRead,
    timeout: Duration,
    out: &mut impl Write,
) -> Result<BatchSummary> {
    let mut summary = BatchSummary::default();
    let mut pending = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line.context("Failed to read input")?;
        if line.trim().is_empty() {
            continue;
        }
        let line_num = index + 1;

        let submitted = serde_json::from_str::<Value>(&line)
            .map_err(|e| e.to_string())
            .and_then(|body| manager.submit_json(&body).map_err(|e| e.to_string()));
        match submitted {
            Ok(receipt) => {
                summary.submitted += 1;
                pending.push((line_num, receipt.job_id));
            },
            Err(message) => {
                log::warn!("Line {} rejected: {}", line_num, message);
                summary.rejected += 1;
                writeln!(out, "{}", json!({ "line": line_num, "success": false, "error": message }))?;
            },
        }
    }

    for (line_num, id) in pending {
        let job = manager.wait(&id, timeout)?;
        match job.status {
            JobStatus::Completed => summary.completed += 1,
            _ => summary.failed += 1,
        }
        writeln!(out, "{}", json!({ "line": line_num, "job": job }))?;
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use duaa::error::FetchError;
    use duaa::traits::Fetcher;
    use duaa::{Directories, ImagePipeline};

    struct Offline;

    impl Fetcher for Offline {
        fn fetch(&self, url: &str) -> std::result::Result<Vec<u8>, FetchError> {
            Err(FetchError::Transport {
                url: url.to_string(),
                message: "offline".to_string(),
            })
        }
    }

    fn offline_manager(root: &Path) -> JobManager {
        let pipeline = ImagePipeline::builder()
            .directories(Directories::under(root))
            .fetcher(Arc::new(Offline))
            .font_search_dirs(Vec::new())
            .fallback_fonts(Vec::new())
            .build()
            .unwrap();
        JobManager::new(Arc::new(pipeline), 2).unwrap()
    }

    #[test]
    fn mixed_batch_reports_every_line() {
        let root = tempfile::tempdir().unwrap();
        let manager = offline_manager(root.path());
        let input = concat!(
            r#"{"duaa_text": "ABC", "output_name": "first", "config": {"format": "custom", "width": 200, "height": 120, "font_size": 16}}"#,
            "\n\n",
            "not json\n",
            r#"{"duaa_text": "   "}"#,
            "\n",
            r#"{"duaa_text": "XYZ", "output_name": "second", "config": {"format": "custom", "width": 200, "height": 120, "font_size": 16}}"#,
            "\n",
        );

        let mut out = Vec::new();
        let summary = process(&manager, input.as_bytes(), Duration::from_secs(60), &mut out).unwrap();

        assert_eq!(
            summary,
            BatchSummary {
                submitted: 2,
                rejected: 2,
                completed: 2,
                failed: 0
            }
        );
        assert!(root.path().join("outputs/first.png").is_file());
        assert!(root.path().join("outputs/second.png").is_file());

        let lines: Vec<Value> = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0]["line"], 3);
        assert_eq!(lines[0]["success"], false);
        assert_eq!(lines[2]["job"]["status"], "completed");
        assert_eq!(lines[3]["job"]["download_url"], "/api/download/second.png");
    }
}
