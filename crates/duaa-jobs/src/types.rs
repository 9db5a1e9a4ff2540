// this_file: crates/duaa-jobs/src/types.rs

//! Job records and the shapes returned to callers.
//!
//! Everything here serializes with the field names HTTP clients already
//! know (`duaa_text`, `download_url`, `status_url`, ...).

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;

use duaa_core::GenerationReport;

/// Characters of the submitted text kept in a job record
pub const PREVIEW_CHARS: usize = 50;
/// Progress reported once a worker has picked the job up
pub const PROGRESS_GENERATING: u8 = 30;
/// Seconds a caller should wait before the first status poll
pub const ESTIMATED_SECONDS: u32 = 5;

/// Lifecycle stage of a job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    /// Accepted, waiting for a worker
    Processing,
    /// A worker is running the pipeline
    Generating,
    Completed,
    Error,
}

impl JobStatus {
    /// `Completed` and `Error` never change again
    pub fn is_terminal(self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Error)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            JobStatus::Processing => "processing",
            JobStatus::Generating => "generating",
            JobStatus::Completed => "completed",
            JobStatus::Error => "error",
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One generation job as seen by status queries
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Job {
    pub id: String,
    pub status: JobStatus,
    pub progress: u8,
    /// First 50 characters of the submitted text
    #[serde(rename = "duaa_text")]
    pub text_preview: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub output_path: Option<PathBuf>,
    pub download_url: Option<String>,
    pub error: Option<String>,
    /// Set when the image was produced in a degraded way
    pub warning: Option<String>,
}

impl Job {
    pub fn new(id: impl Into<String>, text: &str) -> Self {
        Self {
            id: id.into(),
            status: JobStatus::Processing,
            progress: 0,
            text_preview: preview(text),
            started_at: Utc::now(),
            finished_at: None,
            output_path: None,
            download_url: None,
            error: None,
            warning: None,
        }
    }

    /// processing → generating; ignored once the job is terminal
    pub fn start_generating(&mut self) -> bool {
        if self.status != JobStatus::Processing {
            return false;
        }
        self.status = JobStatus::Generating;
        self.progress = PROGRESS_GENERATING;
        true
    }

    /// Record a finished artifact; ignored once the job is terminal
    pub fn complete(&mut self, report: &GenerationReport) -> bool {
        if self.status.is_terminal() {
            return false;
        }
        self.status = JobStatus::Completed;
        self.progress = 100;
        self.output_path = Some(report.output_path.clone());
        self.download_url = Some(download_url(&report.file_name));
        self.warning = (!report.warnings.is_empty()).then(|| report.warnings.join("; "));
        self.finished_at = Some(Utc::now());
        true
    }

    /// Record a failure; ignored once the job is terminal
    pub fn fail(&mut self, message: impl Into<String>) -> bool {
        if self.status.is_terminal() {
            return false;
        }
        self.status = JobStatus::Error;
        self.error = Some(message.into());
        self.finished_at = Some(Utc::now());
        true
    }
}

/// Returned by `submit` before any work starts
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobReceipt {
    pub success: bool,
    pub job_id: String,
    pub status: JobStatus,
    pub status_url: String,
    pub estimated_time: u32,
}

impl JobReceipt {
    pub fn accepted(job_id: &str) -> Self {
        Self {
            success: true,
            job_id: job_id.to_string(),
            status: JobStatus::Processing,
            status_url: status_url(job_id),
            estimated_time: ESTIMATED_SECONDS,
        }
    }
}

/// Job counts by state, for a health endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub version: &'static str,
    pub jobs_count: usize,
    pub processing: usize,
    pub generating: usize,
    pub completed: usize,
    pub error: usize,
    pub workers: usize,
}

pub fn status_url(job_id: &str) -> String {
    format!("/api/status/{}", job_id)
}

pub fn download_url(file_name: &str) -> String {
    format!("/api/download/{}", file_name)
}

/// First [`PREVIEW_CHARS`] characters, with `...` when truncated
pub fn preview(text: &str) -> String {
    match text.char_indices().nth(PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(warnings: Vec<String>) -> GenerationReport {
        GenerationReport {
            output_path: PathBuf::from("outputs/duaa_x.png"),
            file_name: "duaa_x.png".to_string(),
            width: 1080,
            height: 1080,
            warnings,
        }
    }

    #[test]
    fn preview_truncates_on_characters() {
        let long = "\u{0628}".repeat(60);
        let p = preview(&long);
        assert_eq!(p.chars().count(), 53);
        assert!(p.ends_with("..."));
        assert_eq!(preview("short"), "short");
        assert_eq!(preview(&"a".repeat(50)), "a".repeat(50));
    }

    #[test]
    fn lifecycle_happy_path() {
        let mut job = Job::new("1a2b3c4d", "text");
        assert_eq!((job.status, job.progress), (JobStatus::Processing, 0));

        assert!(job.start_generating());
        assert_eq!((job.status, job.progress), (JobStatus::Generating, 30));

        assert!(job.complete(&report(vec![])));
        assert_eq!(job.status, JobStatus::Completed);
        assert_eq!(job.progress, 100);
        assert_eq!(job.download_url.as_deref(), Some("/api/download/duaa_x.png"));
        assert!(job.finished_at.is_some());
        assert!(job.warning.is_none());
    }

    #[test]
    fn terminal_states_are_final() {
        let mut job = Job::new("1a2b3c4d", "text");
        job.start_generating();
        assert!(job.fail("boom"));
        let frozen = job.clone();

        assert!(!job.complete(&report(vec![])));
        assert!(!job.fail("again"));
        assert!(!job.start_generating());
        assert_eq!(job, frozen);
    }

    #[test]
    fn warnings_are_carried_over() {
        let mut job = Job::new("1a2b3c4d", "text");
        job.complete(&report(vec!["a".into(), "b".into()]));
        assert_eq!(job.warning.as_deref(), Some("a; b"));
    }

    #[test]
    fn serializes_with_wire_names() {
        let job = Job::new("1a2b3c4d", "hello");
        let value = serde_json::to_value(&job).unwrap();
        assert_eq!(value["status"], "processing");
        assert_eq!(value["duaa_text"], "hello");
        assert!(value["finished_at"].is_null());

        let receipt = serde_json::to_value(JobReceipt::accepted("1a2b3c4d")).unwrap();
        assert_eq!(receipt["status_url"], "/api/status/1a2b3c4d");
        assert_eq!(receipt["estimated_time"], 5);
    }
}
