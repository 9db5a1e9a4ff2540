// this_file: crates/duaa-jobs/src/lib.rs

//! Asynchronous generation jobs.
//!
//! [`JobManager::submit`] validates a request, records a job and returns a
//! receipt immediately; a bounded worker pool runs the [`Generator`] and
//! moves the job through `processing → generating → completed | error`.
//! Status queries hand out cloned snapshots, so callers never hold a lock
//! on the job table.

pub mod security;
pub mod types;

pub use security::{validate_artifact_name, validate_text_input, SecurityError, MAX_TEXT_LENGTH};
pub use types::*;

use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::{mapref::entry::Entry, DashMap};
use rayon::{ThreadPool, ThreadPoolBuilder};
use serde_json::Value;

use duaa_core::{error::ConfigError, Generator, RenderConfig, RenderRequest};

/// Environment variable overriding the worker count
pub const WORKERS_ENV: &str = "DUAA_WORKERS";

/// Why a job request or lookup was refused
#[derive(Debug, thiserror::Error)]
pub enum JobError {
    /// Rejected before any job was created
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Rejected before any job was created: the config did not merge
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Worker pool unavailable: {0}")]
    Pool(String),
}

impl JobError {
    /// Client mistakes, as opposed to missing records or server faults
    pub fn is_validation(&self) -> bool {
        matches!(self, JobError::Validation(_) | JobError::Config(_))
    }
}

impl From<SecurityError> for JobError {
    fn from(err: SecurityError) -> Self {
        JobError::Validation(err.to_string())
    }
}

/// Owns the job table and the worker pool
pub struct JobManager {
    generator: Arc<dyn Generator>,
    jobs: Arc<DashMap<String, Job>>,
    pool: ThreadPool,
}

impl JobManager {
    /// `workers == 0` means one worker per CPU
    pub fn new(generator: Arc<dyn Generator>, workers: usize) -> Result<Self, JobError> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("duaa-worker-{}", i))
            .build()
            .map_err(|e| JobError::Pool(e.to_string()))?;

        log::debug!("Job manager started with {} worker(s)", pool.current_num_threads());
        Ok(Self {
            generator,
            jobs: Arc::new(DashMap::new()),
            pool,
        })
    }

    /// Worker count from `DUAA_WORKERS`, defaulting to the CPU count
    pub fn from_env(generator: Arc<dyn Generator>) -> Result<Self, JobError> {
        Self::new(generator, workers_from_env())
    }

    pub fn workers(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Validate, record and schedule one job.
    ///
    /// `output_name` defaults to `duaa_{id}`. Returns as soon as the job is
    /// queued; poll [`JobManager::status`] for progress.
    pub fn submit(
        &self,
        text: &str,
        config: RenderConfig,
        output_name: Option<&str>,
    ) -> Result<JobReceipt, JobError> {
        if duaa_unicode::normalize(text).is_empty() {
            return Err(JobError::Validation("duaa_text is required".to_string()));
        }
        validate_text_input(text)?;

        let id = self.insert_job(text);
        let fallback = format!("duaa_{}", id);
        let request = RenderRequest::new(
            text,
            config,
            output_name.unwrap_or(&fallback),
            &fallback,
        );

        let jobs = Arc::clone(&self.jobs);
        let generator = Arc::clone(&self.generator);
        let job_id = id.clone();
        self.pool
            .spawn(move || run_job(&jobs, generator.as_ref(), &job_id, &request));

        log::info!("Job {} started", id);
        Ok(JobReceipt::accepted(&id))
    }

    /// Submit from a request body: `{"duaa_text", "output_name"?, "config"?}`
    pub fn submit_json(&self, body: &Value) -> Result<JobReceipt, JobError> {
        let Some(body) = body.as_object() else {
            return Err(JobError::Validation("a JSON object body is required".to_string()));
        };
        let text = body
            .get("duaa_text")
            .and_then(Value::as_str)
            .ok_or_else(|| JobError::Validation("duaa_text is required".to_string()))?;
        let output_name = body.get("output_name").and_then(Value::as_str);

        let config = match body.get("config") {
            None | Some(Value::Null) => RenderConfig::default(),
            Some(value) => {
                let (config, report) = RenderConfig::from_json(value)?;
                if !report.ignored.is_empty() {
                    log::debug!("Ignored config keys: {}", report.ignored.join(", "));
                }
                config
            }
        };

        self.submit(text, config, output_name)
    }

    /// Snapshot of one job
    pub fn status(&self, id: &str) -> Result<Job, JobError> {
        self.jobs
            .get(id)
            .map(|job| job.value().clone())
            .ok_or_else(|| JobError::NotFound(format!("job {}", id)))
    }

    /// Path of a finished artifact by its download file name
    pub fn artifact(&self, file_name: &str) -> Result<PathBuf, JobError> {
        validate_artifact_name(file_name)
            .map_err(|_| JobError::NotFound(format!("file {}", file_name)))?;

        let path = self.generator.output_dir().join(file_name);
        if path.is_file() {
            Ok(path)
        } else {
            Err(JobError::NotFound(format!("file {}", file_name)))
        }
    }

    pub fn health(&self) -> HealthReport {
        let mut report = HealthReport {
            status: "healthy",
            version: env!("CARGO_PKG_VERSION"),
            workers: self.workers(),
            ..HealthReport::default()
        };
        for job in self.jobs.iter() {
            report.jobs_count += 1;
            match job.status {
                JobStatus::Processing => report.processing += 1,
                JobStatus::Generating => report.generating += 1,
                JobStatus::Completed => report.completed += 1,
                JobStatus::Error => report.error += 1,
            }
        }
        report
    }

    /// Poll until the job is terminal or `timeout` passes; returns the last
    /// snapshot either way
    pub fn wait(&self, id: &str, timeout: Duration) -> Result<Job, JobError> {
        let deadline = Instant::now() + timeout;
        loop {
            let job = self.status(id)?;
            if job.status.is_terminal() || Instant::now() >= deadline {
                return Ok(job);
            }
            std::thread::sleep(Duration::from_millis(10));
        }
    }

    /// Snapshots of every job, oldest first
    pub fn jobs(&self) -> Vec<Job> {
        let mut all: Vec<Job> = self.jobs.iter().map(|job| job.value().clone()).collect();
        all.sort_by(|a, b| a.started_at.cmp(&b.started_at).then_with(|| a.id.cmp(&b.id)));
        all
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Claim a fresh 8-character id and record the job under it
    fn insert_job(&self, text: &str) -> String {
        loop {
            let id = new_job_id();
            if let Entry::Vacant(slot) = self.jobs.entry(id.clone()) {
                slot.insert(Job::new(id.clone(), text));
                return id;
            }
            log::debug!("Job id {} already taken, drawing another", id);
        }
    }
}

/// First 8 hex characters of a v4 UUID
pub fn new_job_id() -> String {
    let mut id = uuid::Uuid::new_v4().simple().to_string();
    id.truncate(8);
    id
}

fn workers_from_env() -> usize {
    match std::env::var(WORKERS_ENV) {
        Ok(raw) => match raw.trim().parse::<usize>() {
            Ok(n) => n,
            Err(_) => {
                log::warn!("Ignoring {}={:?}, using one worker per CPU", WORKERS_ENV, raw);
                0
            }
        },
        Err(_) => 0,
    }
}

fn update(jobs: &DashMap<String, Job>, id: &str, apply: impl FnOnce(&mut Job) -> bool) {
    match jobs.get_mut(id) {
        Some(mut job) => {
            if !apply(&mut *job) {
                log::warn!("Job {} is already {}, transition ignored", id, job.status);
            }
        }
        None => log::warn!("Job {} vanished from the table", id),
    }
}

/// Worker body. Never unwinds: panics inside the generator become job errors.
fn run_job(jobs: &DashMap<String, Job>, generator: &dyn Generator, id: &str, request: &RenderRequest) {
    update(jobs, id, Job::start_generating);

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| generator.generate(request)));
    match outcome {
        Ok(Ok(report)) => {
            if let Some(first) = report.warnings.first() {
                log::warn!("Job {} degraded: {}", id, first);
            }
            update(jobs, id, |job| job.complete(&report));
            log::info!("Job {} completed: {}", id, report.output_path.display());
        }
        Ok(Err(e)) => {
            log::error!("Job {} failed: {}", id, e);
            update(jobs, id, |job| job.fail(e.to_string()));
        }
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            log::error!("Job {} panicked: {}", id, message);
            update(jobs, id, |job| job.fail(format!("internal error: {}", message)));
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_ids_are_short_hex() {
        let id = new_job_id();
        assert_eq!(id.len(), 8);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn panic_payloads_are_readable() {
        let boxed: Box<dyn std::any::Any + Send> = Box::new("static message");
        assert_eq!(panic_message(boxed.as_ref()), "static message");
        let boxed: Box<dyn std::any::Any + Send> = Box::new(String::from("owned"));
        assert_eq!(panic_message(boxed.as_ref()), "owned");
        let boxed: Box<dyn std::any::Any + Send> = Box::new(42u8);
        assert_eq!(panic_message(boxed.as_ref()), "unknown panic");
    }

    #[test]
    fn validation_errors_are_classified() {
        assert!(JobError::Validation("x".into()).is_validation());
        assert!(JobError::Config(ConfigError::NotAnObject).is_validation());
        assert!(!JobError::NotFound("x".into()).is_validation());
    }
}
