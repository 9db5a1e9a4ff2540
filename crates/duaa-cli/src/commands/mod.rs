//! Subcommand implementations

pub mod batch;
pub mod formats;
pub mod generate;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use duaa::{jobs::JobManager, Directories, ImagePipeline};

/// Pipeline rooted at `root`, or at the environment's directories
pub fn pipeline(root: Option<&Path>) -> Result<ImagePipeline> {
    let dirs = root.map_or_else(Directories::from_env, Directories::under);
    ImagePipeline::builder()
        .directories(dirs)
        .build()
        .context("Failed to set up the image pipeline")
}

/// Job manager over [`pipeline`]; `workers == 0` honors `DUAA_WORKERS`
pub fn manager(root: Option<&Path>, workers: usize) -> Result<JobManager> {
    let pipeline = Arc::new(pipeline(root)?);
    let manager = if workers == 0 {
        JobManager::from_env(pipeline)?
    } else {
        JobManager::new(pipeline, workers)?
    };
    Ok(manager)
}
