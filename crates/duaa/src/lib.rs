//! Duaa - Arabic duaa text rendered onto shareable images
//!
//! A request flows through six stages:
//! 1. Background compositing (image, gradient or flat color)
//! 2. Font resolution (local, downloaded, or the built-in fallback)
//! 3. Line wrapping on logical-order text
//! 4. Shaping: Arabic joining and bidi reordering per line
//! 5. Rendering: text passes, footer and logo
//! 6. Export to PNG or JPEG in the outputs directory
//!
//! [`ImagePipeline`] runs the stages synchronously for one request.
//! [`jobs::JobManager`] wraps any [`Generator`] in an asynchronous job
//! lifecycle with status polling.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use duaa::{ImagePipeline, jobs::JobManager};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let pipeline = ImagePipeline::builder().build()?;
//! let manager = JobManager::from_env(Arc::new(pipeline))?;
//!
//! let receipt = manager.submit("بِسْمِ اللهِ", Default::default(), Some("bismillah"))?;
//! let job = manager.wait(&receipt.job_id, std::time::Duration::from_secs(30))?;
//! println!("{} -> {:?}", job.status, job.download_url);
//! # Ok(())
//! # }
//! ```

mod pipeline;

pub use pipeline::{ImagePipeline, ImagePipelineBuilder};

pub use duaa_core::{
    config, error, traits, Color, Directories, DuaaError, FormatPreset, GenerationReport,
    Generator, OutputFormat, RenderConfig, RenderRequest, Result,
};

pub use duaa_export as export;
pub use duaa_fetch as fetch;
pub use duaa_fontdb as fontdb;
pub use duaa_jobs as jobs;
pub use duaa_render as render;
pub use duaa_unicode as unicode;

/// Common imports for typical usage
pub mod prelude {
    pub use duaa_core::{
        error::{DuaaError, Result},
        traits::{Fetcher, FontFace, Generator},
        Color, Directories, FormatPreset, OutputFormat, RenderConfig, RenderRequest, TextAlign,
    };
    pub use duaa_jobs::{Job, JobError, JobManager, JobReceipt, JobStatus};

    pub use crate::ImagePipeline;
}
