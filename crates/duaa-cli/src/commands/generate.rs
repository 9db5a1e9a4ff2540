//! Generate command: one request through the job lifecycle

use std::io::{self, Read};
use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde_json::{json, Map, Value};

use duaa::jobs::JobStatus;

use crate::cli::GenerateArgs;

pub fn run(args: &GenerateArgs, root: Option<&Path>) -> Result<()> {
    let text = read_text(args)?;
    let body = request_body(args, &text)?;

    let manager = super::manager(root, 1)?;
    let receipt = manager.submit_json(&body)?;
    log::debug!("Submitted job {}", receipt.job_id);

    let job = manager.wait(&receipt.job_id, Duration::from_secs(args.timeout))?;
    println!("{}", serde_json::to_string_pretty(&job)?);

    match job.status {
        JobStatus::Completed => {
            if let Some(warning) = &job.warning {
                log::warn!("{}", warning);
            }
            if let Some(path) = &job.output_path {
                eprintln!("Saved {}", path.display());
            }
            Ok(())
        },
        JobStatus::Error => bail!(
            "Job {} failed: {}",
            job.id,
            job.error.as_deref().unwrap_or("unknown error")
        ),
        JobStatus::Processing | JobStatus::Generating => {
            bail!("Job {} still {} after {}s", job.id, job.status, args.timeout)
        },
    }
}

fn read_text(args: &GenerateArgs) -> Result<String> {
    if let Some(text) = &args.text {
        return Ok(text.clone());
    }
    if let Some(path) = &args.text_file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()));
    }
    let mut text = String::new();
    io::stdin()
        .read_to_string(&mut text)
        .context("Failed to read stdin")?;
    Ok(text)
}

/// Request body in the shape [`duaa::jobs::JobManager::submit_json`] takes:
/// the config file's options with command-line flags layered on top
pub fn request_body(args: &GenerateArgs, text: &str) -> Result<Value> {
    let mut config = match &args.config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            match serde_json::from_str::<Value>(&raw)
                .with_context(|| format!("{} is not valid JSON", path.display()))?
            {
                Value::Object(map) => map,
                _ => bail!("{} must contain a JSON object", path.display()),
            }
        },
        None => Map::new(),
    };

    if let Some(preset) = &args.preset {
        config.insert("format".into(), json!(preset));
    }
    if let Some(size) = args.font_size {
        config.insert("font_size".into(), json!(size));
    }
    if let Some(font) = &args.font {
        config.insert("font_name".into(), json!(font));
    }
    if let Some(background) = &args.background {
        config.insert("background_image".into(), json!(background));
    }
    if let Some(footer) = &args.footer {
        config.insert("add_footer".into(), json!(true));
        config.insert("footer_text".into(), json!(footer));
    }
    if let Some(format) = args.format {
        config.insert("format_output".into(), json!(format.as_str()));
    }

    let mut body = json!({ "duaa_text": text, "config": config });
    if let Some(output) = &args.output {
        body["output_name"] = json!(output);
    }
    Ok(body)
}
