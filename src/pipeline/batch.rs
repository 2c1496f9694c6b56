//! Directory-level batch runner.

use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::detect::discover_inputs;
use crate::error::{panic_message, Error, Result};
use crate::render::{to_json, JsonFormat};

use super::{BatchJob, CollectionPipeline, OutlinePipeline};

/// Options for a batch run.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Process items on the rayon thread pool
    pub parallel: bool,

    /// Output JSON layout
    pub json_format: JsonFormat,

    /// Check each record's shape before writing it
    pub validate: bool,
}

impl BatchOptions {
    /// Create new batch options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Process items one at a time.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Set the output JSON layout.
    pub fn with_json_format(mut self, format: JsonFormat) -> Self {
        self.json_format = format;
        self
    }

    /// Enable or disable shape validation.
    pub fn with_validate(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            parallel: true,
            json_format: JsonFormat::Pretty,
            validate: true,
        }
    }
}

/// Summary of a batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Inputs discovered and attempted
    pub processed: usize,
    /// Outputs written from a degraded record
    pub degraded: usize,
    /// Output files written, in input order
    pub outputs: Vec<PathBuf>,
}

/// Run `job` over every matching input in `input_dir`, writing one JSON file per input.
///
/// A failing item gets its degraded record and the run continues. Only the
/// absence of inputs (or an unusable output directory) fails the run.
/// `progress` is called once per finished item.
pub fn run_batch<J, P>(
    job: &J,
    input_dir: &Path,
    output_dir: &Path,
    options: &BatchOptions,
    progress: P,
) -> Result<BatchReport>
where
    J: BatchJob,
    P: Fn(&Path) + Sync,
{
    let inputs = discover_inputs(input_dir, job.input_kind())?;
    fs::create_dir_all(output_dir)?;

    let process = |input: &PathBuf| {
        let written = process_one(job, input, output_dir, options);
        progress(input.as_path());
        written
    };

    let results: Vec<Option<(PathBuf, bool)>> = if options.parallel {
        inputs.par_iter().map(process).collect()
    } else {
        inputs.iter().map(process).collect()
    };

    let mut report = BatchReport {
        processed: inputs.len(),
        ..Default::default()
    };
    for (path, degraded) in results.into_iter().flatten() {
        if degraded {
            report.degraded += 1;
        }
        report.outputs.push(path);
    }

    log::info!(
        "Wrote {} of {} outputs to {} ({} degraded)",
        report.outputs.len(),
        report.processed,
        output_dir.display(),
        report.degraded
    );
    Ok(report)
}

/// Outline every PDF in `input_dir`.
pub fn run_outline_batch<P>(
    pipeline: &OutlinePipeline,
    input_dir: &Path,
    output_dir: &Path,
    options: &BatchOptions,
    progress: P,
) -> Result<BatchReport>
where
    P: Fn(&Path) + Sync,
{
    run_batch(pipeline, input_dir, output_dir, options, progress)
}

/// Rank every collection input in `input_dir`.
pub fn run_collection_batch<P>(
    pipeline: &CollectionPipeline,
    input_dir: &Path,
    output_dir: &Path,
    options: &BatchOptions,
    progress: P,
) -> Result<BatchReport>
where
    P: Fn(&Path) + Sync,
{
    run_batch(pipeline, input_dir, output_dir, options, progress)
}

/// Process and write one item. Returns the output path and whether it was degraded.
fn process_one<J: BatchJob>(
    job: &J,
    input: &Path,
    output_dir: &Path,
    options: &BatchOptions,
) -> Option<(PathBuf, bool)> {
    let output = output_dir.join(job.output_name(input));

    let (content, degraded) = match run_guarded(job, input).and_then(|r| render(job, &r, options)) {
        Ok(content) => (content, false),
        Err(e) => {
            log::warn!(
                "Failed to process {}: {}; writing fallback output",
                input.display(),
                e
            );
            match render(job, &job.degraded(input), options) {
                Ok(content) => (content, true),
                Err(e) => {
                    log::error!("Cannot render fallback for {}: {}", input.display(), e);
                    return None;
                }
            }
        }
    };

    if let Err(e) = fs::write(&output, content) {
        log::error!("Cannot write {}: {}", output.display(), e);
        return None;
    }
    log::debug!("Wrote {}", output.display());
    Some((output, degraded))
}

/// Run one item, treating a panic as a failure of that item alone.
fn run_guarded<J: BatchJob>(job: &J, input: &Path) -> Result<J::Record> {
    panic::catch_unwind(AssertUnwindSafe(|| job.run(input)))
        .unwrap_or_else(|payload| Err(Error::Panicked(panic_message(payload.as_ref()))))
}

fn render<J: BatchJob>(job: &J, record: &J::Record, options: &BatchOptions) -> Result<String> {
    if options.validate {
        let checked = serde_json::to_value(record)
            .map_err(Into::into)
            .and_then(|value| job.validate(&value));
        if let Err(e) = checked {
            log::warn!("Output does not match expected shape: {}", e);
        }
    }
    to_json(record, options.json_format)
}
