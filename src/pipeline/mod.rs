//! End-to-end pipelines from input files to output records.
//!
//! Each pipeline implements [`BatchJob`], which lets the batch runner
//! discover its inputs, process them (in parallel when asked), and fall back
//! to a degraded record when one item fails.
//!
//! # Example
//!
//! ```no_run
//! use docsift::pipeline::{run_outline_batch, BatchOptions, OutlinePipeline};
//! use std::path::Path;
//!
//! fn main() -> docsift::Result<()> {
//!     let report = run_outline_batch(
//!         &OutlinePipeline::new(),
//!         Path::new("input"),
//!         Path::new("output"),
//!         &BatchOptions::default(),
//!         |_| {},
//!     )?;
//!     println!("{} written, {} degraded", report.outputs.len(), report.degraded);
//!     Ok(())
//! }
//! ```

mod batch;
mod collection;
mod outline;

pub use batch::{
    run_batch, run_collection_batch, run_outline_batch, BatchOptions, BatchReport,
};
pub use collection::CollectionPipeline;
pub use outline::OutlinePipeline;

use std::path::Path;

use serde::Serialize;

use crate::detect::InputKind;
use crate::error::Result;

/// Timestamp format used in collection metadata.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Current local time in [`TIMESTAMP_FORMAT`].
pub fn timestamp() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// One kind of batch work: which files to pick up and how to turn each into a record.
pub trait BatchJob: Send + Sync {
    /// Output record type.
    type Record: Serialize;

    /// Kind of input file this job consumes.
    fn input_kind(&self) -> InputKind;

    /// Output file name for an input.
    fn output_name(&self, input: &Path) -> String;

    /// Process one input.
    fn run(&self, input: &Path) -> Result<Self::Record>;

    /// Record written when [`BatchJob::run`] fails.
    fn degraded(&self, input: &Path) -> Self::Record;

    /// Check the serialized shape of a record.
    fn validate(&self, value: &serde_json::Value) -> Result<()>;
}

/// File stem of a path as an owned string, empty when there is none.
pub(crate) fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_format() {
        let ts = timestamp();
        let parsed = chrono::NaiveDateTime::parse_from_str(&ts, TIMESTAMP_FORMAT);
        assert!(parsed.is_ok(), "unparseable timestamp {}", ts);
        // microsecond precision
        assert_eq!(ts.rsplit('.').next().map(str::len), Some(6));
    }

    #[test]
    fn test_file_stem() {
        assert_eq!(file_stem(Path::new("/in/file01.pdf")), "file01");
        assert_eq!(file_stem(Path::new("collection.v2.json")), "collection.v2");
    }
}
