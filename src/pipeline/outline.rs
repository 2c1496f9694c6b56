//! PDF to outline record.

use std::fs;
use std::path::Path;

use crate::detect::InputKind;
use crate::error::Result;
use crate::model::OutlineResult;
use crate::outline::{OutlineBuilder, OutlineOptions};
use crate::parser::{ExtractOptions, TextSource};
use crate::render::validate_outline;

use super::{file_stem, BatchJob};

/// Extracts a title and heading outline from each PDF.
pub struct OutlinePipeline {
    source: TextSource,
    builder: OutlineBuilder,
}

impl OutlinePipeline {
    /// Create a pipeline reading positioned and plain lines.
    pub fn new() -> Self {
        Self {
            source: TextSource::new(ExtractOptions::default()),
            builder: OutlineBuilder::new(),
        }
    }

    /// Replace the text source.
    pub fn with_source(mut self, source: TextSource) -> Self {
        self.source = source;
        self
    }

    /// Replace the outline options.
    pub fn with_options(mut self, options: OutlineOptions) -> Self {
        self.builder = OutlineBuilder::with_options(options);
        self
    }

    /// Build the outline of PDF bytes.
    pub fn process_bytes(&self, data: &[u8]) -> OutlineResult {
        let lines = self.source.text_lines(data);
        let result = self.builder.build(&lines);
        log::debug!(
            "{} lines, {} headings, title {:?}",
            lines.len(),
            result.len(),
            result.title
        );
        result
    }

    /// Build the outline of a PDF file.
    pub fn process_file(&self, path: &Path) -> Result<OutlineResult> {
        let data = fs::read(path)?;
        Ok(self.process_bytes(&data))
    }
}

impl Default for OutlinePipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl BatchJob for OutlinePipeline {
    type Record = OutlineResult;

    fn input_kind(&self) -> InputKind {
        InputKind::Pdf
    }

    fn output_name(&self, input: &Path) -> String {
        format!("{}.json", file_stem(input))
    }

    fn run(&self, input: &Path) -> Result<OutlineResult> {
        self.process_file(input)
    }

    fn degraded(&self, input: &Path) -> OutlineResult {
        OutlineResult::degraded(file_stem(input))
    }

    fn validate(&self, value: &serde_json::Value) -> Result<()> {
        validate_outline(value)
    }
}
