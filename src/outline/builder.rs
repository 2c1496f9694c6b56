//! Outline assembly: classify, dedup, sort and truncate.

use std::collections::HashSet;

use crate::model::{HeadingEntry, OutlineResult, TextLine};

use super::classifier::HeadingClassifier;
use super::title::TitleResolver;

/// Options for building an outline.
#[derive(Debug, Clone)]
pub struct OutlineOptions {
    /// Maximum number of headings kept after sorting
    pub max_entries: usize,

    /// Number of leading lines scanned for a title
    pub title_scan_lines: usize,

    /// Last page considered for the title
    pub title_max_page: u32,
}

impl OutlineOptions {
    /// Create new outline options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of headings.
    pub fn with_max_entries(mut self, max: usize) -> Self {
        self.max_entries = max;
        self
    }

    /// Set the title scan window.
    pub fn with_title_window(mut self, lines: usize, max_page: u32) -> Self {
        self.title_scan_lines = lines;
        self.title_max_page = max_page;
        self
    }
}

impl Default for OutlineOptions {
    fn default() -> Self {
        Self {
            max_entries: 50,
            title_scan_lines: 50,
            title_max_page: 3,
        }
    }
}

/// Builds an [`OutlineResult`] from a document's lines.
#[derive(Debug, Clone, Default)]
pub struct OutlineBuilder {
    classifier: HeadingClassifier,
    options: OutlineOptions,
}

impl OutlineBuilder {
    /// Create a builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder with custom options.
    pub fn with_options(options: OutlineOptions) -> Self {
        Self {
            classifier: HeadingClassifier::new(),
            options,
        }
    }

    /// The classifier used for each line.
    pub fn classifier(&self) -> &HeadingClassifier {
        &self.classifier
    }

    /// Build the outline record for one document.
    pub fn build(&self, lines: &[TextLine]) -> OutlineResult {
        let title = TitleResolver::new(self.options.title_scan_lines, self.options.title_max_page)
            .resolve(lines);

        OutlineResult {
            title,
            outline: self.headings(lines),
        }
    }

    /// Classified, deduplicated, sorted and truncated headings.
    pub fn headings(&self, lines: &[TextLine]) -> Vec<HeadingEntry> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut entries = Vec::new();

        for line in lines {
            let Some(level) = self.classifier.classify(&line.text) else {
                continue;
            };
            // first occurrence of a text wins, later duplicates are dropped
            if !seen.insert(line.text.as_str()) {
                continue;
            }
            entries.push(HeadingEntry {
                level,
                text: line.text.clone(),
                page: line.page,
            });
        }

        // sort_by_key is stable: ties keep extraction order
        entries.sort_by_key(|e| (e.page, e.level.rank()));
        entries.truncate(self.options.max_entries);

        log::debug!("Outline: {} headings from {} lines", entries.len(), lines.len());
        entries
    }
}
