//! Noise removal for excerpts taken from pages already selected as relevant.

use std::collections::HashSet;

use regex::Regex;

use crate::model::{ExtractedSection, Section, SubsectionEntry};

/// Cleans section text and keeps the substantial excerpts from relevant pages.
#[derive(Debug, Clone)]
pub struct SubsectionRefiner {
    whitespace_run: Regex,
    disallowed: Regex,
    digit_only_line: Regex,
    min_len: usize,
    max_entries: usize,
}

impl SubsectionRefiner {
    /// Create a refiner keeping texts longer than `min_len` characters, at most `max_entries`.
    pub fn new(min_len: usize, max_entries: usize) -> Self {
        Self {
            whitespace_run: Regex::new(r"\s+").unwrap(),
            disallowed: Regex::new(r"[^\w\s.,;:!?\-()]").unwrap(),
            digit_only_line: Regex::new(r"(?m)^\d+\s*$").unwrap(),
            min_len,
            max_entries,
        }
    }

    /// Collapse whitespace, strip characters outside the whitelist, drop
    /// page-number lines, and trim.
    pub fn refine(&self, text: &str) -> String {
        let text = self.whitespace_run.replace_all(text, " ");
        let text = self.disallowed.replace_all(&text, "");
        let text = self.digit_only_line.replace_all(&text, "");
        text.trim().to_string()
    }

    /// Refine every section whose page was referenced by an extracted section.
    ///
    /// Sections are visited in discovery order regardless of their own score.
    pub fn analyze(
        &self,
        sections: &[Section],
        extracted: &[ExtractedSection],
    ) -> Vec<SubsectionEntry> {
        let relevant_pages: HashSet<u32> = extracted.iter().map(|e| e.page_number).collect();

        sections
            .iter()
            .filter(|s| relevant_pages.contains(&s.page))
            .filter_map(|s| {
                let refined_text = self.refine(&s.text);
                (refined_text.chars().count() > self.min_len).then(|| SubsectionEntry {
                    document: s.document.clone(),
                    refined_text,
                    page_number: s.page,
                })
            })
            .take(self.max_entries)
            .collect()
    }
}

impl Default for SubsectionRefiner {
    fn default() -> Self {
        Self::new(50, 20)
    }
}
