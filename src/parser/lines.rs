//! Turning extracted pages into outline lines and collection sections.

use regex::Regex;

use crate::model::{Section, TextLine};

use super::source::PageText;

/// Trimmed, non-empty lines of every page in extraction order.
pub fn to_text_lines(pages: &[PageText]) -> Vec<TextLine> {
    pages
        .iter()
        .flat_map(|page| {
            page.lines
                .iter()
                .map(|line| line.trim())
                .filter(|line| !line.is_empty())
                .map(move |line| TextLine::new(line, page.number))
        })
        .collect()
}

/// Splits page text into chunks at blank lines and all-caps heading lines.
#[derive(Debug, Clone)]
pub struct SectionSplitter {
    boundary: Regex,
}

impl SectionSplitter {
    /// Create a new splitter.
    pub fn new() -> Self {
        Self {
            boundary: Regex::new(r"\n\s*\n|\n\s*[A-Z][A-Z\s]{2,}\n").unwrap(),
        }
    }

    /// Split one page's text into trimmed, non-empty chunks.
    pub fn split_text<'t>(&self, text: &'t str) -> Vec<&'t str> {
        self.boundary
            .split(text)
            .map(str::trim)
            .filter(|chunk| !chunk.is_empty())
            .collect()
    }

    /// Split every page into unscored sections tagged with `document`.
    pub fn split(&self, pages: &[PageText], document: &str) -> Vec<Section> {
        pages
            .iter()
            .flat_map(|page| {
                let text = page.lines.join("\n");
                self.split_text(&text)
                    .into_iter()
                    .map(|chunk| Section::new(chunk, page.number, document))
                    .collect::<Vec<_>>()
            })
            .collect()
    }
}

impl Default for SectionSplitter {
    fn default() -> Self {
        Self::new()
    }
}
