//! Document title selection from the first lines of a document.

use crate::model::TextLine;

use super::classifier::is_upper;

/// Title used when no early line qualifies.
pub const FALLBACK_TITLE: &str = "Document Title";

/// Picks a title from the early lines of a document.
#[derive(Debug, Clone, Copy)]
pub struct TitleResolver {
    scan_lines: usize,
    max_page: u32,
}

impl TitleResolver {
    /// Create a resolver scanning `scan_lines` lines restricted to pages `<= max_page`.
    pub fn new(scan_lines: usize, max_page: u32) -> Self {
        Self {
            scan_lines,
            max_page,
        }
    }

    /// Return the first qualifying line in extraction order, or [`FALLBACK_TITLE`].
    pub fn resolve(&self, lines: &[TextLine]) -> String {
        lines
            .iter()
            .take(self.scan_lines)
            .filter(|line| line.page <= self.max_page)
            .find(|line| is_title_candidate(&line.text))
            .map(|line| line.text.clone())
            .unwrap_or_else(|| FALLBACK_TITLE.to_string())
    }
}

impl Default for TitleResolver {
    fn default() -> Self {
        Self::new(50, 3)
    }
}

fn is_title_candidate(text: &str) -> bool {
    let len = text.chars().count();
    let Some(first) = text.chars().next() else {
        return false;
    };
    len > 10 && len < 100 && first.is_uppercase() && !is_upper(text) && !first.is_ascii_digit()
}
