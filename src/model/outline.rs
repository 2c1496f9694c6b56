//! Outline-level types: text lines, heading entries and the outline record.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Heading depth in the outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

impl HeadingLevel {
    /// All levels in cascade order.
    pub const ALL: [HeadingLevel; 3] = [HeadingLevel::H1, HeadingLevel::H2, HeadingLevel::H3];

    /// Sort rank: H1=1, H2=2, H3=3.
    pub fn rank(self) -> u8 {
        match self {
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
        }
    }

    /// Label used in output records.
    pub fn as_str(self) -> &'static str {
        match self {
            HeadingLevel::H1 => "H1",
            HeadingLevel::H2 => "H2",
            HeadingLevel::H3 => "H3",
        }
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single trimmed line of text with the page it came from (1-indexed).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextLine {
    pub text: String,
    pub page: u32,
}

impl TextLine {
    /// Create a new text line.
    pub fn new(text: impl Into<String>, page: u32) -> Self {
        Self {
            text: text.into(),
            page,
        }
    }
}

/// A classified heading in the outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingEntry {
    /// Heading level
    pub level: HeadingLevel,
    /// Heading text as extracted
    pub text: String,
    /// Page number (1-indexed)
    pub page: u32,
}

/// Outline record for one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineResult {
    /// Resolved document title
    pub title: String,
    /// Headings sorted by (page, level)
    pub outline: Vec<HeadingEntry>,
}

impl OutlineResult {
    /// Record written when a document could not be processed.
    pub fn degraded(name: impl Into<String>) -> Self {
        Self {
            title: name.into(),
            outline: Vec::new(),
        }
    }

    /// Number of headings in the outline.
    pub fn len(&self) -> usize {
        self.outline.len()
    }

    /// Check if no headings were found.
    pub fn is_empty(&self) -> bool {
        self.outline.is_empty()
    }
}
