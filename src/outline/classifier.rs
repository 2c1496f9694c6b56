//! Text-shape heading classification.
//!
//! Classification is exclusion-first, then a strict first-match-wins cascade
//! over an ordered list of `(level, pattern)` pairs. The order of the cascade
//! is part of the behaviour: a line that fits both an H1 and an H3 shape is
//! always H1.

use regex::Regex;

use crate::model::HeadingLevel;

/// Lines with more words than this are treated as prose unless a word is upper-case.
const MAX_PROSE_WORDS: usize = 4;

/// Exclusion shapes, matched case-insensitively from the start of the line.
const EXCLUSION_PATTERNS: [&str; 8] = [
    r"^Page \d+$",
    r"^\d+$",
    r"^[A-Z\s]{1,3}$",
    r"^[a-z\s]{1,3}$",
    r"^[^\w\s]*$",
    r"^[A-Z][a-z]+\s+[a-z]+\s+[a-z]+",
    r"^[A-Z][a-z]+\s+[a-z]+\s+[a-z]+\s+[a-z]+",
    r"^[A-Z][a-z]+\s+[a-z]+\s+[a-z]+\s+[a-z]+\s+[a-z]+",
];

/// Heading cascade, evaluated top to bottom. Each pattern must match the whole line.
const CASCADE: [(HeadingLevel, &str); 10] = [
    // all-caps line
    (HeadingLevel::H1, r"^[A-Z][A-Z\s]{2,}$"),
    // "1. Title"
    (HeadingLevel::H1, r"^\d+\.\s+[A-Z][a-zA-Z\s]{3,}$"),
    // short title, 4 to 12 characters
    (HeadingLevel::H1, r"^[A-Z][a-zA-Z\s]{3,11}$"),
    (HeadingLevel::H1, r"^[A-Z][a-zA-Z\s]{2,}:$"),
    // "1.1 Title"
    (HeadingLevel::H2, r"^\d+\.\d+\s+[A-Z][a-zA-Z\s]{2,}$"),
    (HeadingLevel::H2, r"^[A-Z][a-zA-Z\s]{2,}$"),
    (HeadingLevel::H2, r"^[A-Z][a-zA-Z\s]{2,}:$"),
    // "1.1.1 Title"
    (HeadingLevel::H3, r"^\d+\.\d+\.\d+\s+[A-Z][a-zA-Z\s]{2,}$"),
    (HeadingLevel::H3, r"^[A-Z][a-zA-Z\s]{1,}$"),
    (HeadingLevel::H3, r"^[a-z][a-zA-Z\s]{2,}:$"),
];

/// Assigns a heading level to a single line of text.
///
/// Pure and stateless once built; share one instance across threads.
#[derive(Debug, Clone)]
pub struct HeadingClassifier {
    exclusions: Vec<Regex>,
    cascade: Vec<(HeadingLevel, Regex)>,
}

impl HeadingClassifier {
    /// Compile the exclusion list and the heading cascade.
    pub fn new() -> Self {
        Self {
            exclusions: EXCLUSION_PATTERNS
                .iter()
                .map(|p| Regex::new(&format!("(?i){}", p)).unwrap())
                .collect(),
            cascade: CASCADE
                .iter()
                .map(|(level, p)| (*level, Regex::new(p).unwrap()))
                .collect(),
        }
    }

    /// Classify a line. Surrounding whitespace is ignored.
    pub fn classify(&self, line: &str) -> Option<HeadingLevel> {
        let text = line.trim();

        if self.is_excluded(text) {
            return None;
        }

        if is_long_prose(text) {
            return None;
        }

        self.cascade
            .iter()
            .find(|(_, pattern)| pattern.is_match(text))
            .map(|(level, _)| *level)
    }

    /// Whether the line matches any exclusion shape.
    pub fn is_excluded(&self, text: &str) -> bool {
        self.exclusions.iter().any(|re| re.is_match(text))
    }

    /// The cascade in evaluation order, as `(level, pattern)` pairs.
    pub fn cascade(&self) -> impl Iterator<Item = (HeadingLevel, &str)> {
        self.cascade.iter().map(|(level, re)| (*level, re.as_str()))
    }
}

impl Default for HeadingClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// More than four words and none of them fully upper-case.
fn is_long_prose(text: &str) -> bool {
    let words: Vec<&str> = text.split_whitespace().collect();
    words.len() > MAX_PROSE_WORDS && !words.iter().any(|w| is_upper(w))
}

/// True when the string has at least one cased character and no lower-case ones.
pub(crate) fn is_upper(s: &str) -> bool {
    let mut cased = false;
    for c in s.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            cased = true;
        }
    }
    cased
}
