//! Section filtering, ranking and title synthesis.

use crate::model::{ExtractedSection, PersonaCategory, ScoredSection, Section};
use crate::outline::is_upper;

use super::scorer::RelevanceScorer;

/// Title used when no line of a section is usable.
pub const FALLBACK_SECTION_TITLE: &str = "Section";

/// Longest fallback title before truncation.
const MAX_FALLBACK_TITLE_CHARS: usize = 80;

/// Scores sections, drops those at or below the relevance floor, and ranks the rest.
#[derive(Debug, Clone)]
pub struct SectionExtractor {
    scorer: RelevanceScorer,
    max_sections: usize,
    min_score: f64,
}

impl SectionExtractor {
    /// Create an extractor keeping at most `max_sections` sections.
    pub fn new(max_sections: usize) -> Self {
        Self {
            scorer: RelevanceScorer::new(),
            max_sections,
            min_score: 0.1,
        }
    }

    /// Set the relevance floor. Sections scoring at or below it are discarded.
    pub fn with_min_score(mut self, min_score: f64) -> Self {
        self.min_score = min_score;
        self
    }

    /// The scorer used for each section.
    pub fn scorer(&self) -> &RelevanceScorer {
        &self.scorer
    }

    /// Score every section once and keep the ones above the floor, in discovery order.
    pub fn score_all<'a>(
        &self,
        sections: &'a [Section],
        category: PersonaCategory,
        task: &str,
    ) -> Vec<ScoredSection<'a>> {
        sections
            .iter()
            .enumerate()
            .filter_map(|(order, section)| {
                let relevance_score = self.scorer.score(&section.text, category, task);
                (relevance_score > self.min_score).then_some(ScoredSection {
                    section,
                    relevance_score,
                    order,
                })
            })
            .collect()
    }

    /// Sort survivors by score (ties by discovery order), truncate, and assign ranks 1..K.
    pub fn rank(&self, mut scored: Vec<ScoredSection<'_>>) -> Vec<ExtractedSection> {
        scored.sort_by(|a, b| {
            b.relevance_score
                .total_cmp(&a.relevance_score)
                .then(a.order.cmp(&b.order))
        });
        scored.truncate(self.max_sections);

        scored
            .iter()
            .zip(1u32..)
            .map(|(s, rank)| ExtractedSection {
                document: s.section.document.clone(),
                section_title: section_title(&s.section.text),
                importance_rank: rank,
                page_number: s.section.page,
            })
            .collect()
    }

    /// Score, filter and rank in one step.
    pub fn extract(
        &self,
        sections: &[Section],
        category: PersonaCategory,
        task: &str,
    ) -> Vec<ExtractedSection> {
        let scored = self.score_all(sections, category, task);
        log::debug!(
            "{} of {} sections above relevance floor {}",
            scored.len(),
            sections.len(),
            self.min_score
        );
        self.rank(scored)
    }
}

impl Default for SectionExtractor {
    fn default() -> Self {
        Self::new(10)
    }
}

/// Synthesize a human-readable title for a section.
pub fn section_title(text: &str) -> String {
    let lines: Vec<&str> = text.split('\n').map(str::trim).collect();

    let heading_like = lines.iter().take(3).find(|line| {
        let len = line.chars().count();
        len > 5
            && len < 100
            && line.chars().next().is_some_and(char::is_uppercase)
            && !is_upper(line)
    });
    if let Some(line) = heading_like {
        return line.to_string();
    }

    if let Some(line) = lines.iter().find(|line| line.chars().count() > 10) {
        if line.chars().count() > MAX_FALLBACK_TITLE_CHARS {
            let head: String = line.chars().take(MAX_FALLBACK_TITLE_CHARS).collect();
            return format!("{}...", head);
        }
        return line.to_string();
    }

    FALLBACK_SECTION_TITLE.to_string()
}
